//! WebSocket client session management.
//!
//! One session is one connection: an inbound task renders server events and
//! applies relayed board traffic, while an outbound task turns interactive
//! commands into wire events. Both share the local board and its undo
//! history.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use kokuban_shared::protocol::{ClientEvent, DrawPayload, ServerEvent};
use kokuban_shared::time::get_jst_timestamp;

use crate::{
    board::{Board, stroke, text_op},
    command::{self, Command},
    error::ClientError,
    formatter::MessageFormatter,
    history::BoardHistory,
    ui::redisplay_prompt,
};

/// State shared between the inbound and outbound halves of a session.
struct SessionState {
    meeting_id: Option<String>,
    board: Board,
    history: BoardHistory,
}

impl SessionState {
    fn new() -> Self {
        let board = Board::new();
        let history = BoardHistory::new(board.snapshot());
        Self {
            meeting_id: None,
            board,
            history,
        }
    }
}

/// Run one WebSocket client session until the connection ends.
pub async fn run_client_session(url: &str, username: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;

    tracing::info!("Connected to whiteboard server!");
    println!(
        "\nYou are '{}'. Use /create, /join CODE, /draw X Y, /undo and friends. Plain text is chat. Press Ctrl+C to exit.\n",
        username
    );

    let (mut write, mut read) = ws_stream.split();
    let state = Arc::new(Mutex::new(SessionState::new()));

    // Inbound: render server events and apply relayed board traffic
    let username_for_read = username.to_string();
    let state_for_read = state.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => {
                            if let Err(e) =
                                handle_server_event(&state_for_read, &username_for_read, event)
                                    .await
                            {
                                return Err(e);
                            }
                        }
                        Err(_) => {
                            print!("{}", MessageFormatter::format_raw_message(&text));
                        }
                    }
                    redisplay_prompt(&username_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::Connection(
                        "server closed the connection".to_string(),
                    ));
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::Connection(e.to_string()));
                }
                _ => {}
            }
        }
        Err(ClientError::Connection("connection lost".to_string()))
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let username_for_prompt = username.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", username_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Outbound: turn interactive commands into wire events
    let username_for_write = username.to_string();
    let state_for_write = state.clone();
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let command = command::parse(&line);
            let outgoing =
                apply_command(&state_for_write, &username_for_write, command).await;
            match outgoing {
                CommandOutcome::Send(event) => {
                    let json = serde_json::to_string(&event).unwrap();
                    if let Err(e) = write.send(Message::Text(json.into())).await {
                        tracing::warn!("Failed to send event: {}", e);
                        return Err(ClientError::Connection(e.to_string()));
                    }
                }
                CommandOutcome::Handled => {
                    redisplay_prompt(&username_for_write);
                }
                CommandOutcome::Quit => break,
            }
        }
        Ok(())
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            match read_result {
                Ok(outcome) => outcome,
                Err(_) => Err(ClientError::Connection("session task failed".to_string())),
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            match write_result {
                Ok(outcome) => outcome,
                Err(_) => Err(ClientError::Connection("session task failed".to_string())),
            }
        }
    }
}

/// What happened while executing a command locally.
enum CommandOutcome {
    /// The command produced a wire event to send.
    Send(ClientEvent),
    /// The command was handled locally (board query, undo, parse error).
    Handled,
    /// The user asked to exit.
    Quit,
}

async fn apply_command(
    state: &Arc<Mutex<SessionState>>,
    username: &str,
    command: Command,
) -> CommandOutcome {
    match command {
        Command::Create { password } => CommandOutcome::Send(ClientEvent::CreateMeeting {
            creator_name: username.to_string(),
            password,
        }),
        Command::Join { meeting_id } => CommandOutcome::Send(ClientEvent::JoinMeeting {
            meeting_id,
            username: username.to_string(),
        }),
        Command::Validate {
            meeting_id,
            password,
        } => CommandOutcome::Send(ClientEvent::ValidatePassword {
            meeting_id,
            password,
        }),
        Command::Draw { x, y } => record_and_send(state, stroke(x, y)).await,
        Command::Text { x, y, text } => record_and_send(state, text_op(x, y, text)).await,
        Command::Clear => {
            let mut state = state.lock().await;
            let Some(meeting_id) = state.meeting_id.clone() else {
                println!("Join a meeting first");
                return CommandOutcome::Handled;
            };
            state.board.apply(DrawPayload::clear());
            let snapshot = state.board.snapshot();
            state.history.record(snapshot);
            CommandOutcome::Send(ClientEvent::Clear { meeting_id })
        }
        Command::Kick { username: target } => {
            let state = state.lock().await;
            match state.meeting_id.clone() {
                Some(meeting_id) => CommandOutcome::Send(ClientEvent::KickUser {
                    meeting_id,
                    username: target,
                }),
                None => {
                    println!("Join a meeting first");
                    CommandOutcome::Handled
                }
            }
        }
        Command::Lock { is_locked } => {
            let state = state.lock().await;
            match state.meeting_id.clone() {
                Some(meeting_id) => CommandOutcome::Send(ClientEvent::ToggleLock {
                    meeting_id,
                    is_locked,
                }),
                None => {
                    println!("Join a meeting first");
                    CommandOutcome::Handled
                }
            }
        }
        Command::Undo => {
            let mut state = state.lock().await;
            match state.history.undo().cloned() {
                Some(snapshot) => {
                    state.board.restore(&snapshot);
                    println!("Undid last operation ({} on the board)", state.board.len());
                }
                None => println!("Nothing to undo"),
            }
            CommandOutcome::Handled
        }
        Command::Redo => {
            let mut state = state.lock().await;
            match state.history.redo().cloned() {
                Some(snapshot) => {
                    state.board.restore(&snapshot);
                    println!("Redid operation ({} on the board)", state.board.len());
                }
                None => println!("Nothing to redo"),
            }
            CommandOutcome::Handled
        }
        Command::Board => {
            let state = state.lock().await;
            print!("{}", state.board.render());
            CommandOutcome::Handled
        }
        Command::Export => {
            let state = state.lock().await;
            print!("{}", state.board.export_with_watermark());
            CommandOutcome::Handled
        }
        Command::Quit => CommandOutcome::Quit,
        Command::Chat { message } => {
            let state = state.lock().await;
            match state.meeting_id.clone() {
                Some(meeting_id) => CommandOutcome::Send(ClientEvent::ChatMessage {
                    meeting_id,
                    username: username.to_string(),
                    message,
                    timestamp: get_jst_timestamp(),
                }),
                None => {
                    println!("Join a meeting first");
                    CommandOutcome::Handled
                }
            }
        }
        Command::Invalid { reason } => {
            println!("{}", reason);
            CommandOutcome::Handled
        }
    }
}

/// Apply a local drawing operation to the board, record the undo snapshot,
/// and emit the wire event.
async fn record_and_send(
    state: &Arc<Mutex<SessionState>>,
    payload: DrawPayload,
) -> CommandOutcome {
    let mut state = state.lock().await;
    let Some(meeting_id) = state.meeting_id.clone() else {
        println!("Join a meeting first");
        return CommandOutcome::Handled;
    };
    state.board.apply(payload.clone());
    let snapshot = state.board.snapshot();
    state.history.record(snapshot);
    CommandOutcome::Send(ClientEvent::Draw {
        meeting_id,
        payload,
    })
}

/// React to one server event. Returns `Err(ClientError::Evicted)` when the
/// host removed this client; the session must not reconnect.
async fn handle_server_event(
    state: &Arc<Mutex<SessionState>>,
    username: &str,
    event: ServerEvent,
) -> Result<(), ClientError> {
    match event {
        ServerEvent::MeetingCreated { meeting_id } => {
            state.lock().await.meeting_id = Some(meeting_id.clone());
            println!(
                "\nMeeting {} created. Share this code to let others join.",
                meeting_id
            );
        }
        ServerEvent::MeetingJoined {
            meeting_id,
            participants,
            is_locked,
        } => {
            state.lock().await.meeting_id = Some(meeting_id.clone());
            print!(
                "{}",
                MessageFormatter::format_meeting_joined(
                    &meeting_id,
                    &participants,
                    username,
                    is_locked
                )
            );
        }
        ServerEvent::ParticipantJoined {
            username: joined,
            participants,
        } => {
            print!(
                "{}",
                MessageFormatter::format_participant_joined(&joined, &participants)
            );
        }
        ServerEvent::ParticipantLeft {
            username: left,
            participants,
        } => {
            print!(
                "{}",
                MessageFormatter::format_participant_left(&left, &participants)
            );
        }
        ServerEvent::UserKicked {
            username: kicked,
            participants,
        } => {
            print!(
                "{}",
                MessageFormatter::format_user_kicked(&kicked, &participants)
            );
        }
        ServerEvent::YouWereKicked => {
            println!("\nYou were removed from the meeting by the host.");
            return Err(ClientError::Evicted);
        }
        ServerEvent::BoardLocked { is_locked } => {
            print!("{}", MessageFormatter::format_board_locked(is_locked));
        }
        ServerEvent::NewChatMessage {
            username: from,
            message,
            timestamp,
        } => {
            print!(
                "{}",
                MessageFormatter::format_chat_message(&from, &message, timestamp)
            );
        }
        ServerEvent::DrawingData { payload } => {
            state.lock().await.board.apply(payload.clone());
            print!("{}", MessageFormatter::format_drawing(&payload));
        }
        ServerEvent::PasswordValidation { valid } => {
            if valid {
                println!("\nPassword accepted.");
            } else {
                println!("\nPassword rejected.");
            }
        }
        ServerEvent::Error { message, .. } => {
            print!("{}", MessageFormatter::format_error(&message));
        }
    }
    Ok(())
}
