//! WebSocket connection handlers.
//!
//! Each socket gets a server-generated `ConnectionId`; the client never
//! supplies its own identity. Events that fail validation are reported back
//! to the originating socket only and never interrupt other participants.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use kokuban_shared::protocol::{ClientEvent, ErrorCode, ParticipantInfo, ServerEvent};

use crate::{
    domain::ConnectionId,
    usecase::{CreateMeetingError, JoinMeetingError, ModerateError, RelayError,
        ValidatePasswordError},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection = ConnectionId::generate();
    tracing::info!("Connection '{}' accepted", connection);
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection))
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound event flow: events addressed to this
/// connection (via rx channel) are written to its WebSocket. The task ends
/// when the channel closes, which happens when the connection is
/// unregistered from the pusher.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the event to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Register the outbound channel before any event can address this
    // connection.
    let (tx, rx) = mpsc::unbounded_channel();
    state.pusher.register(connection, tx).await;
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            handle_event(&state_clone, connection, event).await;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Malformed event from '{}': {}",
                                connection,
                                e
                            );
                            push_error(
                                &state_clone,
                                connection,
                                ErrorCode::InvalidRequest,
                                "malformed event",
                            )
                            .await;
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping from '{}'", connection);
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Announce the departure to the remaining members, then drop the
    // outbound channel.
    match state.disconnect_participant_usecase.execute(connection).await {
        Some(departure) => {
            if departure.meeting_destroyed {
                tracing::info!(
                    "Connection '{}' left meeting '{}' (meeting destroyed)",
                    connection,
                    departure.meeting_code
                );
            } else {
                tracing::info!(
                    "Connection '{}' ('{}') left meeting '{}'",
                    connection,
                    departure.participant.name,
                    departure.meeting_code
                );
            }
        }
        None => {
            tracing::info!("Connection '{}' closed without a meeting", connection);
        }
    }
    state.pusher.unregister(connection).await;
}

async fn handle_event(state: &Arc<AppState>, connection: ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::CreateMeeting {
            creator_name,
            password,
        } => {
            match state
                .create_meeting_usecase
                .execute(connection, &creator_name, password)
                .await
            {
                Ok(code) => {
                    tracing::info!("Meeting '{}' created by '{}'", code, creator_name);
                    let ack = ServerEvent::MeetingCreated {
                        meeting_id: code.into_string(),
                    };
                    push_event(state, connection, &ack).await;
                }
                Err(e) => {
                    let code = match e {
                        CreateMeetingError::CodeSpaceExhausted
                        | CreateMeetingError::InvalidName
                        | CreateMeetingError::AlreadyInMeeting => ErrorCode::InvalidRequest,
                    };
                    push_error(state, connection, code, &e.to_string()).await;
                }
            }
        }
        ClientEvent::JoinMeeting {
            meeting_id,
            username,
        } => {
            match state
                .join_meeting_usecase
                .execute(connection, &meeting_id, &username)
                .await
            {
                Ok((code, view)) => {
                    tracing::info!("'{}' joined meeting '{}'", username, code);
                    let ack = ServerEvent::MeetingJoined {
                        meeting_id: code.into_string(),
                        participants: view
                            .participants
                            .iter()
                            .map(ParticipantInfo::from)
                            .collect(),
                        is_locked: view.is_locked,
                    };
                    push_event(state, connection, &ack).await;
                }
                Err(e) => {
                    let code = match e {
                        JoinMeetingError::MeetingNotFound(_) => ErrorCode::RoomNotFound,
                        JoinMeetingError::DuplicateParticipant(_) => {
                            ErrorCode::DuplicateParticipant
                        }
                        JoinMeetingError::InvalidName | JoinMeetingError::AlreadyInMeeting => {
                            ErrorCode::InvalidRequest
                        }
                    };
                    push_error(state, connection, code, &e.to_string()).await;
                }
            }
        }
        ClientEvent::ValidatePassword {
            meeting_id,
            password,
        } => {
            match state
                .validate_password_usecase
                .execute(&meeting_id, &password)
                .await
            {
                Ok(valid) => {
                    let ack = ServerEvent::PasswordValidation { valid };
                    push_event(state, connection, &ack).await;
                }
                Err(e @ ValidatePasswordError::MeetingNotFound(_)) => {
                    push_error(state, connection, ErrorCode::RoomNotFound, &e.to_string())
                        .await;
                }
            }
        }
        // meeting_id is carried for wire compatibility; the relay target is
        // resolved from the server-side binding, never from the field.
        ClientEvent::Draw { payload, .. } => {
            if let Err(e) = state.relay_event_usecase.relay_draw(connection, payload).await {
                push_relay_error(state, connection, e).await;
            }
        }
        ClientEvent::Clear { .. } => {
            if let Err(e) = state.relay_event_usecase.relay_clear(connection).await {
                push_relay_error(state, connection, e).await;
            }
        }
        ClientEvent::ChatMessage {
            username,
            message,
            timestamp,
            ..
        } => {
            if let Err(e) = state
                .relay_event_usecase
                .relay_chat(connection, username, message, timestamp)
                .await
            {
                push_relay_error(state, connection, e).await;
            }
        }
        ClientEvent::KickUser { username, .. } => {
            match state.moderate_meeting_usecase.kick(connection, &username).await {
                Ok(()) => {
                    tracing::info!("'{}' kicked by host connection '{}'", username, connection);
                }
                Err(e) => {
                    let code = match e {
                        ModerateError::NotInMeeting => ErrorCode::NotInMeeting,
                        ModerateError::PermissionDenied => ErrorCode::PermissionDenied,
                        ModerateError::ParticipantNotFound(_) | ModerateError::InvalidName => {
                            ErrorCode::InvalidRequest
                        }
                    };
                    push_error(state, connection, code, &e.to_string()).await;
                }
            }
        }
        ClientEvent::ToggleLock { is_locked, .. } => {
            match state
                .moderate_meeting_usecase
                .toggle_lock(connection, is_locked)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        "Board lock set to {} by connection '{}'",
                        is_locked,
                        connection
                    );
                }
                Err(e) => {
                    let code = match e {
                        ModerateError::NotInMeeting => ErrorCode::NotInMeeting,
                        ModerateError::PermissionDenied => ErrorCode::PermissionDenied,
                        ModerateError::ParticipantNotFound(_) | ModerateError::InvalidName => {
                            ErrorCode::InvalidRequest
                        }
                    };
                    push_error(state, connection, code, &e.to_string()).await;
                }
            }
        }
    }
}

async fn push_event(state: &Arc<AppState>, connection: ConnectionId, event: &ServerEvent) {
    let content = serde_json::to_string(event).unwrap();
    if let Err(e) = state.pusher.push_to(connection, &content).await {
        tracing::warn!("Failed to push event to '{}': {}", connection, e);
    }
}

async fn push_error(
    state: &Arc<AppState>,
    connection: ConnectionId,
    code: ErrorCode,
    message: &str,
) {
    let event = ServerEvent::Error {
        code,
        message: message.to_string(),
    };
    push_event(state, connection, &event).await;
}

async fn push_relay_error(state: &Arc<AppState>, connection: ConnectionId, e: RelayError) {
    let code = match e {
        RelayError::NotInMeeting => ErrorCode::NotInMeeting,
    };
    push_error(state, connection, code, &e.to_string()).await;
}
