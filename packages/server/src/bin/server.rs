//! Collaborative whiteboard relay server.
//!
//! Hosts meetings over WebSocket: board strokes and chat are relayed to the
//! other members of the sender's meeting, the server keeps no board contents.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kokuban-server
//! cargo run --bin kokuban-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use kokuban_server::{
    infrastructure::{InMemorySessionRegistry, WebSocketEventPusher},
    ui::Server,
    usecase::{
        CreateMeetingUseCase, DisconnectParticipantUseCase, JoinMeetingUseCase,
        ModerateMeetingUseCase, RelayEventUseCase, ValidatePasswordUseCase,
    },
};
use kokuban_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kokuban-server")]
#[command(about = "Collaborative whiteboard relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. SessionRegistry
    // 2. EventPusher
    // 3. UseCases
    // 4. Server

    // 1. Create SessionRegistry (in-memory meeting table)
    let registry = Arc::new(InMemorySessionRegistry::new());

    // 2. Create EventPusher (WebSocket implementation)
    let pusher = Arc::new(WebSocketEventPusher::new());

    // 3. Create UseCases
    let create_meeting_usecase = Arc::new(CreateMeetingUseCase::new(registry.clone()));
    let join_meeting_usecase =
        Arc::new(JoinMeetingUseCase::new(registry.clone(), pusher.clone()));
    let validate_password_usecase = Arc::new(ValidatePasswordUseCase::new(registry.clone()));
    let relay_event_usecase =
        Arc::new(RelayEventUseCase::new(registry.clone(), pusher.clone()));
    let moderate_meeting_usecase =
        Arc::new(ModerateMeetingUseCase::new(registry.clone(), pusher.clone()));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        registry,
        pusher,
        create_meeting_usecase,
        join_meeting_usecase,
        validate_password_usecase,
        relay_event_usecase,
        moderate_meeting_usecase,
        disconnect_participant_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
