//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    CreateMeetingUseCase, DisconnectParticipantUseCase, JoinMeetingUseCase,
    ModerateMeetingUseCase, RelayEventUseCase, ValidatePasswordUseCase,
};

use super::{
    handler::{get_meeting_detail, get_meetings, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router. Exposed so integration tests can serve the
/// exact production routes on an ephemeral port.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/meetings", get(get_meetings))
        .route("/api/meetings/{meeting_id}", get(get_meeting_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Collaborative whiteboard relay server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance from pre-wired usecases.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: Arc<dyn crate::domain::SessionRegistry>,
        pusher: Arc<dyn crate::domain::EventPusher>,
        create_meeting_usecase: Arc<CreateMeetingUseCase>,
        join_meeting_usecase: Arc<JoinMeetingUseCase>,
        validate_password_usecase: Arc<ValidatePasswordUseCase>,
        relay_event_usecase: Arc<RelayEventUseCase>,
        moderate_meeting_usecase: Arc<ModerateMeetingUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                registry,
                pusher,
                create_meeting_usecase,
                join_meeting_usecase,
                validate_password_usecase,
                relay_event_usecase,
                moderate_meeting_usecase,
                disconnect_participant_usecase,
            }),
        }
    }

    /// Run the whiteboard relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = build_router(self.state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Whiteboard relay server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
