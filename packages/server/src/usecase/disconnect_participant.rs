//! UseCase: connection teardown.
//!
//! Removes the departing connection's participant and binding, announces the
//! departure to the remaining members, and destroys the meeting once the last
//! member leaves. Safe to call for connections that never joined anything or
//! were already evicted.

use std::sync::Arc;

use kokuban_shared::protocol::{ParticipantInfo, ServerEvent};

use crate::domain::{ConnectionId, Departure, EventPusher, SessionRegistry};

/// Disconnect cleanup usecase.
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn SessionRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Remove `connection` from its meeting, if bound, and announce the
    /// departure. Returns what happened so the caller can log it.
    pub async fn execute(&self, connection: ConnectionId) -> Option<Departure> {
        let departure = self.registry.remove_connection(connection).await?;

        if !departure.meeting_destroyed {
            let announcement = ServerEvent::ParticipantLeft {
                username: departure.participant.name.as_str().to_string(),
                participants: departure
                    .participants
                    .iter()
                    .map(ParticipantInfo::from)
                    .collect(),
            };
            let content = serde_json::to_string(&announcement).unwrap();
            self.pusher.broadcast(&departure.remaining, &content).await;
        }

        Some(departure)
    }
}
