//! UseCase: host-only moderation (board lock, participant eviction).
//!
//! Both operations verify the requester against the meeting's recorded host
//! connection; the check never trusts client-supplied names or flags.

use std::sync::Arc;

use kokuban_shared::protocol::{ParticipantInfo, ServerEvent};

use crate::domain::{
    ConnectionId, EventPushError, EventPusher, ParticipantName, SessionRegistry,
};

use super::error::ModerateError;

/// Moderation usecase.
pub struct ModerateMeetingUseCase {
    registry: Arc<dyn SessionRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl ModerateMeetingUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Set the board lock flag and announce the new state to every member,
    /// requester included.
    pub async fn toggle_lock(
        &self,
        requester: ConnectionId,
        is_locked: bool,
    ) -> Result<(), ModerateError> {
        let update = self.registry.set_locked(requester, is_locked).await?;
        let event = ServerEvent::BoardLocked {
            is_locked: update.is_locked,
        };
        let content = serde_json::to_string(&event).unwrap();
        self.pusher.broadcast(&update.members, &content).await;
        Ok(())
    }

    /// Evict the named participant from the requester's meeting.
    ///
    /// Notices are ordered so the target's channel still exists when its
    /// private notice is pushed: first `youWereKicked` to the target, then
    /// `userKicked` to everyone remaining, then the target's channel is
    /// dropped so its outbound loop drains and the socket closes.
    pub async fn kick(
        &self,
        requester: ConnectionId,
        username: &str,
    ) -> Result<(), ModerateError> {
        let target_name = ParticipantName::new(username.to_string())
            .map_err(|_| ModerateError::InvalidName)?;
        let eviction = self.registry.evict(requester, &target_name).await?;

        let target_connection = eviction.target.connection;
        let notice = serde_json::to_string(&ServerEvent::YouWereKicked).unwrap();
        match self.pusher.push_to(target_connection, &notice).await {
            Ok(()) => {}
            // The target may have raced a disconnect; eviction still holds.
            Err(EventPushError::ConnectionNotFound(_)) => {}
            Err(e) => {
                tracing::warn!("Failed to deliver eviction notice: {}", e);
            }
        }

        let announcement = ServerEvent::UserKicked {
            username: eviction.target.name.as_str().to_string(),
            participants: eviction
                .participants
                .iter()
                .map(ParticipantInfo::from)
                .collect(),
        };
        let content = serde_json::to_string(&announcement).unwrap();
        self.pusher.broadcast(&eviction.remaining, &content).await;

        self.pusher.unregister(target_connection).await;
        Ok(())
    }
}
