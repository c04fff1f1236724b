//! UseCase: real-time relay of board and chat traffic.
//!
//! The server does not retain board contents; it resolves the sender's
//! meeting and fans the event out. Draw and clear traffic goes to everyone
//! except the sender (the sender already rendered locally). Chat goes to the
//! whole meeting in one broadcast pass, sender included, so all members see
//! messages in the same relative order.

use std::sync::Arc;

use kokuban_shared::protocol::{DrawPayload, ServerEvent};

use crate::domain::{ConnectionId, EventPusher, RegistryError, SessionRegistry};

use super::error::RelayError;

/// Board and chat relay usecase.
pub struct RelayEventUseCase {
    registry: Arc<dyn SessionRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl RelayEventUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Relay one draw operation to every other member of the sender's
    /// meeting.
    pub async fn relay_draw(
        &self,
        sender: ConnectionId,
        payload: DrawPayload,
    ) -> Result<(), RelayError> {
        let peers = self.peers(sender).await?;
        let event = ServerEvent::DrawingData { payload };
        let content = serde_json::to_string(&event).unwrap();
        self.pusher.broadcast(&peers, &content).await;
        Ok(())
    }

    /// Relay a board clear to every other member. On the wire a clear is a
    /// draw operation of kind "clear", so late listeners need only one
    /// handler for board traffic.
    pub async fn relay_clear(&self, sender: ConnectionId) -> Result<(), RelayError> {
        self.relay_draw(sender, DrawPayload::clear()).await
    }

    /// Relay a chat message to the whole meeting, sender included.
    pub async fn relay_chat(
        &self,
        sender: ConnectionId,
        username: String,
        message: String,
        timestamp: i64,
    ) -> Result<(), RelayError> {
        let peers = match self.registry.peers(sender).await {
            Ok(peers) => peers,
            Err(RegistryError::NotInMeeting) => return Err(RelayError::NotInMeeting),
            Err(e) => {
                tracing::error!("Unexpected registry error during relay: {}", e);
                return Err(RelayError::NotInMeeting);
            }
        };
        let event = ServerEvent::NewChatMessage {
            username,
            message,
            timestamp,
        };
        let content = serde_json::to_string(&event).unwrap();
        self.pusher.broadcast(&peers.all, &content).await;
        Ok(())
    }

    async fn peers(&self, sender: ConnectionId) -> Result<Vec<ConnectionId>, RelayError> {
        match self.registry.peers(sender).await {
            Ok(peers) => Ok(peers.others),
            Err(RegistryError::NotInMeeting) => Err(RelayError::NotInMeeting),
            Err(e) => {
                tracing::error!("Unexpected registry error during relay: {}", e);
                Err(RelayError::NotInMeeting)
            }
        }
    }
}
