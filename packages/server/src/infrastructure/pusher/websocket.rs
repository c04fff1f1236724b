//! WebSocket implementation of the event pusher.
//!
//! Owns the map from connection id to the `UnboundedSender` feeding that
//! connection's outbound loop. Socket creation happens in the UI layer;
//! this type only manages senders and delivery.
//!
//! The map's mutex is the fan-out serialization point: one `broadcast` call
//! delivers to its whole target set under a single lock acquisition, so two
//! broadcasts can never interleave and all recipients observe the same
//! relative event order.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, EventPushError, EventPusher, PusherChannel};

/// WebSocket-backed event pusher.
pub struct WebSocketEventPusher {
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketEventPusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketEventPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPusher for WebSocketEventPusher {
    async fn register(&self, connection: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection, sender);
        tracing::debug!("Connection '{}' registered to EventPusher", connection);
    }

    async fn unregister(&self, connection: ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(&connection);
        tracing::debug!("Connection '{}' unregistered from EventPusher", connection);
    }

    async fn push_to(
        &self,
        connection: ConnectionId,
        content: &str,
    ) -> Result<(), EventPushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(&connection) {
            sender
                .send(content.to_string())
                .map_err(|e| EventPushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed event to connection '{}'", connection);
            Ok(())
        } else {
            Err(EventPushError::ConnectionNotFound(connection.to_string()))
        }
    }

    async fn broadcast(&self, targets: &[ConnectionId], content: &str) {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(target) {
                // Partial delivery failure is tolerated during broadcast.
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push event to connection '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted event to connection '{}'", target);
                }
            } else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                );
            }
        }
    }
}
