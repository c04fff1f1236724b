//! Event delivery interface.
//!
//! The domain layer defines how events reach connections; the concrete
//! WebSocket implementation lives in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// Channel used to push serialized events to one connection.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Errors during event delivery.
#[derive(Debug, Error)]
pub enum EventPushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
    #[error("failed to push event: {0}")]
    PushFailed(String),
}

/// Fan-out interface for the broadcast relay.
///
/// `broadcast` delivers one serialized event to a target set in a single
/// pass over the sender map, so every recipient observes broadcasts from
/// different callers in the same relative order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPusher: Send + Sync {
    /// Register a connection's sender channel.
    async fn register(&self, connection: ConnectionId, sender: PusherChannel);

    /// Remove a connection's sender channel. Dropping the sender lets the
    /// connection's outbound loop drain and terminate.
    async fn unregister(&self, connection: ConnectionId);

    /// Push an event to exactly one connection (acks, private replies).
    async fn push_to(&self, connection: ConnectionId, content: &str)
    -> Result<(), EventPushError>;

    /// Push an event to every target connection. Partial delivery failures
    /// are tolerated and logged.
    async fn broadcast(&self, targets: &[ConnectionId], content: &str);
}
