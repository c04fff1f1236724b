//! Error types for the whiteboard client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The host removed this client from the meeting
    #[error("You were removed from the meeting by the host")]
    Evicted,

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
}
