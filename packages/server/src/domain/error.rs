//! Domain-level error taxonomy for the session registry.

use thiserror::Error;

/// Errors produced by registry state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Join/validate against an unknown meeting code.
    #[error("meeting '{0}' not found")]
    MeetingNotFound(String),

    /// Name collision within a meeting; surfaced to the joiner.
    #[error("participant '{0}' is already in the meeting")]
    DuplicateParticipant(String),

    /// Internal collision during code generation; retried transparently by
    /// the caller, never surfaced to clients.
    #[error("meeting code '{0}' is already live")]
    DuplicateMeetingCode(String),

    /// Non-host attempting a host-only action. Enforced server-side against
    /// the recorded host connection.
    #[error("requester is not the meeting host")]
    PermissionDenied,

    /// Kick target does not exist in the requester's meeting.
    #[error("participant '{0}' is not in the meeting")]
    ParticipantNotFound(String),

    /// The connection is not bound to any meeting.
    #[error("connection is not bound to a meeting")]
    NotInMeeting,

    /// The connection is already bound to a meeting; a connection belongs
    /// to at most one meeting at a time.
    #[error("connection is already bound to a meeting")]
    AlreadyInMeeting,
}
