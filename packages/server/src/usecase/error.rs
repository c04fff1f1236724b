//! UseCase-level error types.
//!
//! Structural and logic errors are reported back to the originating
//! connection only; they never interrupt other participants' sessions.

use thiserror::Error;

use crate::domain::RegistryError;

/// Errors during meeting creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateMeetingError {
    /// Code generation kept colliding with live meetings. Practically
    /// unreachable with a 31^6 code space; surfaced only after bounded
    /// retries.
    #[error("could not allocate an unused meeting code")]
    CodeSpaceExhausted,

    #[error("invalid creator name")]
    InvalidName,

    /// The creating connection is already in a meeting.
    #[error("connection is already bound to a meeting")]
    AlreadyInMeeting,
}

/// Errors during join.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinMeetingError {
    #[error("meeting '{0}' not found")]
    MeetingNotFound(String),

    #[error("participant '{0}' is already in the meeting")]
    DuplicateParticipant(String),

    #[error("invalid participant name")]
    InvalidName,

    #[error("connection is already bound to a meeting")]
    AlreadyInMeeting,
}

impl From<RegistryError> for JoinMeetingError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::MeetingNotFound(code) => Self::MeetingNotFound(code),
            RegistryError::DuplicateParticipant(name) => Self::DuplicateParticipant(name),
            RegistryError::AlreadyInMeeting => Self::AlreadyInMeeting,
            // Other registry errors cannot occur on the join path.
            other => {
                tracing::error!("Unexpected registry error during join: {}", other);
                Self::MeetingNotFound(String::new())
            }
        }
    }
}

/// Errors during password validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatePasswordError {
    #[error("meeting '{0}' not found")]
    MeetingNotFound(String),
}

/// Errors during relay fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The sending connection is not bound to any meeting.
    #[error("connection is not bound to a meeting")]
    NotInMeeting,
}

/// Errors during host-only moderation (lock toggle, kick).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerateError {
    #[error("connection is not bound to a meeting")]
    NotInMeeting,

    #[error("requester is not the meeting host")]
    PermissionDenied,

    #[error("participant '{0}' is not in the meeting")]
    ParticipantNotFound(String),

    #[error("invalid participant name")]
    InvalidName,
}

impl From<RegistryError> for ModerateError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::PermissionDenied => Self::PermissionDenied,
            RegistryError::ParticipantNotFound(name) => Self::ParticipantNotFound(name),
            _ => Self::NotInMeeting,
        }
    }
}
