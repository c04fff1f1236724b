//! Value objects for the meeting domain.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Length of a public meeting code.
pub const MEETING_CODE_LEN: usize = 6;

/// Charset for meeting codes. Alphanumeric with the ambiguous characters
/// (0/O, 1/I/L) removed so codes can be read aloud or copied by hand.
pub const MEETING_CODE_CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Validation errors for value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("meeting code must be {MEETING_CODE_LEN} characters from the code charset")]
    InvalidMeetingCode,
    #[error("participant name must be 1-32 characters")]
    InvalidParticipantName,
}

/// Public meeting identifier, e.g. `7G2K9P`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeetingCode(String);

impl MeetingCode {
    /// Create a MeetingCode from an externally supplied string.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let valid = value.len() == MEETING_CODE_LEN
            && value.bytes().all(|b| MEETING_CODE_CHARSET.contains(&b));
        if valid {
            Ok(Self(value))
        } else {
            Err(ValueObjectError::InvalidMeetingCode)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MeetingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Factory for freshly generated meeting codes.
///
/// Uses uuid v4 bytes as the entropy source so no extra RNG dependency is
/// needed. Collision with a live meeting is handled by the caller (retry).
pub struct MeetingCodeFactory;

impl MeetingCodeFactory {
    pub fn generate() -> MeetingCode {
        let entropy = Uuid::new_v4();
        let code: String = entropy.as_bytes()[..MEETING_CODE_LEN]
            .iter()
            .map(|b| MEETING_CODE_CHARSET[(*b as usize) % MEETING_CODE_CHARSET.len()] as char)
            .collect();
        MeetingCode(code)
    }
}

/// Display name of a meeting participant. Unique within a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().count() > 32 {
            return Err(ValueObjectError::InvalidParticipantName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one live WebSocket connection. Assigned server-side at
/// transport connect, independent of any meeting membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared meeting password. Plaintext by design; an empty secret means the
/// meeting is open and validates against any supplied value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn is_open(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact-equality check. Open meetings validate any supplied value,
    /// including the empty string.
    pub fn matches(&self, supplied: &str) -> bool {
        self.is_open() || self.0 == supplied
    }
}

/// Unix timestamp in JST milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
