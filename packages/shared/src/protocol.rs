//! WebSocket wire protocol for the Kokuban whiteboard.
//!
//! Every frame is a JSON object discriminated by an `"event"` field, with
//! camelCase event names and payload fields. Drawing payloads carry their own
//! inner `type` discriminator (`drawing` / `text` / `clear`); the server
//! relays them untouched and never interprets geometry, so that field is kept
//! verbatim and separate from the envelope discriminator.

use serde::{Deserialize, Serialize};

/// Opaque drawing payload.
///
/// The relay forwards this as-is to the other members of the sender's
/// meeting. Only the structural shape is validated (by deserialization);
/// malformed geometry is the rendering surface's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_drawing: Option<bool>,
    /// Inner discriminator: `drawing`, `text`, or `clear`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl DrawPayload {
    /// Payload representing a full-board clear.
    pub fn clear() -> Self {
        Self {
            tool: None,
            shape: None,
            color: None,
            size: None,
            x: None,
            y: None,
            text: None,
            is_drawing: None,
            kind: "clear".to_string(),
        }
    }
}

/// A participant as seen on the wire.
///
/// The host role travels as an explicit flag; the `"Name (Host)"` suffix is a
/// display convention applied client-side only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    pub name: String,
    pub is_host: bool,
}

impl ParticipantInfo {
    /// Display form used by clients, e.g. `"Alice (Host)"`.
    pub fn display_name(&self) -> String {
        if self.is_host {
            format!("{} (Host)", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Client → server events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    CreateMeeting { creator_name: String, password: String },
    #[serde(rename_all = "camelCase")]
    JoinMeeting { meeting_id: String, username: String },
    #[serde(rename_all = "camelCase")]
    ValidatePassword { meeting_id: String, password: String },
    #[serde(rename_all = "camelCase")]
    Draw {
        meeting_id: String,
        #[serde(flatten)]
        payload: DrawPayload,
    },
    #[serde(rename_all = "camelCase")]
    Clear { meeting_id: String },
    #[serde(rename_all = "camelCase")]
    ChatMessage {
        meeting_id: String,
        username: String,
        message: String,
        /// Sender's own clock, relayed uninterpreted.
        timestamp: i64,
    },
    #[serde(rename_all = "camelCase")]
    KickUser { meeting_id: String, username: String },
    #[serde(rename_all = "camelCase")]
    ToggleLock { meeting_id: String, is_locked: bool },
}

/// Server → client events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    MeetingCreated { meeting_id: String },
    #[serde(rename_all = "camelCase")]
    MeetingJoined {
        meeting_id: String,
        participants: Vec<ParticipantInfo>,
        is_locked: bool,
    },
    #[serde(rename_all = "camelCase")]
    ParticipantJoined {
        username: String,
        participants: Vec<ParticipantInfo>,
    },
    #[serde(rename_all = "camelCase")]
    ParticipantLeft {
        username: String,
        participants: Vec<ParticipantInfo>,
    },
    #[serde(rename_all = "camelCase")]
    UserKicked {
        username: String,
        participants: Vec<ParticipantInfo>,
    },
    /// Sent only to the evicted connection.
    YouWereKicked,
    #[serde(rename_all = "camelCase")]
    BoardLocked { is_locked: bool },
    #[serde(rename_all = "camelCase")]
    NewChatMessage {
        username: String,
        message: String,
        timestamp: i64,
    },
    #[serde(rename_all = "camelCase")]
    DrawingData {
        #[serde(flatten)]
        payload: DrawPayload,
    },
    /// Private request/response ack for `validatePassword`; never broadcast.
    #[serde(rename_all = "camelCase")]
    PasswordValidation { valid: bool },
    /// Reported back to the originating connection only.
    #[serde(rename_all = "camelCase")]
    Error { code: ErrorCode, message: String },
}

/// Error taxonomy surfaced on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    RoomNotFound,
    DuplicateParticipant,
    PermissionDenied,
    NotInMeeting,
    InvalidRequest,
}
