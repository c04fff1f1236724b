//! HTTP API response DTOs for the observation endpoints.
//!
//! The meeting secret is deliberately never exposed here.

use serde::Serialize;

use kokuban_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::Meeting;

/// Summary of one live meeting.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummaryDto {
    pub meeting_id: String,
    pub participant_count: usize,
    pub is_locked: bool,
    pub created_at: String,
}

impl From<&Meeting> for MeetingSummaryDto {
    fn from(meeting: &Meeting) -> Self {
        Self {
            meeting_id: meeting.code.as_str().to_string(),
            participant_count: meeting.participants.len(),
            is_locked: meeting.is_locked,
            created_at: timestamp_to_jst_rfc3339(meeting.created_at.value()),
        }
    }
}

/// Detailed view of one live meeting.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDetailDto {
    pub meeting_id: String,
    pub participants: Vec<ParticipantDetailDto>,
    pub is_locked: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDetailDto {
    pub name: String,
    pub is_host: bool,
    pub joined_at: String,
}

impl From<&Meeting> for MeetingDetailDto {
    fn from(meeting: &Meeting) -> Self {
        Self {
            meeting_id: meeting.code.as_str().to_string(),
            participants: meeting
                .participants
                .iter()
                .map(|p| ParticipantDetailDto {
                    name: p.name.as_str().to_string(),
                    is_host: p.is_host,
                    joined_at: timestamp_to_jst_rfc3339(p.joined_at.value()),
                })
                .collect(),
            is_locked: meeting.is_locked,
            created_at: timestamp_to_jst_rfc3339(meeting.created_at.value()),
        }
    }
}
