//! Event formatting utilities for client display.

use kokuban_shared::protocol::{DrawPayload, ParticipantInfo};
use kokuban_shared::time::timestamp_to_jst_hhmm;

/// Event formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the roster shown after joining a meeting.
    ///
    /// # Arguments
    ///
    /// * `meeting_id` - The public meeting code
    /// * `participants` - Everyone currently in the meeting
    /// * `current_username` - The current client's name (to mark as "me")
    /// * `is_locked` - Current board lock state
    pub fn format_meeting_joined(
        meeting_id: &str,
        participants: &[ParticipantInfo],
        current_username: &str,
        is_locked: bool,
    ) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str(&format!("Meeting {} (board {})\n", meeting_id, if is_locked { "locked" } else { "unlocked" }));
        output.push_str("Participants:\n");
        for participant in participants {
            let me_suffix = if participant.name == current_username {
                " (me)"
            } else {
                ""
            };
            output.push_str(&format!("{}{}\n", participant.display_name(), me_suffix));
        }
        output.push_str("============================================================\n");
        output
    }

    /// Format a participant-joined notification
    pub fn format_participant_joined(username: &str, participants: &[ParticipantInfo]) -> String {
        format!(
            "\n+ {} joined ({} in the meeting)\n",
            username,
            participants.len()
        )
    }

    /// Format a participant-left notification
    pub fn format_participant_left(username: &str, participants: &[ParticipantInfo]) -> String {
        format!(
            "\n- {} left ({} in the meeting)\n",
            username,
            participants.len()
        )
    }

    /// Format a kick announcement shown to the remaining members
    pub fn format_user_kicked(username: &str, participants: &[ParticipantInfo]) -> String {
        format!(
            "\n- {} was removed by the host ({} in the meeting)\n",
            username,
            participants.len()
        )
    }

    /// Format a board lock state change
    pub fn format_board_locked(is_locked: bool) -> String {
        if is_locked {
            "\n* The host locked the board\n".to_string()
        } else {
            "\n* The host unlocked the board\n".to_string()
        }
    }

    /// Format a chat message
    pub fn format_chat_message(from: &str, content: &str, sent_at: i64) -> String {
        format!("\n[{}] @{}: {}\n", timestamp_to_jst_hhmm(sent_at), from, content)
    }

    /// Format an incoming drawing operation
    pub fn format_drawing(payload: &DrawPayload) -> String {
        match payload.kind.as_str() {
            "clear" => "\n* The board was cleared\n".to_string(),
            "text" => format!(
                "\n* Text placed at ({}, {}): {:?}\n",
                payload.x.unwrap_or(0.0),
                payload.y.unwrap_or(0.0),
                payload.text.as_deref().unwrap_or("")
            ),
            _ => format!(
                "\n* Stroke at ({}, {})\n",
                payload.x.unwrap_or(0.0),
                payload.y.unwrap_or(0.0)
            ),
        }
    }

    /// Format a server-side error report
    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
