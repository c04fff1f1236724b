//! UseCase: joining an existing meeting.
//!
//! Adds the participant to the meeting, then announces the arrival to every
//! other member. The joiner's own acknowledgement is pushed by the caller,
//! so a failed join never leaks a partial announcement.

use std::sync::Arc;

use kokuban_shared::protocol::{ParticipantInfo, ServerEvent};
use kokuban_shared::time::get_jst_timestamp;

use crate::domain::{
    ConnectionId, EventPusher, MeetingCode, MeetingView, Participant, ParticipantName,
    SessionRegistry, Timestamp,
};

use super::error::JoinMeetingError;

/// Meeting join usecase.
pub struct JoinMeetingUseCase {
    registry: Arc<dyn SessionRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl JoinMeetingUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Join `connection` to the meeting identified by `code`.
    ///
    /// On success the other members have already received the
    /// `participantJoined` announcement; the returned view carries what the
    /// joiner itself must be told.
    pub async fn execute(
        &self,
        connection: ConnectionId,
        code: &str,
        username: &str,
    ) -> Result<(MeetingCode, MeetingView), JoinMeetingError> {
        // A syntactically invalid code can never name a live meeting.
        let code = MeetingCode::new(code.to_string())
            .map_err(|_| JoinMeetingError::MeetingNotFound(code.to_string()))?;
        let name = ParticipantName::new(username.to_string())
            .map_err(|_| JoinMeetingError::InvalidName)?;

        let participant = Participant::new(name, connection, Timestamp::new(get_jst_timestamp()));
        let view = self.registry.join_meeting(connection, &code, participant).await?;

        let announcement = ServerEvent::ParticipantJoined {
            username: username.to_string(),
            participants: view.participants.iter().map(ParticipantInfo::from).collect(),
        };
        let content = serde_json::to_string(&announcement).unwrap();
        self.pusher.broadcast(&view.others, &content).await;

        Ok((code, view))
    }
}
