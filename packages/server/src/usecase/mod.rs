//! UseCase layer: one struct per meeting operation, built on the
//! `SessionRegistry` and `EventPusher` abstractions.

mod create_meeting;
mod disconnect_participant;
mod error;
mod join_meeting;
mod moderate_meeting;
mod relay_event;
mod validate_password;

pub use create_meeting::CreateMeetingUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{
    CreateMeetingError, JoinMeetingError, ModerateError, RelayError, ValidatePasswordError,
};
pub use join_meeting::JoinMeetingUseCase;
pub use moderate_meeting::ModerateMeetingUseCase;
pub use relay_event::RelayEventUseCase;
pub use validate_password::ValidatePasswordUseCase;
