//! Domain layer: value objects, entities, and the interfaces the rest of the
//! server depends on.

mod entity;
mod error;
mod pusher;
mod registry;
mod value_object;

pub use entity::{Meeting, Participant};
pub use error::RegistryError;
pub use pusher::{EventPushError, EventPusher, PusherChannel};
#[cfg(test)]
pub use pusher::MockEventPusher;
pub use registry::{
    Departure, Eviction, LockUpdate, MeetingView, PeerSet, SessionRegistry,
};
pub use value_object::{
    ConnectionId, MEETING_CODE_CHARSET, MEETING_CODE_LEN, MeetingCode, MeetingCodeFactory,
    ParticipantName, Secret, Timestamp, ValueObjectError,
};
