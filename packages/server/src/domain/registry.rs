//! Session registry interface.
//!
//! The registry owns the table of live meetings and the connection →
//! (meeting, participant) binding table, maintained transactionally with
//! membership. Every method is one atomic state transition that also
//! returns the connection sets its broadcast needs, so a mutation is never
//! separated from the information required to announce it.

use async_trait::async_trait;

use super::entity::{Meeting, Participant};
use super::error::RegistryError;
use super::value_object::{ConnectionId, MeetingCode, ParticipantName};

/// Result of a successful join: what the joiner is told, plus who else to
/// notify.
#[derive(Debug, Clone)]
pub struct MeetingView {
    pub participants: Vec<Participant>,
    pub is_locked: bool,
    /// Everyone already in the meeting, excluding the joiner.
    pub others: Vec<ConnectionId>,
}

/// Connection sets for relay fan-out.
#[derive(Debug, Clone)]
pub struct PeerSet {
    /// Everyone in the sender's meeting, excluding the sender.
    pub others: Vec<ConnectionId>,
    /// Everyone in the sender's meeting, including the sender.
    pub all: Vec<ConnectionId>,
}

/// Result of a lock toggle.
#[derive(Debug, Clone)]
pub struct LockUpdate {
    pub is_locked: bool,
    /// Entire meeting, including the requester.
    pub members: Vec<ConnectionId>,
}

/// Result of a host eviction.
#[derive(Debug, Clone)]
pub struct Eviction {
    /// The removed participant record (its connection receives the
    /// distinguishable "you were evicted" notice).
    pub target: Participant,
    /// Everyone remaining in the meeting, including the requester.
    pub remaining: Vec<ConnectionId>,
    pub participants: Vec<Participant>,
}

/// Result of a connection leaving its meeting (disconnect or kick cleanup).
#[derive(Debug, Clone)]
pub struct Departure {
    pub meeting_code: MeetingCode,
    pub participant: Participant,
    /// Everyone remaining in the meeting.
    pub remaining: Vec<ConnectionId>,
    pub participants: Vec<Participant>,
    /// True when the departure emptied the meeting and it was destroyed.
    pub meeting_destroyed: bool,
}

/// The in-memory table of meetings and connection bindings.
///
/// A connection belongs to at most one meeting at a time; the meeting's
/// participant list and the binding table must always agree.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Whether a meeting with this code is currently live.
    async fn contains_code(&self, code: &MeetingCode) -> bool;

    /// Insert a freshly created meeting and bind its creator connection.
    /// Fails with `DuplicateMeetingCode` if the code is already live.
    async fn create_meeting(
        &self,
        creator: ConnectionId,
        meeting: Meeting,
    ) -> Result<(), RegistryError>;

    /// Add a participant to a meeting and bind the connection. Either both
    /// happen or neither does (no partial registration).
    async fn join_meeting(
        &self,
        connection: ConnectionId,
        code: &MeetingCode,
        participant: Participant,
    ) -> Result<MeetingView, RegistryError>;

    /// Exact-equality password check. Read-only; never broadcast.
    async fn validate_password(
        &self,
        code: &MeetingCode,
        supplied: &str,
    ) -> Result<bool, RegistryError>;

    /// Resolve the sender's meeting from its binding and return the relay
    /// target sets.
    async fn peers(&self, connection: ConnectionId) -> Result<PeerSet, RegistryError>;

    /// Set the lock flag. Host-only, enforced against the recorded host
    /// connection.
    async fn set_locked(
        &self,
        requester: ConnectionId,
        locked: bool,
    ) -> Result<LockUpdate, RegistryError>;

    /// Remove the named participant from the requester's meeting and drop
    /// the target's binding. Host-only.
    async fn evict(
        &self,
        requester: ConnectionId,
        target: &ParticipantName,
    ) -> Result<Eviction, RegistryError>;

    /// Remove a connection's participant and binding in O(1) resolution.
    /// Returns `None` when the connection was not bound (idempotent, e.g.
    /// disconnect after kick). Destroys the meeting when it empties.
    async fn remove_connection(&self, connection: ConnectionId) -> Option<Departure>;

    /// Current binding of a connection, if any.
    async fn binding(
        &self,
        connection: ConnectionId,
    ) -> Option<(MeetingCode, ParticipantName)>;

    /// Snapshot of all live meetings (observation endpoints).
    async fn meetings(&self) -> Vec<Meeting>;

    /// Snapshot of one meeting, if live.
    async fn meeting(&self, code: &MeetingCode) -> Option<Meeting>;
}
