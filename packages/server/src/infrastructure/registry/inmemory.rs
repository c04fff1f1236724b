//! In-memory session registry.
//!
//! One `Mutex` over the whole table is the single serialization point for
//! registry mutations: per-meeting transitions are atomic with respect to
//! each other, and each transition computes its broadcast target set before
//! the lock is released.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Departure, Eviction, LockUpdate, Meeting, MeetingCode, MeetingView,
    Participant, ParticipantName, PeerSet, RegistryError, SessionRegistry,
};

/// Binding of one connection to its meeting and participant record.
///
/// Kept alongside membership so disconnect resolution is an O(1) lookup,
/// never a membership scan.
#[derive(Debug, Clone)]
struct Binding {
    code: MeetingCode,
    name: ParticipantName,
}

#[derive(Default)]
struct RegistryState {
    meetings: HashMap<MeetingCode, Meeting>,
    bindings: HashMap<ConnectionId, Binding>,
}

/// In-memory implementation of the session registry.
pub struct InMemorySessionRegistry {
    state: Mutex<RegistryState>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn contains_code(&self, code: &MeetingCode) -> bool {
        let state = self.state.lock().await;
        state.meetings.contains_key(code)
    }

    async fn create_meeting(
        &self,
        creator: ConnectionId,
        meeting: Meeting,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.lock().await;

        if state.bindings.contains_key(&creator) {
            return Err(RegistryError::AlreadyInMeeting);
        }
        if state.meetings.contains_key(&meeting.code) {
            return Err(RegistryError::DuplicateMeetingCode(
                meeting.code.as_str().to_string(),
            ));
        }
        let Some(host) = meeting.participants.iter().find(|p| p.connection == creator) else {
            return Err(RegistryError::NotInMeeting);
        };

        state.bindings.insert(
            creator,
            Binding {
                code: meeting.code.clone(),
                name: host.name.clone(),
            },
        );
        state.meetings.insert(meeting.code.clone(), meeting);
        Ok(())
    }

    async fn join_meeting(
        &self,
        connection: ConnectionId,
        code: &MeetingCode,
        participant: Participant,
    ) -> Result<MeetingView, RegistryError> {
        let mut state = self.state.lock().await;

        if state.bindings.contains_key(&connection) {
            return Err(RegistryError::AlreadyInMeeting);
        }
        let meeting = state
            .meetings
            .get_mut(code)
            .ok_or_else(|| RegistryError::MeetingNotFound(code.as_str().to_string()))?;

        let name = participant.name.clone();
        // Membership and binding change together or not at all.
        meeting.add_participant(participant)?;
        let view = MeetingView {
            participants: meeting.participants.clone(),
            is_locked: meeting.is_locked,
            others: meeting
                .participants
                .iter()
                .filter(|p| p.connection != connection)
                .map(|p| p.connection)
                .collect(),
        };
        state.bindings.insert(
            connection,
            Binding {
                code: code.clone(),
                name,
            },
        );
        Ok(view)
    }

    async fn validate_password(
        &self,
        code: &MeetingCode,
        supplied: &str,
    ) -> Result<bool, RegistryError> {
        let state = self.state.lock().await;
        let meeting = state
            .meetings
            .get(code)
            .ok_or_else(|| RegistryError::MeetingNotFound(code.as_str().to_string()))?;
        Ok(meeting.validate_password(supplied))
    }

    async fn peers(&self, connection: ConnectionId) -> Result<PeerSet, RegistryError> {
        let state = self.state.lock().await;
        let binding = state
            .bindings
            .get(&connection)
            .ok_or(RegistryError::NotInMeeting)?;
        let meeting = state
            .meetings
            .get(&binding.code)
            .ok_or(RegistryError::NotInMeeting)?;

        let all = meeting.member_connections();
        let others = all.iter().copied().filter(|c| *c != connection).collect();
        Ok(PeerSet { others, all })
    }

    async fn set_locked(
        &self,
        requester: ConnectionId,
        locked: bool,
    ) -> Result<LockUpdate, RegistryError> {
        let mut state = self.state.lock().await;
        let code = state
            .bindings
            .get(&requester)
            .map(|b| b.code.clone())
            .ok_or(RegistryError::NotInMeeting)?;
        let meeting = state
            .meetings
            .get_mut(&code)
            .ok_or(RegistryError::NotInMeeting)?;

        if !meeting.is_host_connection(requester) {
            return Err(RegistryError::PermissionDenied);
        }
        meeting.is_locked = locked;
        Ok(LockUpdate {
            is_locked: locked,
            members: meeting.member_connections(),
        })
    }

    async fn evict(
        &self,
        requester: ConnectionId,
        target: &ParticipantName,
    ) -> Result<Eviction, RegistryError> {
        let mut state = self.state.lock().await;
        let code = state
            .bindings
            .get(&requester)
            .map(|b| b.code.clone())
            .ok_or(RegistryError::NotInMeeting)?;
        let meeting = state
            .meetings
            .get_mut(&code)
            .ok_or(RegistryError::NotInMeeting)?;

        if !meeting.is_host_connection(requester) {
            return Err(RegistryError::PermissionDenied);
        }
        let removed = meeting
            .remove_by_name(target)
            .ok_or_else(|| RegistryError::ParticipantNotFound(target.as_str().to_string()))?;

        let eviction = Eviction {
            remaining: meeting.member_connections(),
            participants: meeting.participants.clone(),
            target: removed.clone(),
        };
        if meeting.is_empty() {
            state.meetings.remove(&code);
        }
        state.bindings.remove(&removed.connection);
        Ok(eviction)
    }

    async fn remove_connection(&self, connection: ConnectionId) -> Option<Departure> {
        let mut state = self.state.lock().await;
        let binding = state.bindings.remove(&connection)?;

        let Some(meeting) = state.meetings.get_mut(&binding.code) else {
            tracing::warn!(
                "Binding for connection '{}' referenced dead meeting '{}'",
                connection,
                binding.code
            );
            return None;
        };
        let participant = meeting.remove_by_name(&binding.name)?;

        let meeting_destroyed = meeting.is_empty();
        let departure = Departure {
            meeting_code: binding.code.clone(),
            participant,
            remaining: meeting.member_connections(),
            participants: meeting.participants.clone(),
            meeting_destroyed,
        };
        if meeting_destroyed {
            state.meetings.remove(&binding.code);
        }
        Some(departure)
    }

    async fn binding(
        &self,
        connection: ConnectionId,
    ) -> Option<(MeetingCode, ParticipantName)> {
        let state = self.state.lock().await;
        state
            .bindings
            .get(&connection)
            .map(|b| (b.code.clone(), b.name.clone()))
    }

    async fn meetings(&self) -> Vec<Meeting> {
        let state = self.state.lock().await;
        state.meetings.values().cloned().collect()
    }

    async fn meeting(&self, code: &MeetingCode) -> Option<Meeting> {
        let state = self.state.lock().await;
        state.meetings.get(code).cloned()
    }
}
