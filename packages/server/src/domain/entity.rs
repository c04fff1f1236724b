//! Domain entities: meetings and their participants.

use super::error::RegistryError;
use super::value_object::{ConnectionId, MeetingCode, ParticipantName, Secret, Timestamp};

/// A named member of a meeting, bound to exactly one live connection.
///
/// The host role is an explicit flag on the record, granted exactly once at
/// meeting creation and never transferred. The display-string convention
/// (`"Alice (Host)"`) is a client-side rendering concern.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: ParticipantName,
    pub is_host: bool,
    pub connection: ConnectionId,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(name: ParticipantName, connection: ConnectionId, joined_at: Timestamp) -> Self {
        Self {
            name,
            is_host: false,
            connection,
            joined_at,
        }
    }

    pub fn host(name: ParticipantName, connection: ConnectionId, joined_at: Timestamp) -> Self {
        Self {
            name,
            is_host: true,
            connection,
            joined_at,
        }
    }
}

/// An isolated collaboration session identified by a short code.
///
/// Participant order is insertion order; names are unique within a meeting.
#[derive(Debug, Clone)]
pub struct Meeting {
    pub code: MeetingCode,
    secret: Secret,
    pub participants: Vec<Participant>,
    pub is_locked: bool,
    pub created_at: Timestamp,
}

impl Meeting {
    /// Create a meeting with its creator as the sole (host) participant.
    pub fn with_host(
        code: MeetingCode,
        secret: Secret,
        host_name: ParticipantName,
        host_connection: ConnectionId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            code,
            secret,
            participants: vec![Participant::host(host_name, host_connection, created_at)],
            is_locked: false,
            created_at,
        }
    }

    /// Exact-equality password check; open meetings always validate.
    pub fn validate_password(&self, supplied: &str) -> bool {
        self.secret.matches(supplied)
    }

    pub fn contains_name(&self, name: &ParticipantName) -> bool {
        self.participants.iter().any(|p| &p.name == name)
    }

    /// Add a participant, preserving insertion order.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), RegistryError> {
        if self.contains_name(&participant.name) {
            return Err(RegistryError::DuplicateParticipant(
                participant.name.as_str().to_string(),
            ));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Remove a participant by name. Returns the removed record, if any.
    pub fn remove_by_name(&mut self, name: &ParticipantName) -> Option<Participant> {
        let idx = self.participants.iter().position(|p| &p.name == name)?;
        Some(self.participants.remove(idx))
    }

    /// Whether the given connection is the recorded host of this meeting.
    ///
    /// A meeting whose host has left is host-less; nobody passes this check
    /// afterwards (no re-election).
    pub fn is_host_connection(&self, connection: ConnectionId) -> bool {
        self.participants
            .iter()
            .any(|p| p.is_host && p.connection == connection)
    }

    pub fn member_connections(&self) -> Vec<ConnectionId> {
        self.participants.iter().map(|p| p.connection).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
