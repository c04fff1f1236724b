//! DTO conversion between domain entities and the wire protocol / HTTP API.

pub mod http;

use kokuban_shared::protocol::ParticipantInfo;

use crate::domain::Participant;

impl From<&Participant> for ParticipantInfo {
    fn from(p: &Participant) -> Self {
        Self {
            name: p.name.as_str().to_string(),
            is_host: p.is_host,
        }
    }
}

/// Convert a participant list to its wire representation, preserving order.
pub fn participant_infos(participants: &[Participant]) -> Vec<ParticipantInfo> {
    participants.iter().map(ParticipantInfo::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, ParticipantName, Timestamp};

    #[test]
    fn test_participant_infos_preserve_order_and_host_flag() {
        // テスト項目: 参加者リストの変換が順序とホストフラグを保持する
        // given (前提条件):
        let participants = vec![
            Participant::host(
                ParticipantName::new("Alice".to_string()).unwrap(),
                ConnectionId::generate(),
                Timestamp::new(1000),
            ),
            Participant::new(
                ParticipantName::new("Bob".to_string()).unwrap(),
                ConnectionId::generate(),
                Timestamp::new(2000),
            ),
        ];

        // when (操作):
        let infos = participant_infos(&participants);

        // then (期待する結果):
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].name, "Alice");
        assert!(infos[0].is_host);
        assert_eq!(infos[1].name, "Bob");
        assert!(!infos[1].is_host);
    }
}
