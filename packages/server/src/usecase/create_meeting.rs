//! UseCase: meeting creation.
//!
//! Generates a short code from the unambiguous charset and retries until it
//! does not collide with a live meeting. The creator becomes the sole
//! participant and host, and their connection is bound to the new meeting.

use std::sync::Arc;

use kokuban_shared::time::get_jst_timestamp;

use crate::domain::{
    ConnectionId, Meeting, MeetingCode, MeetingCodeFactory, ParticipantName, RegistryError,
    Secret, SessionRegistry, Timestamp,
};

use super::error::CreateMeetingError;

/// Upper bound on collision retries. With a 31^6 code space this is never
/// reached in practice; it only guards against a pathological registry.
const MAX_CODE_ATTEMPTS: usize = 16;

/// Meeting creation usecase.
pub struct CreateMeetingUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl CreateMeetingUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Create a meeting for the given connection.
    ///
    /// # Arguments
    ///
    /// * `creator` - The creating connection; becomes the recorded host.
    /// * `creator_name` - Display name of the creator.
    /// * `password` - Shared secret; empty string means an open meeting.
    ///
    /// # Returns
    ///
    /// * `Ok(MeetingCode)` - The generated public code.
    /// * `Err(CreateMeetingError)` - Creation failed; nothing was registered.
    pub async fn execute(
        &self,
        creator: ConnectionId,
        creator_name: &str,
        password: String,
    ) -> Result<MeetingCode, CreateMeetingError> {
        let name = ParticipantName::new(creator_name.to_string())
            .map_err(|_| CreateMeetingError::InvalidName)?;
        let created_at = Timestamp::new(get_jst_timestamp());
        let secret = Secret::new(password);

        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = MeetingCodeFactory::generate();
            let meeting = Meeting::with_host(
                code.clone(),
                secret.clone(),
                name.clone(),
                creator,
                created_at,
            );
            match self.registry.create_meeting(creator, meeting).await {
                Ok(()) => return Ok(code),
                // Collision with a live meeting: retried transparently,
                // never surfaced to the client.
                Err(RegistryError::DuplicateMeetingCode(_)) => continue,
                Err(RegistryError::AlreadyInMeeting) => {
                    return Err(CreateMeetingError::AlreadyInMeeting);
                }
                Err(e) => {
                    tracing::error!("Unexpected registry error during create: {}", e);
                    return Err(CreateMeetingError::CodeSpaceExhausted);
                }
            }
        }
        Err(CreateMeetingError::CodeSpaceExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MEETING_CODE_CHARSET, MEETING_CODE_LEN};
    use crate::infrastructure::InMemorySessionRegistry;

    fn create_usecase() -> (CreateMeetingUseCase, Arc<InMemorySessionRegistry>) {
        let registry = Arc::new(InMemorySessionRegistry::new());
        (CreateMeetingUseCase::new(registry.clone()), registry)
    }

    #[tokio::test]
    async fn test_create_meeting_returns_valid_code_and_registers_host() {
        // テスト項目: 作成が成功し、コード形式とホスト登録が正しい
        // given (前提条件):
        let (usecase, registry) = create_usecase();
        let conn = ConnectionId::generate();

        // when (操作):
        let code = usecase.execute(conn, "Alice", "".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(code.as_str().len(), MEETING_CODE_LEN);
        assert!(
            code.as_str()
                .bytes()
                .all(|b| MEETING_CODE_CHARSET.contains(&b))
        );
        let meeting = registry.meeting(&code).await.unwrap();
        assert_eq!(meeting.participants.len(), 1);
        assert!(meeting.participants[0].is_host);
        assert!(!meeting.is_locked);
        assert_eq!(
            registry.binding(conn).await.unwrap().1.as_str(),
            "Alice"
        );
    }

    #[tokio::test]
    async fn test_created_codes_are_unique_among_live_meetings() {
        // テスト項目: 連続作成されたコードが互いに一意である
        // given (前提条件):
        let (usecase, _registry) = create_usecase();

        // when (操作):
        let mut codes = Vec::new();
        for _ in 0..50 {
            let conn = ConnectionId::generate();
            codes.push(usecase.execute(conn, "Host", "".to_string()).await.unwrap());
        }

        // then (期待する結果):
        let mut deduped = codes.clone();
        deduped.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        deduped.dedup();
        assert_eq!(deduped.len(), codes.len());
    }

    #[tokio::test]
    async fn test_create_with_invalid_name_fails() {
        // テスト項目: 空の作成者名で作成が失敗する
        // given (前提条件):
        let (usecase, registry) = create_usecase();
        let conn = ConnectionId::generate();

        // when (操作):
        let result = usecase.execute(conn, "   ", "".to_string()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), CreateMeetingError::InvalidName);
        assert!(registry.meetings().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_while_already_in_meeting_fails() {
        // テスト項目: 既にミーティングに参加中の接続による作成が拒否される
        // given (前提条件):
        let (usecase, _registry) = create_usecase();
        let conn = ConnectionId::generate();
        usecase.execute(conn, "Alice", "".to_string()).await.unwrap();

        // when (操作):
        let result = usecase.execute(conn, "Alice", "".to_string()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), CreateMeetingError::AlreadyInMeeting);
    }
}
