//! UseCase: pre-join password validation.
//!
//! Read-only exact-equality check against the meeting secret. The result is
//! reported only to the asking connection; nothing is broadcast and nothing
//! about the meeting state changes.

use std::sync::Arc;

use crate::domain::{MeetingCode, RegistryError, SessionRegistry};

use super::error::ValidatePasswordError;

/// Password validation usecase.
pub struct ValidatePasswordUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl ValidatePasswordUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Check `supplied` against the secret of the meeting named by `code`.
    ///
    /// An open meeting (empty secret) accepts any supplied value.
    pub async fn execute(
        &self,
        code: &str,
        supplied: &str,
    ) -> Result<bool, ValidatePasswordError> {
        let code = MeetingCode::new(code.to_string())
            .map_err(|_| ValidatePasswordError::MeetingNotFound(code.to_string()))?;
        match self.registry.validate_password(&code, supplied).await {
            Ok(valid) => Ok(valid),
            Err(RegistryError::MeetingNotFound(c)) => {
                Err(ValidatePasswordError::MeetingNotFound(c))
            }
            Err(e) => {
                tracing::error!("Unexpected registry error during validation: {}", e);
                Err(ValidatePasswordError::MeetingNotFound(
                    code.as_str().to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, Meeting, ParticipantName, Secret, Timestamp};
    use crate::infrastructure::InMemorySessionRegistry;

    async fn seed_meeting(registry: &InMemorySessionRegistry, code: &str, password: &str) {
        let host = ConnectionId::generate();
        let meeting = Meeting::with_host(
            MeetingCode::new(code.to_string()).unwrap(),
            Secret::new(password.to_string()),
            ParticipantName::new("Alice".to_string()).unwrap(),
            host,
            Timestamp::new(1000),
        );
        registry.create_meeting(host, meeting).await.unwrap();
    }

    #[tokio::test]
    async fn test_correct_password_validates() {
        // テスト項目: 正しいパスワードが受理される
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        seed_meeting(&registry, "ABCDEF", "s3cret").await;
        let usecase = ValidatePasswordUseCase::new(registry);

        // when (操作):
        let valid = usecase.execute("ABCDEF", "s3cret").await.unwrap();

        // then (期待する結果):
        assert!(valid);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        // テスト項目: 誤ったパスワードが拒否される
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        seed_meeting(&registry, "ABCDEF", "s3cret").await;
        let usecase = ValidatePasswordUseCase::new(registry);

        // when (操作):
        let valid = usecase.execute("ABCDEF", "wrong").await.unwrap();

        // then (期待する結果):
        assert!(!valid);
    }

    #[tokio::test]
    async fn test_open_meeting_accepts_any_password() {
        // テスト項目: パスワードなしのミーティングが任意の入力を受理する
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        seed_meeting(&registry, "ABCDEF", "").await;
        let usecase = ValidatePasswordUseCase::new(registry);

        // when (操作):
        let with_value = usecase.execute("ABCDEF", "anything").await.unwrap();
        let without_value = usecase.execute("ABCDEF", "").await.unwrap();

        // then (期待する結果):
        assert!(with_value);
        assert!(without_value);
    }

    #[tokio::test]
    async fn test_unknown_meeting_fails() {
        // テスト項目: 存在しないミーティングの検証が失敗する
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        let usecase = ValidatePasswordUseCase::new(registry);

        // when (操作):
        let result = usecase.execute("ZZZZZZ", "s3cret").await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValidatePasswordError::MeetingNotFound("ZZZZZZ".to_string())
        );
    }
}
