//! Server state and connection management.

use std::sync::Arc;

use crate::domain::{EventPusher, SessionRegistry};
use crate::usecase::{
    CreateMeetingUseCase, DisconnectParticipantUseCase, JoinMeetingUseCase,
    ModerateMeetingUseCase, RelayEventUseCase, ValidatePasswordUseCase,
};

/// Shared application state
pub struct AppState {
    /// SessionRegistry（ミーティング状態の抽象化）
    pub registry: Arc<dyn SessionRegistry>,
    /// EventPusher（イベント配信の抽象化）
    pub pusher: Arc<dyn EventPusher>,
    /// CreateMeetingUseCase（ミーティング作成のユースケース）
    pub create_meeting_usecase: Arc<CreateMeetingUseCase>,
    /// JoinMeetingUseCase（ミーティング参加のユースケース）
    pub join_meeting_usecase: Arc<JoinMeetingUseCase>,
    /// ValidatePasswordUseCase（パスワード検証のユースケース）
    pub validate_password_usecase: Arc<ValidatePasswordUseCase>,
    /// RelayEventUseCase（描画・チャット中継のユースケース）
    pub relay_event_usecase: Arc<RelayEventUseCase>,
    /// ModerateMeetingUseCase（ホスト操作のユースケース）
    pub moderate_meeting_usecase: Arc<ModerateMeetingUseCase>,
    /// DisconnectParticipantUseCase（切断処理のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
}
