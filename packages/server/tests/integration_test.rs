//! Integration tests exercising the production router over real sockets.
//!
//! The server is served on an ephemeral port inside the test process;
//! clients speak the actual wire protocol through tokio-tungstenite.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use kokuban_server::infrastructure::{InMemorySessionRegistry, WebSocketEventPusher};
use kokuban_server::ui::{AppState, build_router};
use kokuban_server::usecase::{
    CreateMeetingUseCase, DisconnectParticipantUseCase, JoinMeetingUseCase,
    ModerateMeetingUseCase, RelayEventUseCase, ValidatePasswordUseCase,
};
use kokuban_shared::protocol::{ClientEvent, DrawPayload, ServerEvent};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

/// Serve the production router on an ephemeral port.
async fn spawn_server() -> SocketAddr {
    let registry = Arc::new(InMemorySessionRegistry::new());
    let pusher = Arc::new(WebSocketEventPusher::new());
    let state = Arc::new(AppState {
        registry: registry.clone(),
        pusher: pusher.clone(),
        create_meeting_usecase: Arc::new(CreateMeetingUseCase::new(registry.clone())),
        join_meeting_usecase: Arc::new(JoinMeetingUseCase::new(
            registry.clone(),
            pusher.clone(),
        )),
        validate_password_usecase: Arc::new(ValidatePasswordUseCase::new(registry.clone())),
        relay_event_usecase: Arc::new(RelayEventUseCase::new(registry.clone(), pusher.clone())),
        moderate_meeting_usecase: Arc::new(ModerateMeetingUseCase::new(
            registry.clone(),
            pusher.clone(),
        )),
        disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
            registry,
            pusher,
        )),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    addr
}

/// One connected wire-protocol client.
struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    async fn connect(addr: SocketAddr) -> Self {
        let url = format!("ws://{}/ws", addr);
        let (ws, _) = connect_async(&url).await.expect("Failed to connect");
        Self { ws }
    }

    async fn send(&mut self, event: &ClientEvent) {
        let json = serde_json::to_string(event).unwrap();
        self.ws
            .send(Message::Text(json.into()))
            .await
            .expect("Failed to send event");
    }

    /// Receive the next server event, failing the test on timeout.
    async fn recv(&mut self) -> ServerEvent {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .expect("Timed out waiting for a server event")
                .expect("Connection closed while waiting for a server event")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(&text).expect("Unparsable server event");
            }
        }
    }

    /// Assert that no event arrives within the silence window.
    async fn expect_silence(&mut self) {
        let outcome = tokio::time::timeout(SILENCE_WINDOW, self.ws.next()).await;
        if let Ok(Some(Ok(Message::Text(text)))) = outcome {
            panic!("Expected silence but received: {}", text);
        }
    }

    /// Wait for the server to close this connection.
    async fn expect_closed(&mut self) {
        loop {
            match tokio::time::timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .expect("Timed out waiting for the connection to close")
            {
                None | Some(Ok(Message::Close(_))) => return,
                Some(Ok(_)) => continue,
                Some(Err(_)) => return,
            }
        }
    }
}

/// Create a meeting and return (host client, meeting code).
async fn create_meeting(addr: SocketAddr, creator: &str, password: &str) -> (TestClient, String) {
    let mut client = TestClient::connect(addr).await;
    client
        .send(&ClientEvent::CreateMeeting {
            creator_name: creator.to_string(),
            password: password.to_string(),
        })
        .await;
    let ServerEvent::MeetingCreated { meeting_id } = client.recv().await else {
        panic!("Expected meetingCreated");
    };
    (client, meeting_id)
}

/// Join an existing meeting and return the joined client.
async fn join_meeting(addr: SocketAddr, meeting_id: &str, username: &str) -> TestClient {
    let mut client = TestClient::connect(addr).await;
    client
        .send(&ClientEvent::JoinMeeting {
            meeting_id: meeting_id.to_string(),
            username: username.to_string(),
        })
        .await;
    let ServerEvent::MeetingJoined { .. } = client.recv().await else {
        panic!("Expected meetingJoined");
    };
    client
}

fn stroke(x: f64, y: f64) -> DrawPayload {
    DrawPayload {
        tool: Some("pen".to_string()),
        shape: None,
        color: Some("#000000".to_string()),
        size: Some(3.0),
        x: Some(x),
        y: Some(y),
        text: None,
        is_drawing: Some(true),
        kind: "drawing".to_string(),
    }
}

#[tokio::test]
async fn test_health_endpoint_responds_ok() {
    // テスト項目: ヘルスチェックエンドポイントが 200 を返す
    // given (前提条件):
    let addr = spawn_server().await;

    // when (操作):
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            format!(
                "GET /api/health HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
                addr
            )
            .as_bytes(),
        )
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    // then (期待する結果):
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_create_meeting_returns_readable_code() {
    // テスト項目: ミーティング作成で読み取りやすい6文字コードが返る
    // given (前提条件):
    let addr = spawn_server().await;

    // when (操作):
    let (_host, meeting_id) = create_meeting(addr, "Alice", "").await;

    // then (期待する結果):
    assert_eq!(meeting_id.len(), 6);
    assert!(
        meeting_id
            .bytes()
            .all(|b| b"ABCDEFGHJKMNPQRSTUVWXYZ23456789".contains(&b))
    );
}

#[tokio::test]
async fn test_join_unknown_meeting_reports_room_not_found() {
    // テスト項目: 存在しないミーティングへの参加で roomNotFound が返る
    // given (前提条件):
    let addr = spawn_server().await;
    let mut client = TestClient::connect(addr).await;

    // when (操作):
    client
        .send(&ClientEvent::JoinMeeting {
            meeting_id: "ZZZZZZ".to_string(),
            username: "Bob".to_string(),
        })
        .await;

    // then (期待する結果):
    let ServerEvent::Error { code, .. } = client.recv().await else {
        panic!("Expected error event");
    };
    assert_eq!(
        serde_json::to_value(code).unwrap(),
        serde_json::json!("roomNotFound")
    );
}

#[tokio::test]
async fn test_join_lock_and_presence_scenario() {
    // テスト項目: 参加・ロック・在席者リストの一連の流れが仕様どおり動く
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut alice, meeting_id) = create_meeting(addr, "Alice", "").await;

    // when (操作): Bob joins
    let mut bob = TestClient::connect(addr).await;
    bob.send(&ClientEvent::JoinMeeting {
        meeting_id: meeting_id.clone(),
        username: "Bob".to_string(),
    })
    .await;

    // then (期待する結果): Bob sees the full roster, Alice marked as host
    let ServerEvent::MeetingJoined {
        meeting_id: joined_id,
        participants,
        is_locked,
    } = bob.recv().await
    else {
        panic!("Expected meetingJoined");
    };
    assert_eq!(joined_id, meeting_id);
    assert!(!is_locked);
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0].name, "Alice");
    assert!(participants[0].is_host);
    assert_eq!(participants[0].display_name(), "Alice (Host)");
    assert!(!participants[1].is_host);

    // Alice is told about the arrival
    let ServerEvent::ParticipantJoined {
        username,
        participants,
    } = alice.recv().await
    else {
        panic!("Expected participantJoined");
    };
    assert_eq!(username, "Bob");
    assert_eq!(participants.len(), 2);

    // when (操作): the host locks the board
    alice
        .send(&ClientEvent::ToggleLock {
            meeting_id: meeting_id.clone(),
            is_locked: true,
        })
        .await;

    // then (期待する結果): everyone, host included, learns the new state
    for client in [&mut alice, &mut bob] {
        let ServerEvent::BoardLocked { is_locked } = client.recv().await else {
            panic!("Expected boardLocked");
        };
        assert!(is_locked);
    }

    // when (操作): a non-host tries to lock
    bob.send(&ClientEvent::ToggleLock {
        meeting_id,
        is_locked: false,
    })
    .await;

    // then (期待する結果): rejected privately, nothing reaches the host
    let ServerEvent::Error { code, .. } = bob.recv().await else {
        panic!("Expected error event");
    };
    assert_eq!(
        serde_json::to_value(code).unwrap(),
        serde_json::json!("permissionDenied")
    );
    alice.expect_silence().await;
}

#[tokio::test]
async fn test_draw_relay_excludes_sender_and_other_meetings() {
    // テスト項目: 描画が送信者以外かつ同一ミーティング内にのみ中継される
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut alice, meeting_id) = create_meeting(addr, "Alice", "").await;
    let mut bob = join_meeting(addr, &meeting_id, "Bob").await;
    let ServerEvent::ParticipantJoined { .. } = alice.recv().await else {
        panic!("Expected participantJoined");
    };
    let (mut carol, _other_id) = create_meeting(addr, "Carol", "").await;

    // when (操作):
    bob.send(&ClientEvent::Draw {
        meeting_id: meeting_id.clone(),
        payload: stroke(10.5, 20.5),
    })
    .await;

    // then (期待する結果):
    let ServerEvent::DrawingData { payload } = alice.recv().await else {
        panic!("Expected drawingData");
    };
    assert_eq!(payload.kind, "drawing");
    assert_eq!(payload.x, Some(10.5));
    bob.expect_silence().await;
    carol.expect_silence().await;

    // when (操作): Bob clears the board
    bob.send(&ClientEvent::Clear { meeting_id }).await;

    // then (期待する結果): the clear arrives as board traffic of kind clear
    let ServerEvent::DrawingData { payload } = alice.recv().await else {
        panic!("Expected drawingData");
    };
    assert_eq!(payload.kind, "clear");
}

#[tokio::test]
async fn test_chat_reaches_everyone_in_identical_order() {
    // テスト項目: チャットが全員に同一順序で届く
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut alice, meeting_id) = create_meeting(addr, "Alice", "").await;
    let mut bob = join_meeting(addr, &meeting_id, "Bob").await;
    let ServerEvent::ParticipantJoined { .. } = alice.recv().await else {
        panic!("Expected participantJoined");
    };

    // when (操作):
    alice
        .send(&ClientEvent::ChatMessage {
            meeting_id: meeting_id.clone(),
            username: "Alice".to_string(),
            message: "first".to_string(),
            timestamp: 1,
        })
        .await;
    bob.send(&ClientEvent::ChatMessage {
        meeting_id,
        username: "Bob".to_string(),
        message: "second".to_string(),
        timestamp: 2,
    })
    .await;

    // then (期待する結果): both members, senders included, see the same order
    for client in [&mut alice, &mut bob] {
        let ServerEvent::NewChatMessage { message, .. } = client.recv().await else {
            panic!("Expected newChatMessage");
        };
        assert_eq!(message, "first");
        let ServerEvent::NewChatMessage { message, .. } = client.recv().await else {
            panic!("Expected newChatMessage");
        };
        assert_eq!(message, "second");
    }
}

#[tokio::test]
async fn test_kick_sends_distinct_notices_and_closes_target() {
    // テスト項目: キックで対象と残留者が異なる通知を受け、対象の接続が閉じる
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut alice, meeting_id) = create_meeting(addr, "Alice", "").await;
    let mut bob = join_meeting(addr, &meeting_id, "Bob").await;
    let ServerEvent::ParticipantJoined { .. } = alice.recv().await else {
        panic!("Expected participantJoined");
    };

    // when (操作):
    alice
        .send(&ClientEvent::KickUser {
            meeting_id,
            username: "Bob".to_string(),
        })
        .await;

    // then (期待する結果):
    assert_eq!(bob.recv().await, ServerEvent::YouWereKicked);
    let ServerEvent::UserKicked {
        username,
        participants,
    } = alice.recv().await
    else {
        panic!("Expected userKicked");
    };
    assert_eq!(username, "Bob");
    assert_eq!(participants.len(), 1);
    bob.expect_closed().await;
}

#[tokio::test]
async fn test_disconnect_announces_departure() {
    // テスト項目: 切断時に残留者へ participantLeft が届く
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut alice, meeting_id) = create_meeting(addr, "Alice", "").await;
    let mut bob = join_meeting(addr, &meeting_id, "Bob").await;
    let ServerEvent::ParticipantJoined { .. } = alice.recv().await else {
        panic!("Expected participantJoined");
    };

    // when (操作):
    bob.ws.close(None).await.unwrap();

    // then (期待する結果):
    let ServerEvent::ParticipantLeft {
        username,
        participants,
    } = alice.recv().await
    else {
        panic!("Expected participantLeft");
    };
    assert_eq!(username, "Bob");
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].name, "Alice");
}

#[tokio::test]
async fn test_password_validation_is_private() {
    // テスト項目: パスワード検証の結果が問い合わせ元にのみ届く
    // given (前提条件):
    let addr = spawn_server().await;
    let (mut alice, meeting_id) = create_meeting(addr, "Alice", "s3cret").await;
    let mut prober = TestClient::connect(addr).await;

    // when (操作) / then (期待する結果): wrong then right
    prober
        .send(&ClientEvent::ValidatePassword {
            meeting_id: meeting_id.clone(),
            password: "wrong".to_string(),
        })
        .await;
    assert_eq!(
        prober.recv().await,
        ServerEvent::PasswordValidation { valid: false }
    );

    prober
        .send(&ClientEvent::ValidatePassword {
            meeting_id,
            password: "s3cret".to_string(),
        })
        .await;
    assert_eq!(
        prober.recv().await,
        ServerEvent::PasswordValidation { valid: true }
    );

    // The host observes none of the probing
    alice.expect_silence().await;
}

#[tokio::test]
async fn test_malformed_event_reports_invalid_request() {
    // テスト項目: 不正な JSON イベントで invalidRequest が返る
    // given (前提条件):
    let addr = spawn_server().await;
    let mut client = TestClient::connect(addr).await;

    // when (操作):
    client
        .ws
        .send(Message::Text("not json at all".to_string().into()))
        .await
        .unwrap();

    // then (期待する結果):
    let ServerEvent::Error { code, .. } = client.recv().await else {
        panic!("Expected error event");
    };
    assert_eq!(
        serde_json::to_value(code).unwrap(),
        serde_json::json!("invalidRequest")
    );
}
