//! Client sessions against an in-process relay.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use deai_client::{
    error::ClientError,
    session::{SessionOptions, run_client_session},
};
use deai_server::{domain::Namespace, ui::Server};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{net::TcpStream, sync::mpsc, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

type Observer = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_relay() -> (String, tokio::task::JoinHandle<()>) {
    let namespaces = vec![Namespace::new("video".to_string()).unwrap()];
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        Server::in_memory(namespaces).serve(listener).await.unwrap();
    });
    (format!("ws://{}", addr), handle)
}

async fn recv_event(ws: &mut Observer, event: &str) -> Value {
    loop {
        let message = timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("timed out waiting for event")
            .expect("stream closed")
            .expect("websocket error");
        if let Message::Text(text) = message {
            let value: Value = serde_json::from_str(text.as_str()).unwrap();
            if value["event"] == event {
                return value;
            }
        }
    }
}

async fn observer_in_room(base: &str, room: &str) -> Observer {
    let (mut ws, _) = connect_async(format!("{}/ws/video", base)).await.unwrap();
    recv_event(&mut ws, "connected").await;
    let join = json!({"event": "join", "room": room, "name": "observer"});
    ws.send(Message::Text(join.to_string().into())).await.unwrap();
    recv_event(&mut ws, "joined-room").await;
    ws
}

#[tokio::test]
async fn test_unknown_namespace_is_reported() {
    // テスト項目: 存在しない namespace への接続は NamespaceNotFound になる
    // given (前提条件):
    let (base, relay) = start_relay().await;
    let options = SessionOptions {
        url: format!("{}/ws/nope", base),
        room: "r1".to_string(),
        name: Some("alice".to_string()),
    };
    let (_input_tx, mut input_rx) = mpsc::unbounded_channel();
    let prompt = Arc::new(Mutex::new(String::new()));

    // when (操作):
    let result = run_client_session(&options, &mut input_rx, &prompt).await;

    // then (期待する結果):
    assert!(matches!(result, Err(ClientError::NamespaceNotFound(_))));
    relay.abort();
}

#[tokio::test]
async fn test_session_joins_sends_subtitle_and_quits() {
    // テスト項目: セッションがルームに参加し、字幕を送信し、/quit で正常終了する
    // given (前提条件):
    let (base, relay) = start_relay().await;
    let mut observer = observer_in_room(&base, "r1").await;
    let options = SessionOptions {
        url: format!("{}/ws/video", base),
        room: "r1".to_string(),
        name: Some("alice".to_string()),
    };
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    let prompt = Arc::new(Mutex::new(String::new()));
    let session = tokio::spawn(async move {
        run_client_session(&options, &mut input_rx, &prompt).await
    });

    // when (操作):
    let joined = recv_event(&mut observer, "user-joined").await;
    input_tx.send("hello".to_string()).unwrap();
    let subtitle = recv_event(&mut observer, "new-subtitle").await;
    input_tx.send("/quit".to_string()).unwrap();
    let result = timeout(RECV_TIMEOUT, session).await.unwrap().unwrap();
    let left = recv_event(&mut observer, "user-left").await;

    // then (期待する結果):
    assert_eq!(joined["name"], "alice");
    assert_eq!(subtitle["text"], "hello");
    assert_eq!(subtitle["name"], "alice");
    assert_eq!(subtitle["sender_id"], joined["id"]);
    assert_eq!(left["id"], joined["id"]);
    assert!(result.is_ok());
    relay.abort();
}

#[tokio::test]
async fn test_closed_input_ends_session() {
    // テスト項目: 入力が閉じられるとセッションは正常終了する
    // given (前提条件):
    let (base, relay) = start_relay().await;
    let options = SessionOptions {
        url: format!("{}/ws/video", base),
        room: "r1".to_string(),
        name: None,
    };
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = Arc::new(Mutex::new(String::new()));

    // when (操作):
    drop(input_tx);
    let result = timeout(
        RECV_TIMEOUT,
        run_client_session(&options, &mut input_rx, &prompt),
    )
    .await
    .unwrap();

    // then (期待する結果):
    assert!(result.is_ok());
    relay.abort();
}
