//! Helpers shared by the integration tests: an in-process relay on an ephemeral port and a
//! small websocket test client.

#![allow(dead_code)]

use std::time::Duration;

use deai_server::{domain::Namespace, ui::Server};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::{net::TcpStream, task::JoinHandle, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);
pub const SILENCE: Duration = Duration::from_millis(200);

/// Relay server running inside the test runtime
pub struct TestServer {
    addr: std::net::SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a relay serving `default` and `video` on an ephemeral port
    pub async fn start() -> Self {
        let namespaces = ["default", "video"]
            .map(|name| Namespace::new(name.to_string()).unwrap())
            .to_vec();
        let router = Server::in_memory(namespaces).router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self { addr, handle }
    }

    /// WebSocket URL, `path` like `/ws` or `/ws/video`
    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let response = reqwest::get(self.http_url(path)).await.unwrap();
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    /// Poll `/api/namespaces` until `namespace` reports `connections` live connections
    pub async fn wait_for_connections(&self, namespace: &str, connections: u64) {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let (_, body) = self.get_json("/api/namespaces").await;
            let current = body
                .as_array()
                .and_then(|list| list.iter().find(|ns| ns["name"] == namespace))
                .and_then(|ns| ns["connections"].as_u64());
            if current == Some(connections) {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "namespace '{namespace}' never reached {connections} connections (last: {current:?})"
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// WebSocket client speaking the relay protocol
pub struct TestClient {
    pub id: String,
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the `connected` handshake
    pub async fn connect(url: &str) -> Self {
        let (ws, _) = connect_async(url).await.unwrap();
        let mut client = Self {
            id: String::new(),
            ws,
        };
        let connected = client.recv_event("connected").await;
        client.id = connected["id"].as_str().unwrap().to_string();
        client
    }

    pub async fn send(&mut self, frame: Value) {
        self.ws
            .send(Message::text(frame.to_string()))
            .await
            .unwrap();
    }

    pub async fn send_raw(&mut self, message: Message) {
        self.ws.send(message).await.unwrap();
    }

    pub async fn join(&mut self, room: &str, name: &str) {
        self.send(serde_json::json!({"event": "join", "room": room, "name": name}))
            .await;
    }

    /// Next JSON frame, panicking after `RECV_TIMEOUT`
    pub async fn recv(&mut self) -> Value {
        loop {
            let message = timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .expect("timed out waiting for a frame")
                .expect("connection closed")
                .unwrap();
            if let Message::Text(text) = message {
                return serde_json::from_str(text.as_str()).unwrap();
            }
        }
    }

    /// Next frame, asserting its event name
    pub async fn recv_event(&mut self, event: &str) -> Value {
        let frame = self.recv().await;
        assert_eq!(frame["event"], event, "unexpected frame: {frame}");
        frame
    }

    /// Assert that no frame arrives for a short while
    pub async fn assert_silent(&mut self) {
        if let Ok(Some(Ok(Message::Text(text)))) = timeout(SILENCE, self.ws.next()).await {
            panic!("expected no frame, got {}", text.as_str());
        }
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}
