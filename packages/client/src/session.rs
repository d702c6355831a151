//! WebSocket client session management.
//!
//! One session is one websocket connection: join the configured room, print relay events,
//! and turn prompt lines into protocol frames until the input closes or the connection drops.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::Message},
};

use deai_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use deai_shared::time::get_jst_timestamp;

use crate::{
    command::{Command, parse_command},
    error::ClientError,
};

use super::{
    formatter::MessageFormatter,
    ui::{SharedPrompt, prompt_for, redisplay_prompt, set_prompt},
};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// What the user asked for on the command line
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub url: String,
    pub room: String,
    /// `None` lets the relay assign a `Guest_` label
    pub name: Option<String>,
}

impl SessionOptions {
    /// Label shown in the prompt
    pub fn prompt_name(&self) -> &str {
        self.name.as_deref().unwrap_or("me")
    }
}

/// Run one client session
///
/// Returns `Ok(())` when the user quits or the input closes, an error when the connection
/// could not be established or was lost.
pub async fn run_client_session(
    options: &SessionOptions,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    prompt: &SharedPrompt,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(&options.url).await.map_err(|e| match e {
        tungstenite::Error::Http(response) if response.status().as_u16() == 404 => {
            ClientError::NamespaceNotFound(options.url.clone())
        }
        e => ClientError::ConnectionError(e.to_string()),
    })?;
    tracing::info!("Connected to relay at {}", options.url);

    let (mut write, mut read) = ws_stream.split();

    let join = Command::Join(options.room.clone());
    if let Some(message) = join.to_message(None, options.name.as_deref()) {
        send_message(&mut write, &message).await?;
    }
    set_prompt(prompt, prompt_for(options.prompt_name(), Some(&options.room)));

    // Spawn a task to handle incoming events
    let read_prompt = prompt.clone();
    let mut read_task = tokio::spawn(async move {
        let mut my_id: Option<String> = None;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(event) => {
                            if let ServerMessage::Connected { id, .. } = &event {
                                my_id = Some(id.clone());
                            }
                            MessageFormatter::format(&event, my_id.as_deref())
                        }
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&read_prompt);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&read_prompt);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Relay closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // If either side completes, the session is over
    tokio::select! {
        _ = &mut read_task => {
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
        result = input_loop(&mut write, input_rx, options, prompt) => {
            read_task.abort();
            let _ = write.close().await;
            result
        }
    }
}

/// Turns prompt lines into frames until `/quit` or the input closes.
async fn input_loop(
    write: &mut WsSink,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    options: &SessionOptions,
    prompt: &SharedPrompt,
) -> Result<(), ClientError> {
    let mut current_room = Some(options.room.clone());

    while let Some(line) = input_rx.recv().await {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let Some(message) = command.to_message(current_room.as_deref(), options.name.as_deref()) else {
            println!("You are not in a room (use /join <room>)");
            continue;
        };
        send_message(write, &message).await?;
        print!("{}", MessageFormatter::format_sent_confirmation(message.name(), get_jst_timestamp()));

        match command {
            Command::Join(room) => current_room = Some(room),
            Command::Leave => current_room = None,
            _ => {}
        }
        set_prompt(prompt, prompt_for(options.prompt_name(), current_room.as_deref()));
    }

    Ok(())
}

async fn send_message(write: &mut WsSink, message: &ClientMessage) -> Result<(), ClientError> {
    let json = serde_json::to_string(message)
        .map_err(|e| ClientError::ConnectionError(format!("failed to encode frame: {}", e)))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
