//! Client execution logic with reconnection support.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use super::{
    domain::should_attempt_reconnect,
    error::ClientError,
    session::{SessionOptions, run_client_session},
    ui::{prompt_for, spawn_readline},
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the client, reconnecting (and rejoining the room) when the connection drops
pub async fn run_client(options: SessionOptions) -> Result<(), ClientError> {
    let prompt = Arc::new(Mutex::new(prompt_for(options.prompt_name(), None)));
    let mut input_rx = spawn_readline(prompt.clone());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Connecting to {} as '{}' (attempt {}/{})",
            options.url,
            options.prompt_name(),
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&options, &mut input_rx, &prompt).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("{}", e);
                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    return Err(e);
                }
                reconnect_count += 1;

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
