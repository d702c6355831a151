//! Interactive relay peer with reconnection support.
//!
//! Connects to a namespace of the relay, joins a room and turns prompt lines into
//! protocol frames. Reconnects and rejoins on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin deai-client -- --room r1 --name alice
//! cargo run --bin deai-client -- -u ws://127.0.0.1:8080/ws -r r1
//! ```
//!
//! Commands: plain text sends a subtitle, `/signal <target> <type> [json]`,
//! `/join <room>`, `/leave`, `/quit`.

use clap::Parser;

use deai_client::{config::ClientArgs, run_client};
use deai_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = run_client(args.into()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
