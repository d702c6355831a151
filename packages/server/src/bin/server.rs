//! Signaling relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin deai-server
//! cargo run --bin deai-server -- --host 0.0.0.0 --port 3000 --namespace default,video
//! ```

use clap::Parser;

use deai_server::{config::ServerArgs, ui::Server};
use deai_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let namespaces = match args.namespaces() {
        Ok(namespaces) => namespaces,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let server = Server::in_memory(namespaces);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
