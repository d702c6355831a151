//! Command-line arguments of the client binary.

use clap::Parser;

use super::session::SessionOptions;

#[derive(Parser, Debug)]
#[command(name = "deai-client")]
#[command(about = "CLI peer for the deai signaling relay", long_about = None)]
pub struct ClientArgs {
    /// Relay websocket URL (`/ws` or `/ws/<namespace>`)
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws/video")]
    pub url: String,

    /// Room to join after connecting
    #[arg(short = 'r', long)]
    pub room: String,

    /// Display name announced to the room
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl From<ClientArgs> for SessionOptions {
    fn from(args: ClientArgs) -> Self {
        Self {
            url: args.url,
            room: args.room,
            name: args.name,
        }
    }
}
