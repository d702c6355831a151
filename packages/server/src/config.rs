//! Command-line configuration of the relay server.

use clap::Parser;

use crate::domain::{Namespace, ValueObjectError};

#[derive(Parser, Debug, Clone)]
#[command(name = "deai-server")]
#[command(about = "Signaling relay: rooms, presence and peer negotiation over WebSocket", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    pub port: u16,

    /// Namespaces to serve (repeatable or comma separated); `default` is always served
    #[arg(
        short = 'n',
        long = "namespace",
        value_delimiter = ',',
        default_value = "default,video"
    )]
    pub namespaces: Vec<String>,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl ServerArgs {
    /// Validated namespaces, `default` first, without duplicates.
    pub fn namespaces(&self) -> Result<Vec<Namespace>, ValueObjectError> {
        let mut namespaces = vec![Namespace::default_namespace()];
        for name in &self.namespaces {
            let namespace = Namespace::new(name.trim().to_string())?;
            if !namespaces.contains(&namespace) {
                namespaces.push(namespace);
            }
        }
        Ok(namespaces)
    }
}
