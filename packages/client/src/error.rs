//! Error types for the CLI client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay does not serve the requested namespace (HTTP 404 on upgrade)
    #[error("Namespace not served by the relay: {0}")]
    NamespaceNotFound(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors while parsing a line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '/{0}' (try /join, /leave, /signal, /quit)")]
    UnknownCommand(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("payload is not valid JSON: {0}")]
    InvalidPayload(String),
}
