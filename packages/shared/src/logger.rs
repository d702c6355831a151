//! Logging setup utilities for the deai binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose logs follow the default level unless `RUST_LOG` says otherwise.
const WORKSPACE_CRATES: [&str; 3] = ["deai_shared", "deai_server", "deai_client"];

/// Build the default filter directive for the given binary.
///
/// Every workspace crate and the binary itself are set to `default_log_level`,
/// e.g. `deai_shared=debug,deai_server=debug,deai_client=debug,deai_server=debug`.
pub fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    WORKSPACE_CRATES
        .iter()
        .copied()
        .chain(std::iter::once(binary_name))
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "deai-server", "deai-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use deai_shared::logger::setup_logger;
///
/// setup_logger("deai-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
