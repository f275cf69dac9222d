//! Log sink installation.
//!
//! Components never reach for a global logger: they emit events inside the
//! `tracing::Span` they were handed at construction. This module only installs
//! the process-wide subscriber those spans are recorded by.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

use crate::settings::{Environment, LogLevel};

/// Build the event filter; `RUST_LOG` wins over the configured level.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Install the global subscriber: human-readable output in development,
/// JSON lines everywhere else.
///
/// # Errors
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init_tracing(level: LogLevel, environment: Environment) -> Result<(), TryInitError> {
    let builder = fmt().with_env_filter(env_filter(level)).with_target(true);
    match environment {
        Environment::Development => builder.finish().try_init(),
        Environment::Production | Environment::Test => builder
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .finish()
            .try_init(),
    }
}
