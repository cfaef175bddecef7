//! Log subscriber setup.
//!
//! Installs a global `tracing` subscriber: an `EnvFilter` taken from
//! `RUST_LOG` (or the configured level) plus a plain or JSON `fmt` layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::domain::{MessageHandlerError, MessageHandlerResult};

/// Install the global log subscriber.
///
/// Calling this again after a subscriber is installed returns an error and
/// leaves the existing subscriber in place.
pub fn init_logging(config: &LoggingConfig) -> MessageHandlerResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| MessageHandlerError::LoggingInit(e.to_string()))?;

    if config.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| MessageHandlerError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| MessageHandlerError::LoggingInit(e.to_string()))?;
    }

    tracing::debug!(
        level = %config.level,
        json = config.json,
        "[pcn-handler] Logging initialized"
    );
    Ok(())
}
