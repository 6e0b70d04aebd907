//! # formulir-log
//!
//! Logging setup for the formulir binaries: a `tracing-subscriber`
//! registry with an env filter and one of three output formats.
//!
//! ```no_run
//! fn main() -> Result<(), formulir_log::LogError> {
//!     let _guard = formulir_log::auto_init()?;
//!     tracing::info!(fields = 8, "form opened");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod builder;
mod config;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, Level};

/// Error type for logger setup
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid filter `{directives}`: {reason}")]
    Filter { directives: String, reason: String },

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Picks a configuration from the environment and installs it.
///
/// `FORMULIR_LOG` or `RUST_LOG` select [`Config::from_env`]; otherwise debug
/// builds get [`Config::development`] and release builds
/// [`Config::production`]. Returns a no-op guard when a subscriber is
/// already installed.
pub fn auto_init() -> Result<LoggerGuard, LogError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LoggerGuard::noop());
    }

    if std::env::var("FORMULIR_LOG").is_ok() || std::env::var("RUST_LOG").is_ok() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Installs the default configuration.
pub fn init() -> Result<LoggerGuard, LogError> {
    init_with(Config::default())
}

/// Installs `config`.
pub fn init_with(config: Config) -> Result<LoggerGuard, LogError> {
    LoggerBuilder::from_config(config).build()
}
