//! Logger builder

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::LogError;
use crate::config::{Config, DisplayConfig, Format};

macro_rules! fmt_layer {
    ($style:ident, $display:expr) => {
        fmt::layer()
            .$style()
            .with_writer(std::io::stderr)
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source)
    };
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Logger builder
pub struct LoggerBuilder {
    config: Config,
}

/// Keeps the root span entered for as long as it is alive.
#[must_use = "dropping the guard leaves the root span"]
pub struct LoggerGuard {
    _root_span: Option<tracing::span::EnteredSpan>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Installs the subscriber as the global default.
    ///
    /// Fails when the filter does not parse or a global subscriber is
    /// already installed.
    pub fn build(self) -> Result<LoggerGuard, LogError> {
        let filter = EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            directives: self.config.level.clone(),
            reason: e.to_string(),
        })?;

        Registry::default()
            .with(format_layer(self.config.format, &self.config.display))
            .with(filter)
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))?;

        let root_span = self
            .config
            .service
            .as_deref()
            .map(|service| tracing::info_span!("app", service).entered());

        Ok(LoggerGuard {
            _root_span: root_span,
        })
    }
}

fn format_layer(format: Format, display: &DisplayConfig) -> BoxedLayer {
    match (format, display.time) {
        (Format::Pretty, true) => fmt_layer!(pretty, display).boxed(),
        (Format::Pretty, false) => fmt_layer!(pretty, display).without_time().boxed(),
        (Format::Compact, true) => fmt_layer!(compact, display).boxed(),
        (Format::Compact, false) => fmt_layer!(compact, display).without_time().boxed(),
        (Format::Json, true) => fmt_layer!(json, display)
            .flatten_event(display.flatten)
            .boxed(),
        (Format::Json, false) => fmt_layer!(json, display)
            .flatten_event(display.flatten)
            .without_time()
            .boxed(),
    }
}

impl LoggerGuard {
    /// A guard for when another subscriber is already installed.
    pub(crate) fn noop() -> Self {
        Self { _root_span: None }
    }
}
