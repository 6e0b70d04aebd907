//! Display configuration

use serde::{Deserialize, Serialize};

/// Which parts of an event the formatter prints.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show timestamps
    pub time: bool,
    /// Show source location (`file:line`)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Use ANSI colors
    pub colors: bool,
    /// Flatten JSON event fields into the top-level object
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            source: cfg!(debug_assertions),
            target: true,
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
            flatten: true,
        }
    }
}

impl DisplayConfig {
    /// Applies `FORMULIR_LOG_TIME`, `FORMULIR_LOG_SOURCE` and
    /// `FORMULIR_LOG_COLORS` overrides.
    pub(super) fn parse_env(&mut self) {
        if let Ok(v) = std::env::var("FORMULIR_LOG_TIME") {
            self.time = is_truthy(&v);
        }
        if let Ok(v) = std::env::var("FORMULIR_LOG_SOURCE") {
            self.source = is_truthy(&v);
        }
        if let Ok(v) = std::env::var("FORMULIR_LOG_COLORS") {
            self.colors = is_truthy(&v);
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value != "0" && !value.eq_ignore_ascii_case("false")
}
