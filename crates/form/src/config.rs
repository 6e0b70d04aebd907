//! Form timing and rule configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Minimum lengths for the text fields of an education entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationLimits {
    pub school: usize,
    pub degree: usize,
    pub year_range: usize,
}

impl Default for EducationLimits {
    fn default() -> Self {
        // a degree may be a placeholder such as "-"
        Self {
            school: 5,
            degree: 1,
            year_range: 5,
        }
    }
}

/// Delays, the registered-address list and channel sizing.
///
/// Durations are plain milliseconds so the config reads the same in TOML,
/// JSON and environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Simulated latency of the email availability check.
    pub email_check_delay_ms: u64,
    /// Quiet period after a hobby change before the lookup starts.
    pub hobby_debounce_ms: u64,
    /// Simulated latency of the sub-hobby lookup.
    pub hobby_lookup_delay_ms: u64,
    /// Addresses the availability check reports as taken, compared
    /// case-insensitively.
    pub registered_emails: Vec<String>,
    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
    pub education: EducationLimits,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            email_check_delay_ms: 1_500,
            hobby_debounce_ms: 100,
            hobby_lookup_delay_ms: 1_000,
            registered_emails: vec!["andi@rubin.com".to_string()],
            event_capacity: 64,
            education: EducationLimits::default(),
        }
    }
}

impl FormConfig {
    #[must_use]
    pub fn email_check_delay(&self) -> Duration {
        Duration::from_millis(self.email_check_delay_ms)
    }

    #[must_use]
    pub fn hobby_debounce(&self) -> Duration {
        Duration::from_millis(self.hobby_debounce_ms)
    }

    #[must_use]
    pub fn hobby_lookup_delay(&self) -> Duration {
        Duration::from_millis(self.hobby_lookup_delay_ms)
    }

    /// Checks the config is usable.
    pub fn validate(&self) -> Result<()> {
        if self.event_capacity == 0 {
            return Err(FormError::config("event_capacity must be > 0"));
        }
        if let Some(index) = self
            .registered_emails
            .iter()
            .position(|email| email.trim().is_empty())
        {
            return Err(FormError::config(format!(
                "registered_emails[{index}] must not be empty"
            )));
        }
        Ok(())
    }
}
