//! Layered configuration: defaults, then `formulir.toml`, then
//! `FORMULIR_*` environment variables. Flags are applied by the caller.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use formulir_form::FormConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE: &str = "formulir.toml";

/// Variables owned by `formulir-log` itself.
const LOG_VARIABLES: [&str; 5] = ["log", "log_format", "log_time", "log_source", "log_colors"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub form: FormConfig,
    pub log: formulir_log::Config,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            form: FormConfig::default(),
            log: formulir_log::Config {
                level: "warn".to_string(),
                ..formulir_log::Config::default()
            },
        }
    }
}

impl CliConfig {
    /// Nested keys use `__`, e.g. `FORMULIR_FORM__EMAIL_CHECK_DELAY_MS=0`.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let file = file.unwrap_or_else(|| Path::new(DEFAULT_FILE));
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(
                Env::prefixed("FORMULIR_")
                    .ignore(&LOG_VARIABLES)
                    .ignore(&["config"])
                    .split("__"),
            )
            .extract()?;
        config.form.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = CliConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, CliConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_FILE,
                r#"
                [form]
                email_check_delay_ms = 10
                registered_emails = ["taken@rubin.com"]

                [log]
                level = "debug"
                "#,
            )?;
            jail.set_env("FORMULIR_FORM__EMAIL_CHECK_DELAY_MS", "0");
            jail.set_env("FORMULIR_LOG", "trace");

            let config = CliConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.form.email_check_delay_ms, 0);
            assert_eq!(config.form.registered_emails, vec!["taken@rubin.com"]);
            assert_eq!(config.form.hobby_debounce_ms, 100);
            assert_eq!(config.log.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_form_config_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[form]\nevent_capacity = 0\n")?;
            let error = CliConfig::load(Some(Path::new("custom.toml"))).unwrap_err();
            assert!(error.to_string().contains("event_capacity"));
            Ok(())
        });
    }
}
