//! Global subscriber installation. Each test binary gets one global
//! dispatcher, so everything that installs lives in this single test.

use formulir_log::{Config, Format, Level, LogError};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn install_once_then_refuse() {
    let bad = Config {
        level: "formulir_form=loudest".to_string(),
        ..Config::test()
    };
    assert!(matches!(
        formulir_log::init_with(bad),
        Err(LogError::Filter { .. })
    ));

    let config = Config {
        service: Some("formulir".to_string()),
        ..Config::test().with_level(Level::Debug)
    };
    let guard = formulir_log::init_with(config);
    assert!(guard.is_ok());
    tracing::debug!("installed");

    assert!(matches!(formulir_log::init(), Err(LogError::Init(_))));
    assert!(formulir_log::auto_init().is_ok());
}

#[rstest]
#[case("pretty", Format::Pretty)]
#[case("COMPACT", Format::Compact)]
#[case("json", Format::Json)]
fn parses_formats(#[case] input: &str, #[case] expected: Format) {
    assert_eq!(input.parse::<Format>().ok(), Some(expected));
}

#[test]
fn rejects_unknown_format() {
    assert!(matches!("logfmt".parse::<Format>(), Err(LogError::Config(_))));
}

#[test]
fn config_deserializes_with_defaults() {
    let config: Config = serde_json::from_str(r#"{"level": "warn", "format": "json"}"#)
        .unwrap_or_default();

    assert_eq!(config.level, "warn");
    assert_eq!(config.format, Format::Json);
    assert_eq!(config.service, None);
}
