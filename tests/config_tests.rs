//! Configuration parsing through the public API.

use foodbridge::error::{ConfigError, Error};
use foodbridge::infrastructure::config::settings::Config;

const TEMPLATE: &str = include_str!("../config.toml.example");

#[test]
fn empty_file_uses_defaults() {
    let config = Config::parse_toml("").expect("empty config is valid");
    assert_eq!(config.database.pool_size, 4);
    assert_eq!(config.logging.format, "pretty");
    assert_eq!(config.analytics.risk_top_n, 10);
    assert_eq!(config.analytics.near_expiry_days, 7);
    assert_eq!(config.analytics.forecast_window, 3);
}

#[test]
fn template_matches_defaults() {
    let template = Config::parse_toml(TEMPLATE).expect("template parses");
    let defaults = Config::parse_toml("").expect("defaults parse");
    assert_eq!(template.analytics, defaults.analytics);
    assert_eq!(template.logging, defaults.logging);
    assert_eq!(template.database.pool_size, defaults.database.pool_size);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::parse_toml(
        r#"
[analytics]
risk_top_n = 3

[logging]
format = "json"
"#,
    )
    .expect("valid config");
    assert_eq!(config.analytics.risk_top_n, 3);
    assert_eq!(config.analytics.top_foods, 10);
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn wrong_type_is_a_parse_error() {
    let result = Config::parse_toml("[analytics]\nrisk_top_n = \"ten\"\n");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn zero_pool_size_is_rejected() {
    let result = Config::parse_toml("[database]\npool_size = 0\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "pool_size",
            ..
        }))
    ));
}

#[test]
fn unknown_log_format_is_rejected() {
    let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
    let error = result.expect_err("xml is not a log format");
    assert!(error.to_string().contains("format"));
}

#[test]
fn negative_near_expiry_window_is_rejected() {
    let result = Config::parse_toml("[analytics]\nnear_expiry_days = -1\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "near_expiry_days",
            ..
        }))
    ));
}

#[test]
fn missing_file_is_read_error_but_default_location_falls_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let absent = dir.path().join("absent.toml");

    assert!(matches!(
        Config::load(&absent),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
    let config = Config::load_or_default(&absent).expect("defaults");
    assert_eq!(config.analytics.risk_top_n, 10);
}

#[test]
fn config_round_trips_through_toml() {
    let config = Config::parse_toml("[analytics]\ntop_foods = 5\n").expect("valid");
    let rendered = toml::to_string(&config).expect("serialize");
    let reparsed = Config::parse_toml(&rendered).expect("reparse");
    assert_eq!(reparsed.analytics, config.analytics);
}
