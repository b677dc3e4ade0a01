use crate::config::{Config, ConfigError, DEFAULT_BASE_URL, DEFAULT_DATABASE};
use std::time::Duration;

#[test]
fn empty_source_yields_defaults() {
    let config = Config::from_toml_str("").expect("empty config should use defaults");

    assert_eq!(config, Config::default());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.database, DEFAULT_DATABASE);
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn partial_source_overrides_named_keys() {
    let config = Config::from_toml_str(
        r#"
        database = "school"
        request_timeout_ms = 0
        "#,
    )
    .expect("partial config should parse");

    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.database, "school");
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Config::from_toml_str("retries = 3").expect_err("unknown keys must fail");

    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn non_http_base_url_is_rejected() {
    let err = Config::from_toml_str(r#"base_url = "ftp://example.com""#)
        .expect_err("ftp urls must fail");

    assert!(matches!(err, ConfigError::Invalid(message) if message.contains("http")));
}

#[test]
fn blank_database_is_rejected() {
    let err =
        Config::from_toml_str(r#"database = "  ""#).expect_err("blank database must fail");

    assert!(matches!(err, ConfigError::Invalid(message) if message.contains("database")));
}

#[test]
fn load_reports_missing_file_path() {
    let err = Config::load("/nonexistent/querydeck.toml").expect_err("missing file must fail");

    assert!(matches!(
        err,
        ConfigError::Io { ref path, .. } if path.ends_with("querydeck.toml")
    ));
}
