//! Environment-driven configuration tests
//!
//! Every test here mutates the process environment, so all of them run
//! serially.

use std::path::PathBuf;

use kilocode_provider::catalog::CatalogConfig;
use kilocode_provider::credentials::{
    ApiKeyStatus, get_api_key, log_api_key_status, validate_api_key,
};
use kilocode_provider::error::ProviderError;
use kilocode_provider::telemetry::{OutputFormat, config_from_env};
use secrecy::ExposeSecret;
use serial_test::serial;
use tracing_test::traced_test;

fn set(var: &str, value: &str) {
    unsafe {
        std::env::set_var(var, value);
    }
}

fn clear(vars: &[&str]) {
    for var in vars {
        unsafe {
            std::env::remove_var(var);
        }
    }
}

const LOG_VARS: [&str; 3] = ["KILOCODE_LOG_LEVEL", "KILOCODE_LOG_FORMAT", "KILOCODE_LOG_FILE"];

#[test]
#[serial]
fn models_url_override_is_honoured() {
    set("KILOCODE_MODELS_URL", "http://127.0.0.1:18080/models");
    assert_eq!(
        CatalogConfig::from_env().models_url,
        "http://127.0.0.1:18080/models"
    );

    set("KILOCODE_MODELS_URL", "   ");
    assert_eq!(
        CatalogConfig::from_env().models_url,
        "https://openrouter.ai/api/v1/models"
    );

    clear(&["KILOCODE_MODELS_URL"]);
    assert_eq!(
        CatalogConfig::from_env().models_url,
        "https://openrouter.ai/api/v1/models"
    );
}

#[test]
#[serial]
fn subscriber_config_reads_log_variables() {
    clear(&LOG_VARS);
    let config = config_from_env().unwrap();
    assert_eq!(config.log_level, tracing::Level::INFO);
    assert_eq!(config.output_format, OutputFormat::Text);
    assert!(config.log_file.is_none());

    set("KILOCODE_LOG_LEVEL", "DEBUG");
    set("KILOCODE_LOG_FORMAT", "json-compact");
    set("KILOCODE_LOG_FILE", "logs/kilocode.log");
    let config = config_from_env().unwrap();
    assert_eq!(config.log_level, tracing::Level::DEBUG);
    assert_eq!(config.output_format, OutputFormat::JsonCompact);
    assert_eq!(config.log_file, Some(PathBuf::from("logs/kilocode.log")));
    assert_eq!(config.filter_directive(), "kilocode=debug");

    clear(&LOG_VARS);
}

#[test]
#[serial]
fn invalid_log_variables_are_rejected() {
    clear(&LOG_VARS);

    set("KILOCODE_LOG_LEVEL", "loud");
    let err = config_from_env().unwrap_err();
    assert!(matches!(err, ProviderError::TelemetryInit(_)));
    assert!(err.to_string().contains("Invalid log level: loud"));

    clear(&LOG_VARS);
    set("KILOCODE_LOG_FORMAT", "xml");
    let err = config_from_env().unwrap_err();
    assert!(matches!(err, ProviderError::TelemetryInit(_)));
    assert!(err.to_string().contains("Invalid log format: xml"));

    clear(&LOG_VARS);
}

#[test]
#[serial]
#[traced_test]
fn api_key_helpers_with_key_set() {
    set("KILOCODE_API_KEY", "sk-env-123");

    assert_eq!(get_api_key(), "sk-env-123");
    assert_eq!(validate_api_key().unwrap().expose_secret(), "sk-env-123");

    let status = log_api_key_status();
    assert_eq!(status, ApiKeyStatus::Set);
    assert!(status.is_set());
    assert!(logs_contain("API key status: set"));
    assert!(!logs_contain("sk-env-123"));

    clear(&["KILOCODE_API_KEY"]);
}

#[test]
#[serial]
#[traced_test]
fn api_key_helpers_with_key_unset() {
    clear(&["KILOCODE_API_KEY"]);

    assert_eq!(get_api_key(), "{env:KILOCODE_API_KEY}");
    let err = validate_api_key().unwrap_err();
    assert_eq!(err, ProviderError::missing_api_key("KILOCODE_API_KEY"));

    let status = log_api_key_status();
    assert_eq!(status, ApiKeyStatus::NotSet);
    assert!(!status.is_set());
    assert!(logs_contain("API key status: not set"));
}

#[test]
#[serial]
fn placeholder_key_is_reported_as_unset() {
    set("KILOCODE_API_KEY", "{env:KILOCODE_API_KEY}");

    assert!(validate_api_key().unwrap_err().is_missing_credential());
    assert_eq!(log_api_key_status(), ApiKeyStatus::NotSet);

    clear(&["KILOCODE_API_KEY"]);
}
