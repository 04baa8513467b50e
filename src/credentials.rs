//! API key lookup and validation
//!
//! The host resolves `{env:NAME}` templates in its configuration. When
//! `KILOCODE_API_KEY` is unset the provider writes that template instead of an
//! empty key, so an unresolved template is treated exactly like a missing key.

use secrecy::{ExposeSecret, SecretString};

use crate::defaults::credentials::API_KEY_ENV;
use crate::error::ProviderError;

/// Host templating token standing for the value of `env_var`
pub fn env_placeholder(env_var: &str) -> String {
    format!("{{env:{env_var}}}")
}

/// True for an unresolved `{env:NAME}` template
pub fn is_unresolved_template(value: &str) -> bool {
    value
        .strip_prefix("{env:")
        .and_then(|rest| rest.strip_suffix('}'))
        .is_some_and(|name| !name.is_empty() && !name.contains(['{', '}']))
}

/// Whether a usable API key is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyStatus {
    Set,
    NotSet,
}

impl ApiKeyStatus {
    /// Classify a raw variable value
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() && !is_unresolved_template(v) => Self::Set,
            _ => Self::NotSet,
        }
    }

    pub fn from_env(env_var: &str) -> Self {
        Self::from_value(read_env(env_var).as_deref())
    }

    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::NotSet => "not set",
        }
    }
}

fn read_env(env_var: &str) -> Option<String> {
    std::env::var(env_var).ok()
}

/// Key for `env_var`, or its `{env:NAME}` placeholder when unset or empty
pub fn api_key_from(env_var: &str) -> String {
    match read_env(env_var) {
        Some(key) if !key.is_empty() => key,
        _ => env_placeholder(env_var),
    }
}

/// `KILOCODE_API_KEY`, or `{env:KILOCODE_API_KEY}` when unset
pub fn get_api_key() -> String {
    api_key_from(API_KEY_ENV)
}

/// Require a usable key in `env_var`
pub fn validate_api_key_from(env_var: &str) -> Result<SecretString, ProviderError> {
    let value = read_env(env_var);
    match (ApiKeyStatus::from_value(value.as_deref()), value) {
        (ApiKeyStatus::Set, Some(key)) => Ok(SecretString::from(key)),
        _ => {
            tracing::error!(
                target: "kilocode::credentials",
                env_var = %env_var,
                "API key is not set"
            );
            Err(ProviderError::missing_api_key(env_var))
        }
    }
}

/// Require a usable `KILOCODE_API_KEY`
///
/// Returns [`ProviderError::MissingApiKey`] instead of aborting; the host
/// decides whether to exit.
pub fn validate_api_key() -> Result<SecretString, ProviderError> {
    validate_api_key_from(API_KEY_ENV)
}

/// Log whether `env_var` holds a usable key, never the key itself
pub fn log_api_key_status_for(env_var: &str) -> ApiKeyStatus {
    let status = ApiKeyStatus::from_env(env_var);
    tracing::info!(
        target: "kilocode::credentials",
        env_var = %env_var,
        status = status.as_str(),
        "API key status: {}",
        status.as_str()
    );
    status
}

pub fn log_api_key_status() -> ApiKeyStatus {
    log_api_key_status_for(API_KEY_ENV)
}

/// Length-only view of a key, for diagnostics
pub fn redact(key: &SecretString) -> String {
    format!("<{} chars>", key.expose_secret().len())
}
