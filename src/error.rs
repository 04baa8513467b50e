//! Error Handling Module
//!
//! A single error type covers the two failure kinds of the provider:
//! recoverable catalog fetch failures (`HttpError`, `ApiError`, `ParseError`)
//! which the catalog absorbs before they reach the host, and the credential
//! failure (`MissingApiKey`) which is returned to the host so it can decide
//! whether to abort.
//!
//! # Example
//!
//! ```rust,ignore
//! use kilocode_provider::error::ProviderError;
//!
//! let error = ProviderError::api_error(503, "Service Unavailable");
//! assert_eq!(error.status_code(), Some(503));
//! assert!(!error.is_missing_credential());
//! ```

use thiserror::Error;

/// Errors produced while loading the model catalog or registering the provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The API key is unset, empty, or still an unresolved `{env:...}` template
    #[error(
        "\n{env_var} is not set!\nPlease set the {env_var} environment variable.\n\nYou can get your API key from {help_url}"
    )]
    MissingApiKey { env_var: String, help_url: String },

    /// Transport failure while talking to a remote endpoint
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Remote endpoint answered with a non-success status
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// Response body could not be interpreted
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON (de)serialization failure outside of a response body
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Host configuration has an unexpected shape
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Reading or writing a configuration file failed
    #[error("IO error: {0}")]
    IoError(String),

    /// Tracing subscriber could not be installed
    #[error("Telemetry initialization error: {0}")]
    TelemetryInit(String),
}

impl ProviderError {
    /// Build a `MissingApiKey` error for the given variable
    pub fn missing_api_key(env_var: impl Into<String>) -> Self {
        Self::MissingApiKey {
            env_var: env_var.into(),
            help_url: crate::defaults::credentials::HELP_URL.to_string(),
        }
    }

    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
        }
    }

    /// Whether this is the credential failure the host must act on
    pub const fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingApiKey { .. })
    }

    /// HTTP status carried by the error, if any
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // A body cut off mid-read is a transport failure, not a malformed payload.
        if err.is_body() {
            return Self::HttpError(err.to_string());
        }
        if err.is_decode() {
            return Self::ParseError(err.to_string());
        }
        match err.status() {
            Some(status) => Self::api_error(status.as_u16(), err.to_string()),
            None => Self::HttpError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_message_names_variable_and_help_url() {
        let err = ProviderError::missing_api_key("KILOCODE_API_KEY");
        let text = err.to_string();
        assert!(text.contains("KILOCODE_API_KEY is not set!"));
        assert!(text.contains("https://app.kilocode.ai/profile"));
        assert!(err.is_missing_credential());
    }

    #[test]
    fn status_code_only_for_api_errors() {
        assert_eq!(ProviderError::api_error(404, "nope").status_code(), Some(404));
        assert_eq!(ProviderError::HttpError("reset".into()).status_code(), None);
    }

    #[test]
    fn json_error_conversion() {
        let err: ProviderError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ProviderError::JsonError(_)));
    }
}
