//! Catalog fetch observers
//!
//! The catalog never returns fetch errors to its caller. Observers are the
//! hook through which those failures stay visible: they receive the failure
//! kind so that an unreachable API can be told apart from one whose response
//! shape changed. Hooks are best-effort and should avoid expensive work.

use crate::error::ProviderError;

/// Why a live catalog fetch fell back to the built-in table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The endpoint answered with a non-success status
    Status(u16),
    /// The request never produced a response
    Transport(String),
    /// The response body was not valid JSON
    Parse(String),
}

impl FetchFailure {
    /// Short label used as a structured log field
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Transport(_) => "transport",
            Self::Parse(_) => "parse",
        }
    }
}

impl From<&ProviderError> for FetchFailure {
    fn from(error: &ProviderError) -> Self {
        match error {
            ProviderError::ApiError { code, .. } => Self::Status(*code),
            ProviderError::ParseError(msg) | ProviderError::JsonError(msg) => {
                Self::Parse(msg.clone())
            }
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Receives the outcome of every live catalog fetch
pub trait FetchObserver: Send + Sync {
    /// Called when the endpoint returned a usable body
    fn on_fetch_success(&self, _url: &str, _model_count: usize) {}

    /// Called before the fallback table is returned
    fn on_fetch_failure(&self, _url: &str, _failure: &FetchFailure) {}
}

/// Observer that ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl FetchObserver for NoopObserver {}

/// A simple logging observer backed by `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingObserver;

impl FetchObserver for LoggingObserver {
    fn on_fetch_success(&self, url: &str, model_count: usize) {
        tracing::debug!(
            target: "kilocode::catalog",
            url = %url,
            models = model_count,
            "catalog fetched"
        );
    }

    fn on_fetch_failure(&self, url: &str, failure: &FetchFailure) {
        match failure {
            FetchFailure::Status(code) => {
                tracing::debug!(
                    target: "kilocode::catalog",
                    url = %url,
                    kind = failure.kind(),
                    status = *code,
                    "catalog fetch failed"
                )
            }
            FetchFailure::Transport(msg) | FetchFailure::Parse(msg) => {
                tracing::debug!(
                    target: "kilocode::catalog",
                    url = %url,
                    kind = failure.kind(),
                    err = %msg,
                    "catalog fetch failed"
                )
            }
        }
    }
}
