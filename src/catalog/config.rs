//! Catalog client configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::observer::{FetchObserver, NoopObserver};
use crate::defaults;
use crate::error::ProviderError;

/// Configuration for fetching the model catalog
#[derive(Clone)]
pub struct CatalogConfig {
    /// Models listing endpoint
    pub models_url: String,
    /// User-Agent sent with the request
    pub user_agent: String,
    /// Optional request timeout (none by default)
    pub timeout: Option<Duration>,
    /// Optional pre-built HTTP client
    pub http_client: Option<reqwest::Client>,
    /// Receives fetch outcomes
    pub observer: Arc<dyn FetchObserver>,
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self {
            models_url: defaults::catalog::MODELS_URL.to_string(),
            user_agent: defaults::identity::USER_AGENT.to_string(),
            timeout: None,
            http_client: None,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Default configuration with `KILOCODE_MODELS_URL` applied when set
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(url) = std::env::var(defaults::catalog::MODELS_URL_ENV)
            && !url.trim().is_empty()
        {
            config.models_url = url;
        }
        config
    }

    /// Set the models endpoint
    pub fn with_models_url(mut self, url: impl Into<String>) -> Self {
        self.models_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reuse an existing HTTP client
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub(crate) fn client(&self) -> Result<reqwest::Client, ProviderError> {
        match &self.http_client {
            Some(client) => Ok(client.clone()),
            None => reqwest::Client::builder()
                .build()
                .map_err(|e| ProviderError::HttpError(format!("Failed to build HTTP client: {e}"))),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("models_url", &self.models_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("http_client", &self.http_client.is_some())
            .finish_non_exhaustive()
    }
}
