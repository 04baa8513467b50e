//! Memoizing catalog owned by its caller

use std::sync::Arc;
use tokio::sync::RwLock;

use super::config::CatalogConfig;
use super::fetch::fetch_available_models;
use crate::types::AvailableModels;

/// Model catalog that fetches once and then serves the cached mapping
///
/// The first [`ModelCatalog::get_available_models`] call stores whatever the
/// fetch produced, including the fallback table or an empty map. Nothing is
/// re-fetched until [`ModelCatalog::invalidate`] or [`ModelCatalog::refresh`].
#[derive(Debug, Default)]
pub struct ModelCatalog {
    config: CatalogConfig,
    cache: RwLock<Option<Arc<AvailableModels>>>,
}

impl ModelCatalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            cache: RwLock::new(None),
        }
    }

    /// Cached models, fetching them on first use
    pub async fn get_available_models(&self) -> Arc<AvailableModels> {
        if let Some(models) = self.cache.read().await.as_ref() {
            return Arc::clone(models);
        }

        // Concurrent first callers may both fetch; the last write wins.
        let models = Arc::new(fetch_available_models(&self.config).await);
        *self.cache.write().await = Some(Arc::clone(&models));
        models
    }

    /// Current cache content without fetching
    pub async fn cached(&self) -> Option<Arc<AvailableModels>> {
        self.cache.read().await.clone()
    }

    /// Drop the cached mapping; the next read fetches again
    pub async fn invalidate(&self) {
        self.cache.write().await.take();
        tracing::debug!(target: "kilocode::catalog", "catalog cache invalidated");
    }

    /// Fetch unconditionally and replace the cached mapping
    pub async fn refresh(&self) -> Arc<AvailableModels> {
        let models = Arc::new(fetch_available_models(&self.config).await);
        *self.cache.write().await = Some(Arc::clone(&models));
        models
    }
}
