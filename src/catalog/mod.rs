//! Model Catalog
//!
//! Loads the list of models offered through the Kilo Code gateway:
//! - `fetch`: live retrieval from the OpenRouter models API
//! - `fallback`: the built-in table used when retrieval fails
//! - `cache`: [`ModelCatalog`], a memoizing accessor with explicit invalidation
//! - `observer`: hooks that surface absorbed fetch failures
//!
//! # Usage
//! ```rust,no_run
//! use kilocode_provider::catalog::{CatalogConfig, LoggingObserver, ModelCatalog};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let catalog = ModelCatalog::new(
//!     CatalogConfig::from_env().with_observer(Arc::new(LoggingObserver)),
//! );
//! let models = catalog.get_available_models().await;
//! println!("{} models", models.len());
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod fallback;
pub mod fetch;
pub mod observer;

pub use cache::ModelCatalog;
pub use config::CatalogConfig;
pub use fallback::{AVAILABLE_MODELS, fallback_models};
pub use fetch::{fetch_available_models, parse_models_response, try_fetch_models};
pub use observer::{FetchFailure, FetchObserver, LoggingObserver, NoopObserver};
