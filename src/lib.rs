//! # kilocode-provider
//!
//! Registers the Kilo Code gateway as an OpenAI-compatible provider in an
//! OpenCode host configuration.
//!
//! - [`catalog`]: the model catalog, fetched from the OpenRouter models API with a
//!   built-in fallback table and an explicitly owned cache
//! - [`credentials`]: `KILOCODE_API_KEY` lookup and the credential gate
//! - [`registrar`]: builds the provider entry and merges it into the host configuration once
//! - [`plugin`]: the host-facing entry point and its configuration hook
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kilocode_provider::prelude::*;
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), ProviderError> {
//! let hooks = kilocode_provider_plugin(PluginInput::default());
//! let mut config = json!({ "model": "kilocode.ai/openai/gpt-5" });
//! hooks.config.config(&mut config).await?;
//! assert!(config["provider"]["kilocode.ai"].is_object());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod credentials;
pub mod defaults;
pub mod error;
pub mod plugin;
pub mod registrar;
pub mod telemetry;
pub mod types;

pub use catalog::{
    AVAILABLE_MODELS, CatalogConfig, FetchFailure, FetchObserver, LoggingObserver, ModelCatalog,
    fallback_models, fetch_available_models,
};
pub use credentials::{ApiKeyStatus, get_api_key, is_unresolved_template, validate_api_key};
pub use error::ProviderError;
pub use plugin::{ConfigHook, Hooks, KiloCodeProviderPlugin, PluginInput, kilocode_provider_plugin};
pub use registrar::{
    KiloCodeProvider, ModelSource, ProviderSettings, configure_kilocode_provider, create_headers,
    create_kilocode_provider_config,
};
pub use types::{AvailableModels, ModelInfo, ProviderConfig, ProviderOptions, Registration};

/// Commonly used items
pub mod prelude {
    pub use crate::catalog::{CatalogConfig, ModelCatalog};
    pub use crate::error::ProviderError;
    pub use crate::plugin::{ConfigHook, Hooks, PluginInput, kilocode_provider_plugin};
    pub use crate::registrar::{KiloCodeProvider, ModelSource};
    pub use crate::types::{AvailableModels, ModelInfo, ProviderConfig, Registration};
}
