//! Host plugin entry point
//!
//! The host calls [`kilocode_provider_plugin`] with its plugin input and gets
//! back [`Hooks`]. The `config` hook registers the provider into the host
//! configuration. The startup banner is logged once per process.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ProviderError;
use crate::registrar::{KiloCodeProvider, ModelSource, ProviderSettings};
use crate::types::Registration;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Input handed to plugins by the host
///
/// Only its presence matters to this plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(default, flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Configuration hook run by the host's configuration pipeline
#[async_trait]
pub trait ConfigHook: Send + Sync {
    async fn config(&self, config: &mut Value) -> Result<Registration, ProviderError>;
}

#[async_trait]
impl ConfigHook for KiloCodeProvider {
    async fn config(&self, config: &mut Value) -> Result<Registration, ProviderError> {
        self.configure(config).await
    }
}

/// Hooks exposed to the host
#[derive(Clone)]
pub struct Hooks {
    pub config: Arc<dyn ConfigHook>,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}

/// Configurable form of the plugin
#[derive(Debug, Clone, Default)]
pub struct KiloCodeProviderPlugin {
    provider: KiloCodeProvider,
}

impl KiloCodeProviderPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: ProviderSettings) -> Self {
        let source = self.provider.model_source().clone();
        self.provider = KiloCodeProvider::new(settings).with_model_source(source);
        self
    }

    pub fn with_model_source(mut self, source: ModelSource) -> Self {
        self.provider = self.provider.with_model_source(source);
        self
    }

    /// Plugin invocation: log the banner on first use, return the hooks
    pub fn init(&self, _input: &PluginInput) -> Hooks {
        if !INITIALIZED.swap(true, Ordering::SeqCst) {
            tracing::info!(
                target: "kilocode::plugin",
                "{} Plugin initialized",
                self.provider.settings().display_name
            );
        }

        Hooks {
            config: Arc::new(self.provider.clone()),
        }
    }
}

/// Default plugin entry point
pub fn kilocode_provider_plugin(input: PluginInput) -> Hooks {
    KiloCodeProviderPlugin::new().init(&input)
}

/// Whether the plugin has been invoked in this process
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}
