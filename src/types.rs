//! Shared data types
//!
//! Field names follow the host configuration format (`baseURL`, `apiKey`) so
//! that a serialized [`ProviderConfig`] can be dropped into the host's
//! `provider` mapping as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display information for one model identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Human-readable model name, e.g. `"OpenAI: GPT-5"`
    pub name: String,
}

impl ModelInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Model id (e.g. `"openai/gpt-5"`) to display information
pub type AvailableModels = BTreeMap<String, ModelInfo>;

/// Connection options of a provider entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOptions {
    #[serde(rename = "baseURL")]
    pub base_url: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub headers: BTreeMap<String, String>,
}

/// Provider entry injected into the host configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub schema: String,
    pub npm: String,
    pub name: String,
    pub options: ProviderOptions,
    pub models: AvailableModels,
}

/// Outcome of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The provider entry was inserted
    Registered,
    /// An entry already existed under the provider key; nothing changed
    AlreadyConfigured,
}

impl Registration {
    pub const fn is_registered(&self) -> bool {
        matches!(self, Self::Registered)
    }
}
