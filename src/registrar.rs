//! Provider Registrar
//!
//! Builds the Kilo Code provider entry and merges it into the host
//! configuration. The entry is written at most once per configuration object:
//! a value under the provider key is left untouched unless it is absent
//! (`null`, `false`, `0` or `""`).

use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::{AVAILABLE_MODELS, ModelCatalog};
use crate::credentials::{api_key_from, log_api_key_status_for, redact, validate_api_key_from};
use crate::defaults;
use crate::error::ProviderError;
use crate::types::{AvailableModels, ProviderConfig, ProviderOptions, Registration};

/// Name of the provider sub-mapping in the host configuration
pub const PROVIDER_SECTION: &str = "provider";

/// Identity of the provider entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Key under `provider`
    pub name: String,
    pub display_name: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: defaults::provider::NAME.to_string(),
            display_name: defaults::provider::DISPLAY_NAME.to_string(),
            base_url: defaults::provider::BASE_URL.to_string(),
            api_key_env: defaults::credentials::API_KEY_ENV.to_string(),
        }
    }
}

impl ProviderSettings {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key_env(mut self, env_var: impl Into<String>) -> Self {
        self.api_key_env = env_var.into();
        self
    }
}

/// Where the registered entry takes its model list from
#[derive(Debug, Clone, Default)]
pub enum ModelSource {
    /// The built-in table
    #[default]
    Fallback,
    /// A memoizing catalog, fetched on first registration
    Live(Arc<ModelCatalog>),
}

impl ModelSource {
    pub async fn models(&self) -> AvailableModels {
        match self {
            Self::Fallback => AVAILABLE_MODELS.clone(),
            Self::Live(catalog) => catalog.get_available_models().await.as_ref().clone(),
        }
    }
}

/// HTTP headers the host sends to the Kilo Code gateway
pub fn create_headers(api_key: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Authorization".to_string(), format!("Bearer {api_key}")),
        (
            "X-KiloCode-Version".to_string(),
            defaults::identity::VERSION.to_string(),
        ),
        (
            "User-Agent".to_string(),
            defaults::identity::USER_AGENT.to_string(),
        ),
        (
            "HTTP-Referer".to_string(),
            defaults::identity::REFERER.to_string(),
        ),
        ("X-Title".to_string(), defaults::identity::TITLE.to_string()),
    ])
}

/// Provider entry for the given settings, key and models
pub fn build_provider_config(
    settings: &ProviderSettings,
    api_key: &str,
    models: AvailableModels,
) -> ProviderConfig {
    ProviderConfig {
        schema: defaults::provider::SCHEMA.to_string(),
        npm: defaults::provider::NPM_PACKAGE.to_string(),
        name: settings.display_name.clone(),
        options: ProviderOptions {
            base_url: settings.base_url.clone(),
            api_key: api_key.to_string(),
            headers: create_headers(api_key),
        },
        models,
    }
}

/// Default provider entry: environment key (or its placeholder) and the built-in table
pub fn create_kilocode_provider_config() -> ProviderConfig {
    let settings = ProviderSettings::default();
    let api_key = api_key_from(&settings.api_key_env);
    build_provider_config(&settings, &api_key, AVAILABLE_MODELS.clone())
}

/// Registers the Kilo Code provider into host configurations
#[derive(Debug, Clone, Default)]
pub struct KiloCodeProvider {
    settings: ProviderSettings,
    models: ModelSource,
}

impl KiloCodeProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            models: ModelSource::default(),
        }
    }

    pub fn with_model_source(mut self, source: ModelSource) -> Self {
        self.models = source;
        self
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    pub fn model_source(&self) -> &ModelSource {
        &self.models
    }

    /// Merge the provider entry into `config`
    ///
    /// The credential check runs first and leaves `config` untouched on
    /// failure. A `null`, `false`, `0` or `""` value counts as absent, both for
    /// the `provider` section and for the entry under the provider key: an
    /// absent section is created and an absent entry is written. Any other
    /// entry value makes this a no-op. A present `provider` section that is not
    /// an object is a [`ProviderError::ConfigurationError`].
    pub async fn configure(&self, config: &mut Value) -> Result<Registration, ProviderError> {
        let api_key = validate_api_key_from(&self.settings.api_key_env)?;

        let root = config.as_object_mut().ok_or_else(|| {
            ProviderError::ConfigurationError("host configuration must be a JSON object".to_string())
        })?;

        let section = root
            .entry(PROVIDER_SECTION)
            .or_insert_with(|| Value::Object(Map::new()));
        if is_absent(section) {
            *section = Value::Object(Map::new());
        }
        let providers = section.as_object_mut().ok_or_else(|| {
            ProviderError::ConfigurationError(format!(
                "`{PROVIDER_SECTION}` must be a JSON object"
            ))
        })?;

        if providers
            .get(&self.settings.name)
            .is_some_and(|entry| !is_absent(entry))
        {
            tracing::debug!(
                target: "kilocode::registrar",
                provider = %self.settings.name,
                "provider already configured"
            );
            return Ok(Registration::AlreadyConfigured);
        }

        log_api_key_status_for(&self.settings.api_key_env);
        tracing::debug!(
            target: "kilocode::registrar",
            provider = %self.settings.name,
            key = %redact(&api_key),
            "building provider entry"
        );

        let entry = build_provider_config(
            &self.settings,
            api_key.expose_secret(),
            self.models.models().await,
        );
        providers.insert(self.settings.name.clone(), serde_json::to_value(entry)?);

        tracing::info!(
            target: "kilocode::registrar",
            provider = %self.settings.name,
            "{} provider successfully configured",
            self.settings.display_name
        );
        Ok(Registration::Registered)
    }
}

/// Host values that count as "not configured"
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Register the default Kilo Code provider into `config`
pub async fn configure_kilocode_provider(config: &mut Value) -> Result<Registration, ProviderError> {
    KiloCodeProvider::default().configure(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn headers_are_fixed_except_authorization() {
        let headers = create_headers("sk-test-123");
        assert_eq!(headers.len(), 6);
        assert_eq!(headers["Authorization"], "Bearer sk-test-123");
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["X-KiloCode-Version"], "4.91.0");
        assert_eq!(headers["User-Agent"], "Kilo-Code/4.91.0");
        assert_eq!(headers["HTTP-Referer"], "https://kilocode.ai");
        assert_eq!(headers["X-Title"], "Kilo Code");
    }

    #[test]
    fn provider_config_shape() {
        let config = build_provider_config(
            &ProviderSettings::default(),
            "sk-test-123",
            AVAILABLE_MODELS.clone(),
        );
        assert_eq!(config.schema, "https://opencode.ai/config.json");
        assert_eq!(config.npm, "@ai-sdk/openai-compatible");
        assert_eq!(config.name, "Kilocode.ai Unofficial");
        assert_eq!(config.options.base_url, "https://kilocode.ai/api/openrouter");
        assert_eq!(config.options.api_key, "sk-test-123");
        assert_eq!(config.models, *AVAILABLE_MODELS);
    }

    #[test]
    fn settings_builder() {
        let settings = ProviderSettings::default()
            .with_name("kilo-staging")
            .with_base_url("https://staging.example/api")
            .with_api_key_env("KILO_STAGING_KEY");
        assert_eq!(settings.name, "kilo-staging");
        assert_eq!(settings.display_name, "Kilocode.ai Unofficial");
        assert_eq!(settings.api_key_env, "KILO_STAGING_KEY");
    }

    #[test]
    fn absent_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(is_absent(&value), "{value} should count as absent");
        }
        for value in [json!(true), json!(1), json!("x"), json!([]), json!({})] {
            assert!(!is_absent(&value), "{value} should count as present");
        }
    }

    #[tokio::test]
    async fn fallback_source_serves_static_table() {
        assert_eq!(ModelSource::Fallback.models().await, *AVAILABLE_MODELS);
    }
}
