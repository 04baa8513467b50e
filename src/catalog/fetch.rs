//! Live catalog retrieval from the OpenRouter models API

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde_json::Value;

use super::config::CatalogConfig;
use super::fallback::fallback_models;
use super::observer::FetchFailure;
use crate::error::ProviderError;
use crate::types::{AvailableModels, ModelInfo};

/// Fetch the catalog, propagating any failure
///
/// A body without a `data` array yields an empty map, not an error.
pub async fn try_fetch_models(config: &CatalogConfig) -> Result<AvailableModels, ProviderError> {
    let client = config.client()?;

    let mut request = client
        .get(&config.models_url)
        .header(CONTENT_TYPE, "application/json")
        .header(USER_AGENT, &config.user_agent);
    if let Some(timeout) = config.timeout {
        request = request.timeout(timeout);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::api_error(
            status.as_u16(),
            format!("Failed to fetch models: {}", status.as_u16()),
        ));
    }

    let text = response
        .text()
        .await
        .map_err(|e| ProviderError::HttpError(format!("Failed to read models response: {e}")))?;
    let body: Value = serde_json::from_str(&text)
        .map_err(|e| ProviderError::ParseError(format!("Failed to parse models response: {e}")))?;

    Ok(parse_models_response(&body))
}

/// Fetch the catalog, returning the fallback table on any failure
pub async fn fetch_available_models(config: &CatalogConfig) -> AvailableModels {
    match try_fetch_models(config).await {
        Ok(models) => {
            config.observer.on_fetch_success(&config.models_url, models.len());
            models
        }
        Err(error) => {
            let failure = FetchFailure::from(&error);
            tracing::warn!(
                target: "kilocode::catalog",
                url = %config.models_url,
                kind = failure.kind(),
                status = error.status_code(),
                err = %error,
                "Failed to fetch models from OpenRouter, using fallback"
            );
            config.observer.on_fetch_failure(&config.models_url, &failure);
            fallback_models()
        }
    }
}

/// Keep `id -> name` for every `data[]` entry that has both
pub fn parse_models_response(body: &Value) -> AvailableModels {
    let Some(entries) = body.get("data").and_then(Value::as_array) else {
        return AvailableModels::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = non_empty_str(entry.get("id"))?;
            let name = non_empty_str(entry.get("name"))?;
            Some((id.to_string(), ModelInfo::new(name)))
        })
        .collect()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_only_id_and_name() {
        let body = json!({
            "data": [
                {
                    "id": "openai/gpt-5",
                    "name": "OpenAI: GPT-5",
                    "context_length": 400000,
                    "pricing": { "prompt": "0.00000125" }
                },
                { "id": "x-ai/grok-4", "name": "xAI: Grok 4" }
            ]
        });

        let models = parse_models_response(&body);
        assert_eq!(models.len(), 2);
        assert_eq!(models["openai/gpt-5"], ModelInfo::new("OpenAI: GPT-5"));
        assert_eq!(
            serde_json::to_value(&models["x-ai/grok-4"]).unwrap(),
            json!({ "name": "xAI: Grok 4" })
        );
    }

    #[test]
    fn skips_entries_missing_id_or_name() {
        let body = json!({
            "data": [
                { "id": "a/one" },
                { "name": "Nameless" },
                { "id": "", "name": "Empty id" },
                { "id": "a/two", "name": "" },
                { "id": 42, "name": "Numeric id" },
                { "id": "a/three", "name": "Three" },
                "not-an-object"
            ]
        });

        let models = parse_models_response(&body);
        assert_eq!(models.len(), 1);
        assert!(models.contains_key("a/three"));
    }

    #[test]
    fn missing_or_non_array_data_is_empty() {
        assert!(parse_models_response(&json!({})).is_empty());
        assert!(parse_models_response(&json!({ "data": { "id": "x" } })).is_empty());
        assert!(parse_models_response(&json!({ "data": null })).is_empty());
        assert!(parse_models_response(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn later_duplicate_id_wins() {
        let body = json!({
            "data": [
                { "id": "dup", "name": "First" },
                { "id": "dup", "name": "Second" }
            ]
        });
        assert_eq!(parse_models_response(&body)["dup"].name, "Second");
    }
}
