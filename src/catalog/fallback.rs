//! Built-in model table used when the live catalog is unavailable

use crate::types::{AvailableModels, ModelInfo};

const FALLBACK_MODELS: &[(&str, &str)] = &[
    ("openrouter/sonoma-dusk-alpha", "Sonoma Dusk Alpha"),
    ("openrouter/sonoma-sky-alpha", "Sonoma Sky Alpha"),
    ("qwen/qwen3-coder:free", "Qwen: Qwen3 Coder 480B A35B (free)"),
    ("qwen/qwen3-coder", "Qwen: Qwen3 Coder 480B A35B"),
    ("openai/gpt-oss-120b:free", "OpenAI: gpt-oss-120b (free)"),
    ("openai/gpt-oss-120b", "OpenAI: gpt-oss-120b"),
    ("openai/gpt-oss-20b:free", "OpenAI: gpt-oss-20b (free)"),
    ("openai/gpt-oss-20b", "OpenAI: gpt-oss-20b"),
    ("openai/gpt-5", "OpenAI: GPT-5"),
    ("openai/gpt-5-mini", "OpenAI: GPT-5 Mini"),
    ("openai/gpt-5-nano", "OpenAI: GPT-5 Nano"),
    ("x-ai/grok-4", "xAI: Grok 4"),
    ("x-ai/grok-code-fast-1", "xAI: Grok Code Fast 1"),
    ("google/gemini-2.5-flash", "Google: Gemini 2.5 Flash"),
    ("google/gemini-2.5-pro", "Google: Gemini 2.5 Pro"),
    ("anthropic/claude-opus-4", "Anthropic: Claude Opus 4"),
    ("anthropic/claude-sonnet-4", "Anthropic: Claude Sonnet 4"),
    ("openai/gpt-4.1", "OpenAI: GPT-4.1"),
];

/// Fixed catalog of known model identifiers
pub fn fallback_models() -> AvailableModels {
    FALLBACK_MODELS
        .iter()
        .map(|(id, name)| ((*id).to_string(), ModelInfo::new(*name)))
        .collect()
}

lazy_static::lazy_static! {
    /// Fallback table computed once, the default model list of the registered provider
    pub static ref AVAILABLE_MODELS: AvailableModels = fallback_models();
}
