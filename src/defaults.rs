//! Default Configuration Values
//!
//! This module centralizes the fixed values used when registering the Kilo Code
//! provider. Having them in one place keeps the header set, the provider entry
//! and the catalog client in agreement.

/// Kilo Code client identity
pub mod identity {
    /// Version reported to both the catalog API and the Kilo Code gateway
    pub const VERSION: &str = "4.91.0";

    /// User-Agent sent with every request
    pub const USER_AGENT: &str = "Kilo-Code/4.91.0";

    /// Value of the `HTTP-Referer` header
    pub const REFERER: &str = "https://kilocode.ai";

    /// Value of the `X-Title` header
    pub const TITLE: &str = "Kilo Code";
}

/// Provider entry written into the host configuration
pub mod provider {
    /// Key under `provider` in the host configuration
    pub const NAME: &str = "kilocode.ai";

    /// Human readable provider name
    pub const DISPLAY_NAME: &str = "Kilocode.ai Unofficial";

    /// Configuration schema the entry conforms to
    pub const SCHEMA: &str = "https://opencode.ai/config.json";

    /// SDK package the host loads to talk to the provider
    pub const NPM_PACKAGE: &str = "@ai-sdk/openai-compatible";

    /// OpenRouter-compatible gateway exposed by Kilo Code
    pub const BASE_URL: &str = "https://kilocode.ai/api/openrouter";
}

/// Model catalog endpoint
pub mod catalog {
    /// OpenRouter model listing
    pub const MODELS_URL: &str = "https://openrouter.ai/api/v1/models";

    /// Overrides [`MODELS_URL`] when set
    pub const MODELS_URL_ENV: &str = "KILOCODE_MODELS_URL";
}

/// Credential lookup
pub mod credentials {
    /// Environment variable holding the Kilo Code API key
    pub const API_KEY_ENV: &str = "KILOCODE_API_KEY";

    /// Where users obtain an API key
    pub const HELP_URL: &str = "https://app.kilocode.ai/profile";
}

/// Logging environment variables
pub mod logging {
    pub const LEVEL_ENV: &str = "KILOCODE_LOG_LEVEL";
    pub const FORMAT_ENV: &str = "KILOCODE_LOG_FORMAT";
    pub const FILE_ENV: &str = "KILOCODE_LOG_FILE";
}
