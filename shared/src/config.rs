//! Configuration management for the gift endpoint.

use serde::Serialize;
use std::env;
use tracing::warn;

/// Environment variable holding the backend credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_API_VERSION: &str = "v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// How strictly the backend's `gifts` payload is checked before relaying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GiftValidation {
    /// Only require `gifts` to be an array.
    #[default]
    Lenient,
    /// Also require exactly [`crate::models::GIFT_COUNT`] well-formed ideas.
    Strict,
}

impl GiftValidation {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Sampling settings sent with every backend call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_p: 0.9,
            max_output_tokens: 1200,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API key. Absence is reported per request, not at start-up.
    pub api_key: Option<String>,
    /// Base URL of the generative-language API
    pub api_base: String,
    /// API version path segment
    pub api_version: String,
    /// Model used for generation
    pub model: String,
    /// Response validation mode
    pub validation: GiftValidation,
    /// Fixed sampling settings
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            validation: GiftValidation::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let validation = match var("GIFT_VALIDATION") {
            Some(raw) => GiftValidation::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Unknown GIFT_VALIDATION, using lenient");
                GiftValidation::Lenient
            }),
            None => defaults.validation,
        };

        Self {
            api_key: var(API_KEY_VAR),
            api_base: var("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            api_version: var("GEMINI_API_VERSION").unwrap_or(defaults.api_version),
            model: var("GEMINI_MODEL").unwrap_or(defaults.model),
            validation,
            generation: defaults.generation,
        }
    }

    /// URL of the `generateContent` call, without the key parameter.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.api_base, self.api_version, self.model
        )
    }
}
