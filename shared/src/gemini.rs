//! Client for the generative-language backend.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::{Config, GenerationConfig};
use crate::extract::{truncate_chars, RAW_EXCERPT_CHARS};
use crate::{Error, Result};

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub role: &'static str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(prompt: &'a str, generation_config: &'a GenerationConfig) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config,
        }
    }
}

/// Client for invoking the text-generation backend.
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    model: String,
    generation: GenerationConfig,
}

impl GeminiClient {
    /// Create a new client from configuration.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            url: config.generate_url(),
            model: config.model.clone(),
            generation: config.generation.clone(),
        }
    }

    /// Send one prompt and return the raw backend payload.
    ///
    /// A success response whose body is not JSON is a `BackendUnreachable` error.
    pub async fn generate(&self, api_key: &str, prompt: &str) -> Result<Value> {
        let request = GenerateRequest::new(prompt, &self.generation);

        let response = self
            .http
            .post(&self.url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| unreachable_error("Backend request failed", e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| unreachable_error("Failed to read backend response", e))?;

        if status.is_success() {
            info!(model = %self.model, status = status.as_u16(), "Backend responded");
            return serde_json::from_slice(&body).map_err(|e| {
                error!("Backend returned a non-JSON body: {}", e);
                Error::BackendUnreachable {
                    details: e.to_string(),
                }
            });
        }

        let raw = serde_json::from_slice(&body).unwrap_or_else(|_| {
            Value::String(truncate_chars(
                &String::from_utf8_lossy(&body),
                RAW_EXCERPT_CHARS,
            ))
        });
        warn!(model = %self.model, status = status.as_u16(), "Backend rejected request");
        Err(rejected_error(status, raw))
    }
}

fn unreachable_error(context: &str, e: reqwest::Error) -> Error {
    // reqwest errors embed the URL, which carries the key; strip it.
    let e = e.without_url();
    error!("{}: {}", context, e);
    Error::BackendUnreachable {
        details: e.to_string(),
    }
}

/// Build the error for a non-success backend response.
fn rejected_error(status: StatusCode, raw: Value) -> Error {
    let reported = raw.get("error");

    let status = reported
        .and_then(|e| e.get("code"))
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .filter(|code| (400..=599).contains(code))
        .or_else(|| {
            let code = status.as_u16();
            (400..=599).contains(&code).then_some(code)
        })
        .unwrap_or(500);

    let message = reported
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or("Backend request failed.")
        .to_string();

    Error::BackendRejected {
        status,
        message,
        raw,
    }
}
