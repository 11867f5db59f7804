//! The gift suggestion request handler.
//!
//! [`GiftService::handle`] runs the whole pipeline for one request: method
//! check, configuration check, body decoding, prompt construction, one backend
//! call, and response extraction. Every failure becomes a response here, so
//! hosting adapters only ever see `Ok` unless an HTTP response cannot be built.

use lambda_http::http::Method;
use lambda_http::{Body, Request, Response};
use serde_json::Value;
use tracing::info;

use crate::config::{Config, API_KEY_VAR};
use crate::extract::extract_gifts;
use crate::gemini::GeminiClient;
use crate::http::{error_into_response, json_response};
use crate::models::{BudgetTable, GiftRequest};
use crate::prompt::build_prompt;
use crate::{Error, Result};

/// Application state shared across requests.
pub struct GiftService {
    config: Config,
    budgets: BudgetTable,
    client: GeminiClient,
}

impl GiftService {
    /// Create the service from configuration loaded at start-up.
    pub fn new(config: Config) -> Self {
        let client = GeminiClient::new(reqwest::Client::new(), &config);
        Self {
            config,
            budgets: BudgetTable::default(),
            client,
        }
    }

    /// Handle one inbound request.
    pub async fn handle(&self, event: Request) -> std::result::Result<Response<Body>, lambda_http::Error> {
        match self.suggest(event.method(), event.body().as_ref()).await {
            Ok(gifts) => json_response(200, &gifts),
            Err(e) => error_into_response(e),
        }
    }

    async fn suggest(&self, method: &Method, body: &[u8]) -> Result<Value> {
        if *method != Method::POST {
            return Err(Error::MethodNotAllowed);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(Error::MissingConfiguration(API_KEY_VAR))?;

        let prefs = GiftRequest::from_slice(body)?.normalize();
        info!(
            delivery = %prefs.delivery,
            interests = prefs.interests.len(),
            "Generating gift suggestions"
        );

        let prompt = build_prompt(&prefs, &self.budgets);
        let payload = self.client.generate(api_key, &prompt).await?;
        let gifts = extract_gifts(&payload, self.config.validation)?;

        info!(
            gift_count = gifts["gifts"].as_array().map_or(0, Vec::len),
            "Gift suggestions ready"
        );
        Ok(gifts)
    }
}
