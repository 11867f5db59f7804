//! Shared library for the GiftGenie Lambda functions.
//!
//! This crate provides the request pipeline, backend client, and types used by
//! the gift suggestion endpoint.

pub mod config;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod handler;
pub mod http;
pub mod models;
pub mod prompt;

pub use config::{Config, GenerationConfig, GiftValidation};
pub use error::{Error, Result};
pub use extract::{extract_gifts, parse_generated_json, JsonStrategy};
pub use gemini::GeminiClient;
pub use handler::GiftService;
pub use models::{BudgetTable, Delivery, GiftIdea, GiftPreferences, GiftRequest, GiftResponse};
pub use prompt::build_prompt;
