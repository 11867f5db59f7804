//! Request and response models for gift suggestions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::{Error, Result};

/// Number of ideas the backend is asked for.
pub const GIFT_COUNT: usize = 10;

/// Where the gift should be obtainable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    Online,
    Offline,
    #[default]
    Either,
}

impl Delivery {
    /// Resolve a free-form preference; anything unrecognised means `Either`.
    pub fn resolve(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("online") => Delivery::Online,
            Some("offline") => Delivery::Offline,
            _ => Delivery::Either,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Delivery::Online => "online",
            Delivery::Offline => "offline",
            Delivery::Either => "either",
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gift request payload as sent by the client.
///
/// Every field is optional; see [`GiftRequest::normalize`] for the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GiftRequest {
    pub delivery: Option<String>,
    pub occasion: Option<String>,
    pub recipient: Option<String>,
    pub gender: Option<String>,
    pub interests: Option<Vec<String>>,
    pub budget: Option<String>,
    pub vibe: Option<String>,
}

/// A gift request with every default applied, ready for prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftPreferences {
    pub delivery: Delivery,
    pub occasion: String,
    pub recipient: String,
    pub gender: String,
    pub interests: Vec<String>,
    /// Raw budget key; resolved against the [`BudgetTable`] when prompting.
    pub budget: Option<String>,
    pub vibe: String,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl GiftRequest {
    /// Decode a request body, which must be a JSON object.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| Error::InvalidBody(e.to_string()))?;
        if !value.is_object() {
            return Err(Error::InvalidBody("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| Error::InvalidBody(e.to_string()))
    }

    /// Apply defaults: blank strings count as absent.
    pub fn normalize(self) -> GiftPreferences {
        GiftPreferences {
            delivery: Delivery::resolve(self.delivery.as_deref()),
            occasion: present(self.occasion).unwrap_or_else(|| "unspecified".to_string()),
            recipient: present(self.recipient).unwrap_or_else(|| "unspecified".to_string()),
            gender: present(self.gender).unwrap_or_else(|| "prefer-not".to_string()),
            interests: self
                .interests
                .unwrap_or_default()
                .into_iter()
                .filter_map(|i| present(Some(i)))
                .collect(),
            budget: present(self.budget),
            vibe: present(self.vibe).unwrap_or_else(|| "thoughtful".to_string()),
        }
    }
}

/// Fixed mapping from budget keys to human-readable INR ranges.
#[derive(Debug, Clone)]
pub struct BudgetTable {
    entries: Vec<(&'static str, &'static str)>,
    /// Label used for unknown or missing keys.
    fallback: &'static str,
}

impl Default for BudgetTable {
    fn default() -> Self {
        Self {
            entries: vec![
                ("under-500", "under ₹500"),
                ("500-1000", "₹500–₹1,000"),
                ("1000-2000", "₹1,000–₹2,000"),
                ("2000-5000", "₹2,000–₹5,000"),
                ("5000-plus", "₹5,000+"),
            ],
            fallback: "₹1,000–₹2,000",
        }
    }
}

impl BudgetTable {
    /// Label for a budget key, falling back to the mid tier.
    pub fn label(&self, key: Option<&str>) -> &'static str {
        key.and_then(|key| self.entries.iter().find(|(k, _)| *k == key))
            .map_or(self.fallback, |(_, label)| *label)
    }
}

/// One suggested gift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftIdea {
    pub title: String,
    pub price_range_inr: String,
    pub why: String,
    pub buy_query: String,
    pub delivery_fit: Delivery,
}

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftResponse {
    pub gifts: Vec<GiftIdea>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
