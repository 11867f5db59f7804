//! Extraction and validation of the backend's generated text.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::GiftValidation;
use crate::models::{GiftResponse, GIFT_COUNT};
use crate::{Error, Result};

/// Maximum number of characters of raw backend text echoed back to callers.
pub const RAW_EXCERPT_CHARS: usize = 2000;

/// How the generated JSON was recovered from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStrategy {
    /// The whole text parsed as JSON.
    Strict,
    /// Only the span from the first `{` to the last `}` parsed.
    BraceSlice,
}

/// Concatenate `candidates[0].content.parts[*].text`.
///
/// Missing or malformed structure yields an empty string.
pub fn generated_text(payload: &Value) -> String {
    payload
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

/// Parse generated text as JSON, strictly first, then by brace slicing.
pub fn parse_generated_json(text: &str) -> Option<(Value, JsonStrategy)> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some((value, JsonStrategy::Strict));
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    serde_json::from_str(&text[start..=end])
        .ok()
        .map(|value| (value, JsonStrategy::BraceSlice))
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Turn a backend payload into the JSON body relayed to the caller.
pub fn extract_gifts(payload: &Value, validation: GiftValidation) -> Result<Value> {
    let text = generated_text(payload);

    let (parsed, strategy) = parse_generated_json(&text).ok_or_else(|| Error::UpstreamFormat {
        raw: truncate_chars(&text, RAW_EXCERPT_CHARS),
    })?;
    debug!(?strategy, text_len = text.len(), "Parsed generated JSON");

    validate_shape(parsed, validation)
}

fn validate_shape(parsed: Value, validation: GiftValidation) -> Result<Value> {
    if !parsed.get("gifts").is_some_and(Value::is_array) {
        return Err(Error::UpstreamShape {
            raw: parsed,
            reason: None,
        });
    }

    let reason = match validation {
        GiftValidation::Lenient => None,
        GiftValidation::Strict => match GiftResponse::deserialize(&parsed) {
            Ok(response) if response.gifts.len() == GIFT_COUNT => None,
            Ok(response) => Some(format!(
                "expected {} gifts, got {}",
                GIFT_COUNT,
                response.gifts.len()
            )),
            Err(e) => Some(format!("malformed gift: {}", e)),
        },
    };

    match reason {
        Some(reason) => Err(Error::UpstreamShape {
            raw: parsed,
            reason: Some(reason),
        }),
        None => Ok(parsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_with(parts: &[&str]) -> Value {
        let parts: Vec<Value> = parts.iter().map(|t| json!({ "text": t })).collect();
        json!({ "candidates": [{ "content": { "role": "model", "parts": parts } }] })
    }

    fn gift(n: usize) -> Value {
        json!({
            "title": format!("Gift {}", n),
            "price_range_inr": "₹1,000–₹1,500",
            "why": "They will love it",
            "buy_query": "gift online india",
            "delivery_fit": "online"
        })
    }

    #[test]
    fn test_generated_text_joins_parts() {
        let payload = payload_with(&[r#"{"gifts":"#, " []}"]);
        assert_eq!(generated_text(&payload), r#"{"gifts": []}"#);
    }

    #[test]
    fn test_generated_text_tolerates_malformed_payloads() {
        assert_eq!(generated_text(&Value::Null), "");
        assert_eq!(generated_text(&json!({ "candidates": [] })), "");
        assert_eq!(generated_text(&json!({ "candidates": [{ "content": 3 }] })), "");
        assert_eq!(
            generated_text(&json!({ "candidates": [{ "content": { "parts": [{ "text": 7 }, { "text": "ok" }] } }] })),
            "ok"
        );
    }

    #[test]
    fn test_strict_parse_preferred() {
        let (value, strategy) = parse_generated_json(r#"{"gifts": []}"#).unwrap();
        assert_eq!(strategy, JsonStrategy::Strict);
        assert_eq!(value, json!({ "gifts": [] }));
    }

    #[test]
    fn test_brace_slice_recovers_embedded_json() {
        let (value, strategy) = parse_generated_json(r#"Sure! {"gifts": []} thanks"#).unwrap();
        assert_eq!(strategy, JsonStrategy::BraceSlice);
        assert_eq!(value, json!({ "gifts": [] }));

        let fenced = "```json\n{\"gifts\": [{\"title\": \"Kettle\"}]}\n```";
        let (value, _) = parse_generated_json(fenced).unwrap();
        assert_eq!(value["gifts"][0]["title"], "Kettle");
    }

    #[test]
    fn test_unparseable_text() {
        assert!(parse_generated_json("I cannot help with that.").is_none());
        assert!(parse_generated_json("} backwards {").is_none());
        assert!(parse_generated_json("{ not json }").is_none());
        assert!(parse_generated_json("").is_none());
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "₹".repeat(RAW_EXCERPT_CHARS + 5);
        let excerpt = truncate_chars(&text, RAW_EXCERPT_CHARS);
        assert_eq!(excerpt.chars().count(), RAW_EXCERPT_CHARS);
        assert_eq!(truncate_chars("short", RAW_EXCERPT_CHARS), "short");
    }

    #[test]
    fn test_prose_fails_with_truncated_excerpt() {
        let prose = "no braces here ".repeat(500);
        let err = extract_gifts(&payload_with(&[&prose]), GiftValidation::Lenient).unwrap_err();
        match err {
            Error::UpstreamFormat { raw } => assert_eq!(raw.chars().count(), RAW_EXCERPT_CHARS),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_lenient_accepts_any_gifts_array() {
        let payload = payload_with(&[r#"Sure! {"gifts": []} thanks"#]);
        let value = extract_gifts(&payload, GiftValidation::Lenient).unwrap();
        assert_eq!(value, json!({ "gifts": [] }));
    }

    #[test]
    fn test_missing_gifts_is_shape_error() {
        for text in [r#"{"ideas": []}"#, r#"{"gifts": "none"}"#, "[1, 2]"] {
            let err = extract_gifts(&payload_with(&[text]), GiftValidation::Lenient).unwrap_err();
            assert!(matches!(err, Error::UpstreamShape { reason: None, .. }), "{}", text);
        }
    }

    #[test]
    fn test_strict_requires_ten_well_formed_gifts() {
        let ten: Vec<Value> = (0..10).map(gift).collect();
        let body = json!({ "gifts": ten }).to_string();
        let value = extract_gifts(&payload_with(&[&body]), GiftValidation::Strict).unwrap();
        assert_eq!(value["gifts"].as_array().unwrap().len(), 10);

        let nine: Vec<Value> = (0..9).map(gift).collect();
        let body = json!({ "gifts": nine }).to_string();
        let err = extract_gifts(&payload_with(&[&body]), GiftValidation::Strict).unwrap_err();
        assert!(matches!(err, Error::UpstreamShape { reason: Some(_), .. }));

        let mut broken: Vec<Value> = (0..10).map(gift).collect();
        broken[4] = json!({ "title": "Half a gift" });
        let body = json!({ "gifts": broken }).to_string();
        match extract_gifts(&payload_with(&[&body]), GiftValidation::Strict).unwrap_err() {
            Error::UpstreamShape { reason, .. } => {
                assert!(reason.unwrap().starts_with("malformed gift:"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_strict_relays_value_unchanged() {
        let mut gifts: Vec<Value> = (0..10).map(gift).collect();
        gifts[0]["rating"] = json!(5);
        let body = json!({ "gifts": gifts, "note": "curated" });
        let value = extract_gifts(&payload_with(&[&body.to_string()]), GiftValidation::Strict).unwrap();
        assert_eq!(value, body);
    }
}
