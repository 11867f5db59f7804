//! Error types for the gift suggestion endpoint.

use serde_json::Value;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a single gift request can fail.
///
/// Each variant is turned into exactly one HTTP response by
/// [`crate::http::error_into_response`]; none of them is fatal to the process.
#[derive(Error, Debug)]
pub enum Error {
    /// The endpoint only accepts POST.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// No backend credential configured.
    #[error("Missing {0} in environment variables.")]
    MissingConfiguration(&'static str),

    /// Inbound body is not a JSON object of the expected shape.
    #[error("Invalid JSON body.")]
    InvalidBody(String),

    /// Transport-level failure talking to the backend.
    #[error("Failed to call backend.")]
    BackendUnreachable { details: String },

    /// The backend answered with a non-success status.
    #[error("{message}")]
    BackendRejected {
        status: u16,
        message: String,
        raw: Value,
    },

    /// The generated text is not JSON, even after brace recovery.
    #[error("AI response could not be parsed.")]
    UpstreamFormat { raw: String },

    /// The generated JSON does not carry a usable `gifts` array.
    #[error("Unexpected response format.")]
    UpstreamShape { raw: Value, reason: Option<String> },
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MethodNotAllowed => 405,
            Error::InvalidBody(_) => 400,
            Error::MissingConfiguration(_) | Error::BackendUnreachable { .. } => 500,
            Error::BackendRejected { status, .. } => *status,
            Error::UpstreamFormat { .. } | Error::UpstreamShape { .. } => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::MethodNotAllowed.status_code(), 405);
        assert_eq!(Error::InvalidBody("EOF".to_string()).status_code(), 400);
        assert_eq!(Error::MissingConfiguration("GEMINI_API_KEY").status_code(), 500);
        assert_eq!(
            Error::BackendRejected {
                status: 429,
                message: "Resource exhausted".to_string(),
                raw: Value::Null,
            }
            .status_code(),
            429
        );
        assert_eq!(Error::UpstreamFormat { raw: String::new() }.status_code(), 502);
    }

    #[test]
    fn test_missing_configuration_message_names_variable() {
        let err = Error::MissingConfiguration("GEMINI_API_KEY");
        assert_eq!(
            err.to_string(),
            "Missing GEMINI_API_KEY in environment variables."
        );
    }
}
