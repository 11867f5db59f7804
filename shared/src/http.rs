//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::models::ErrorResponse;
use crate::Error;

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))?)
}

/// Create a plain-text response.
pub fn text_response(status: u16, text: &str) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "text/plain; charset=utf-8")
        .body(Body::from(text.to_string()))?)
}

/// Create an error response with the given status code and message.
pub fn error_response(status: u16, message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(
        status,
        &ErrorResponse {
            error: message.into(),
            raw: None,
            details: None,
        },
    )
}

/// Render a request failure as its HTTP response, logging it once.
pub fn error_into_response(err: Error) -> Result<Response<Body>, lambda_http::Error> {
    let status = err.status_code();
    if status >= 500 {
        error!(status, error = ?err, "Request failed");
    } else {
        warn!(status, error = ?err, "Request rejected");
    }

    let message = err.to_string();
    let body = match err {
        Error::MethodNotAllowed => return text_response(status, &message),
        Error::BackendUnreachable { details } => ErrorResponse {
            error: message,
            raw: None,
            details: Some(details),
        },
        Error::BackendRejected { raw, .. } => ErrorResponse {
            error: message,
            raw: Some(raw),
            details: None,
        },
        Error::UpstreamFormat { raw } => ErrorResponse {
            error: message,
            raw: Some(serde_json::Value::String(raw)),
            details: None,
        },
        Error::UpstreamShape { raw, reason } => ErrorResponse {
            error: message,
            raw: Some(raw),
            details: reason,
        },
        Error::MissingConfiguration(_) | Error::InvalidBody(_) => return error_response(status, message),
    };

    json_response(status, &body)
}
