//! Shared validation helpers for inbound HTTP adapters.
//!
//! Turns path segments, JSON extractor failures, and domain validation
//! errors into `InvalidRequest` errors with structured details.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UserId, UserValidationError};

/// Generic message for bodies that are not valid JSON for the endpoint.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request";

/// Parse the `{id}` path segment into a [`UserId`].
///
/// # Examples
/// ```
/// use users_api::inbound::http::validation::parse_user_id;
///
/// assert!(parse_user_id("12").is_ok());
/// assert!(parse_user_id("twelve").is_err());
/// ```
pub fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|err| {
        debug!(value = raw, "rejected user id path segment");
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "value": raw,
            "code": err.code(),
        }))
    })
}

/// Map a domain validation failure onto a client error naming the field.
pub fn map_user_validation_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

/// `JsonConfig` error handler: malformed or incomplete bodies become a
/// generic `InvalidRequest` without echoing parser internals.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let code = match err {
        JsonPayloadError::ContentType => "unsupported_content_type",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "body_too_large"
        }
        _ => "invalid_json",
    };
    Error::invalid_request(INVALID_BODY_MESSAGE)
        .with_details(json!({ "code": code }))
        .into()
}
