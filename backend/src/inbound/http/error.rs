//! Actix rendering of domain errors.
//!
//! Every failure leaves the service as the JSON error envelope, with a
//! status derived from its code and the request's `trace-id` header.
//! Store failures keep their code and trace id, but anything that could name
//! tables, queries, or connection targets is withheld from clients.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Client-facing message for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl From<ErrorCode> for StatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The payload a client may see for `error`.
///
/// Client errors pass through untouched. An outage keeps its message but
/// drops details, and an internal error is replaced wholesale.
fn client_view(error: &Error) -> Cow<'_, Error> {
    let scrubbed = match error.code() {
        ErrorCode::InternalError => Error::internal(INTERNAL_ERROR_MESSAGE),
        ErrorCode::ServiceUnavailable if error.details().is_some() => {
            Error::service_unavailable(error.message())
        }
        _ => return Cow::Borrowed(error),
    };

    Cow::Owned(match error.trace_id() {
        Some(id) => scrubbed.with_trace_id(id.to_owned()),
        None => scrubbed,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code().into()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(client_view(self).as_ref())
    }
}
