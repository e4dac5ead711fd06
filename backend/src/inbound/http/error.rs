//! HTTP mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into the API's single error envelope and
//! the matching status code.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Error envelope shared by every failure response.
///
/// The `stack` field is always present and is `null` outside development
/// builds; in debug builds it carries the internal detail attached to the
/// error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub error: String,
    /// Internal detail, development builds only.
    pub stack: Option<String>,
}

impl ErrorBody {
    fn from_error(err: &Error) -> Self {
        let redact = matches!(err.code(), ErrorCode::Internal) && !cfg!(debug_assertions);
        Self {
            error: if redact {
                "Internal server error".to_owned()
            } else {
                err.message().to_owned()
            },
            stack: if cfg!(debug_assertions) {
                err.detail().map(ToOwned::to_owned)
            } else {
                None
            },
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        // The observed API reports uniqueness violations as 400, not 409.
        ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::Internal) {
            error!(error = %self, detail = ?self.detail(), "internal error surfaced to client");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody::from_error(self))
    }
}

/// Map JSON payload failures (malformed bodies, wrong content type) into the
/// shared error envelope instead of Actix's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(err.to_string()).into()
}
