//! HTTP mapping for ledger errors.
//!
//! The domain error stays transport agnostic; this module picks status codes
//! and renders `{"errors": "<message>"}` bodies. Internal failures are logged
//! in full and redacted on the wire.

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{ErrorCode, StoreError};
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

const REDACTED_MESSAGE: &str = "internal error";

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    #[schema(example = "user `bob` not found")]
    pub errors: String,
}

/// Failure produced by an HTTP handler or extractor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A use case failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The caller identity headers are missing or malformed.
    #[error("{message}")]
    Unauthenticated { message: String },
    /// The request could not be decoded.
    #[error("{message}")]
    BadRequest { message: String },
}

impl ApiError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Store(inner) if inner.code() == ErrorCode::InternalError => {
                REDACTED_MESSAGE.to_owned()
            }
            other => other.to_string(),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::NotFound | ErrorCode::FailedPrecondition => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(inner) => status_for(inner.code()),
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(trace_id) = TraceId::current() {
            if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
                builder.insert_header((HeaderName::from_static(TRACE_ID_HEADER), value));
            }
        }
        builder.json(ErrorBody {
            errors: self.public_message(),
        })
    }
}
