//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning every
//! failure, including actix extractor failures, into the uniform JSON error
//! body and a matching status code.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::{Method, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorKind, FieldViolation};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned in place of server-side failure details.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Envelope discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Success,
    Error,
}

/// One rejected field in an error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorBody {
    pub field: String,
    pub message: String,
    /// The rejected input, `null` when absent.
    #[schema(value_type = Object, nullable = true)]
    pub value: Value,
}

impl From<&FieldViolation> for FieldErrorBody {
    fn from(violation: &FieldViolation) -> Self {
        Self {
            field: violation.field().to_owned(),
            message: violation.message().to_owned(),
            value: violation.value().clone(),
        }
    }
}

/// Uniform error body.
///
/// `code` is the numeric error code rendered as a string; `validations` is
/// empty unless the failure carries field-level detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "result": "ERROR",
    "code": "409",
    "message": "a diary has already been written on this day",
    "validations": []
}))]
pub struct ErrorResponse {
    pub result: ResultCode,
    pub code: String,
    pub message: String,
    pub validations: Vec<FieldErrorBody>,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        let message = if matches!(error.kind(), ErrorKind::Internal) {
            REDACTED_MESSAGE.to_owned()
        } else {
            error.message().to_owned()
        };
        Self {
            result: ResultCode::Error,
            code: error.code().to_string(),
            message,
            validations: error.validations().iter().map(FieldErrorBody::from).collect(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.kind(), ErrorKind::Internal) {
            error!(message = self.message(), trace_id = ?self.trace_id(), "request failed");
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorResponse::from(self))
    }
}

/// `JsonConfig` error handler: unreadable bodies become 400s.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "unreadable request body");
    Error::unreadable_body(err.to_string()).into()
}

/// `QueryConfig` error handler.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "malformed query string");
    Error::bad_request(err.to_string()).into()
}

/// `PathConfig` error handler.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "malformed path parameter");
    Error::bad_request(err.to_string()).into()
}

/// Default service for resources: the method is not supported.
pub async fn method_not_allowed(method: Method) -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed(method.as_str()))
}
