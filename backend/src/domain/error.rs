//! Domain-level error types.
//!
//! These errors are transport agnostic. Every failure the service can report
//! belongs to exactly one [`ErrorKind`]; inbound adapters turn the kind into a
//! status code and the uniform error envelope.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::TraceId;

/// Message used for every error that carries field-level violations.
pub const INPUT_CONSTRAINTS_VIOLATED: &str = "input constraints violated";

/// Application-defined business failure codes.
///
/// The numeric [`BusinessCode::code`] doubles as the HTTP status so the
/// envelope's `code` field stays meaningful to clients that only read the
/// status line. New rules add variants; callers must not match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessCode {
    /// The member already has a diary entry for the requested day.
    DiaryAlreadyWritten,
    /// Diary entries cannot be written for days that have not started yet.
    FutureDiaryDate,
    /// No diary entry exists with the requested identifier.
    DiaryNotFound,
    /// The diary entry belongs to another member.
    DiaryAccessDenied,
    /// A member identifier was zero or negative.
    InvalidMemberId,
    /// The token subject does not resolve to a known member.
    MemberNotFound,
    /// The request carried no bearer token.
    MissingToken,
    /// The bearer token failed signature, issuer, or shape checks.
    InvalidToken,
    /// The bearer token is past its expiry.
    ExpiredToken,
}

impl BusinessCode {
    /// Stable numeric code reported to clients.
    pub const fn code(self) -> u16 {
        match self {
            Self::FutureDiaryDate | Self::InvalidMemberId => 400,
            Self::MemberNotFound | Self::MissingToken | Self::InvalidToken | Self::ExpiredToken => {
                401
            }
            Self::DiaryAccessDenied => 403,
            Self::DiaryNotFound => 404,
            Self::DiaryAlreadyWritten => 409,
        }
    }

    /// Message used when the caller does not supply a more specific one.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::DiaryAlreadyWritten => "a diary has already been written on this day",
            Self::FutureDiaryDate => "diaries cannot be written for future dates",
            Self::DiaryNotFound => "diary not found",
            Self::DiaryAccessDenied => "diary belongs to another member",
            Self::InvalidMemberId => "member id must be a positive integer",
            Self::MemberNotFound => "member not found",
            Self::MissingToken => "authentication token is required",
            Self::InvalidToken => "authentication token is invalid",
            Self::ExpiredToken => "authentication token has expired",
        }
    }
}

/// Failure taxonomy shared by all adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed input that is not tied to a single field.
    BadRequest,
    /// The request body could not be read or parsed.
    UnreadableBody,
    /// The resource exists but does not accept the request method.
    MethodNotAllowed,
    /// Request fields failed validation.
    Validation,
    /// The store rejected data because a constraint was violated.
    ConstraintViolation,
    /// A domain rule was broken.
    Business(BusinessCode),
    /// Unclassified server-side fault.
    Internal,
}

impl ErrorKind {
    /// Numeric code for this kind; also used as the HTTP status.
    pub const fn code(self) -> u16 {
        match self {
            Self::BadRequest
            | Self::UnreadableBody
            | Self::Validation
            | Self::ConstraintViolation => 400,
            Self::MethodNotAllowed => 405,
            Self::Business(code) => code.code(),
            Self::Internal => 500,
        }
    }
}

/// A single rejected input field.
///
/// `value` holds the rejected input as JSON; it is `null` when the field was
/// missing or the value cannot be echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    field: String,
    message: String,
    value: Value,
}

impl FieldViolation {
    /// Describe a rejected field.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::FieldViolation;
    /// use serde_json::json;
    ///
    /// let violation = FieldViolation::new("title", "title must not be empty", json!(""));
    /// assert_eq!(violation.field(), "title");
    /// ```
    pub fn new(field: impl Into<String>, message: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    /// Name of the offending field as the client sent it.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Why the value was rejected.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// The rejected value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `validations` is empty unless `kind` is [`ErrorKind::Validation`] or
///   [`ErrorKind::ConstraintViolation`].
/// - `trace_id` is captured from the task-local [`TraceId`] at construction.
///
/// # Examples
/// ```
/// use backend::domain::{BusinessCode, Error, ErrorKind};
///
/// let err = Error::business(BusinessCode::DiaryNotFound);
/// assert_eq!(err.kind(), ErrorKind::Business(BusinessCode::DiaryNotFound));
/// assert_eq!(err.code(), 404);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    validations: Vec<FieldViolation>,
    trace_id: Option<String>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>, validations: Vec<FieldViolation>) -> Self {
        Self {
            kind,
            message: message.into(),
            validations,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Malformed input not attributable to a single field.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message, Vec::new())
    }

    /// The request body could not be parsed.
    pub fn unreadable_body(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnreadableBody, message, Vec::new())
    }

    /// The resource does not support `method`.
    pub fn method_not_allowed(method: &str) -> Self {
        Self::new(
            ErrorKind::MethodNotAllowed,
            format!("Request method '{method}' is not supported"),
            Vec::new(),
        )
    }

    /// Request fields failed validation.
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::new(ErrorKind::Validation, INPUT_CONSTRAINTS_VIOLATED, violations)
    }

    /// The store rejected the data.
    pub fn constraint_violation(violations: Vec<FieldViolation>) -> Self {
        Self::new(
            ErrorKind::ConstraintViolation,
            INPUT_CONSTRAINTS_VIOLATED,
            violations,
        )
    }

    /// A business rule was broken; uses the code's default message.
    pub fn business(code: BusinessCode) -> Self {
        Self::new(
            ErrorKind::Business(code),
            code.default_message(),
            Vec::new(),
        )
    }

    /// A business rule was broken, with a caller-provided message.
    pub fn business_with_message(code: BusinessCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Business(code), message, Vec::new())
    }

    /// Unclassified server fault.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message, Vec::new())
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Numeric code reported to clients.
    pub fn code(&self) -> u16 {
        self.kind.code()
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Field-level violations, empty for most kinds.
    pub fn validations(&self) -> &[FieldViolation] {
        &self.validations
    }

    /// Trace identifier active when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
