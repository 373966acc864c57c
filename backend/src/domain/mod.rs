//! Domain primitives, aggregates, and use cases.
//!
//! Purpose: define the strongly typed diary and member entities, the error
//! taxonomy shared by every adapter, and the services that implement the
//! driving ports. Nothing here depends on HTTP or database crates.
//!
//! Public surface:
//! - Error, ErrorKind, BusinessCode, FieldViolation: failure taxonomy.
//! - Diary, DiaryDraft, DiaryTitle, DiaryContent: diary entries.
//! - Member, MemberId, Role: authenticated identity.
//! - DiaryService, MemberAuthService: driving port implementations.
//! - TraceId: request correlation identifier.

pub mod diary;
mod diary_service;
pub mod error;
mod member;
mod member_auth_service;
pub mod ports;
pub mod trace_id;

pub use self::diary::{
    CONTENT_MAX, Diary, DiaryContent, DiaryDraft, DiaryId, DiaryTitle, DiaryValidationError,
    TITLE_MAX, day_bounds,
};
pub use self::diary_service::DiaryService;
pub use self::error::{BusinessCode, Error, ErrorKind, FieldViolation, INPUT_CONSTRAINTS_VIOLATED};
pub use self::member_auth_service::MemberAuthService;
pub use self::member::{Member, MemberId, MemberValidationError, Role};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, BusinessCode, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::business(BusinessCode::DiaryNotFound))
/// }
/// assert_eq!(lookup().unwrap_err().code(), 404);
/// ```
pub type ApiResult<T> = Result<T, Error>;
