//! Diary entries and their validated parts.
//!
//! A member owns at most one entry per calendar day. The day of an entry is
//! the date part of its `created_at` timestamp, which is a naive local
//! date-time: the member's wall clock at the moment of writing.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MemberId;

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 100;
/// Maximum body length in characters.
pub const CONTENT_MAX: usize = 5000;

/// Validation errors for diary fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiaryValidationError {
    #[error("title must not be blank")]
    BlankTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("content must not be blank")]
    BlankContent,
    #[error("content must be at most {max} characters")]
    ContentTooLong { max: usize },
}

/// Identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiaryId(i64);

impl DiaryId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DiaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank title of at most [`TITLE_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiaryTitle(String);

impl DiaryTitle {
    /// Validate a title.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::DiaryTitle;
    ///
    /// assert!(DiaryTitle::new("Spring rain").is_ok());
    /// assert!(DiaryTitle::new("   ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, DiaryValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DiaryValidationError::BlankTitle);
        }
        if value.chars().count() > TITLE_MAX {
            return Err(DiaryValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for DiaryTitle {
    type Error = DiaryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiaryTitle> for String {
    fn from(value: DiaryTitle) -> Self {
        value.0
    }
}

/// Non-blank body of at most [`CONTENT_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiaryContent(String);

impl DiaryContent {
    /// Validate a diary body.
    pub fn new(value: impl Into<String>) -> Result<Self, DiaryValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DiaryValidationError::BlankContent);
        }
        if value.chars().count() > CONTENT_MAX {
            return Err(DiaryValidationError::ContentTooLong { max: CONTENT_MAX });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for DiaryContent {
    type Error = DiaryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiaryContent> for String {
    fn from(value: DiaryContent) -> Self {
        value.0
    }
}

/// First and last representable instants of `date`.
///
/// # Examples
/// ```
/// use backend::domain::day_bounds;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 24).unwrap();
/// let (start, end) = day_bounds(date);
/// assert_eq!(start.date(), date);
/// assert_eq!(end.date(), date);
/// assert!(start < end);
/// ```
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    (date.and_time(NaiveTime::MIN), date.and_time(end_of_day))
}

/// A diary entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryDraft {
    pub created_by: MemberId,
    pub title: DiaryTitle,
    pub content: DiaryContent,
    pub created_at: NaiveDateTime,
}

impl DiaryDraft {
    /// Day the draft will occupy once stored.
    pub fn day(&self) -> NaiveDate {
        self.created_at.date()
    }
}

/// A stored diary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diary {
    pub id: DiaryId,
    pub created_by: MemberId,
    pub title: DiaryTitle,
    pub content: DiaryContent,
    pub created_at: NaiveDateTime,
}

impl Diary {
    /// Attach a store-assigned identifier to a draft.
    pub fn from_draft(id: DiaryId, draft: DiaryDraft) -> Self {
        let DiaryDraft {
            created_by,
            title,
            content,
            created_at,
        } = draft;
        Self {
            id,
            created_by,
            title,
            content,
            created_at,
        }
    }

    /// Calendar day this entry belongs to.
    pub fn day(&self) -> NaiveDate {
        self.created_at.date()
    }

    /// Whether `member` owns this entry.
    pub fn is_owned_by(&self, member: MemberId) -> bool {
        self.created_by == member
    }
}
