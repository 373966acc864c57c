//! Driving port for diary mutations.
//!
//! Inbound adapters validate request bodies into these command types before
//! calling [`DiaryCommand`]; the service enforces the business rules.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Diary, DiaryContent, DiaryId, DiaryTitle, Error, MemberId};

/// Request to write the diary entry for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteDiaryCommand {
    pub title: DiaryTitle,
    pub content: DiaryContent,
    pub date: NaiveDate,
}

/// Replacement title and content for an existing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDiaryCommand {
    pub title: DiaryTitle,
    pub content: DiaryContent,
}

/// Domain use-case port for writing diaries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiaryCommand: Send + Sync {
    /// Write `command` as `member`'s entry for `command.date`.
    ///
    /// # Errors
    ///
    /// - `DIARY_ALREADY_WRITTEN` when the member already has an entry that day.
    /// - `FUTURE_DIARY_DATE` when the date is after the member's today.
    async fn write(&self, member: MemberId, command: WriteDiaryCommand) -> Result<Diary, Error>;

    /// Replace title and content of an entry `member` owns.
    async fn update(
        &self,
        member: MemberId,
        id: DiaryId,
        command: UpdateDiaryCommand,
    ) -> Result<Diary, Error>;

    /// Delete an entry `member` owns.
    async fn delete(&self, member: MemberId, id: DiaryId) -> Result<(), Error>;
}
