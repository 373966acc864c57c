//! Port for diary persistence.
//!
//! The [`DiaryRepository`] trait is the contract outbound adapters fulfil to
//! store diary entries. The write use case relies on two guarantees: the
//! day-range existence check and a store-level uniqueness rule that rejects a
//! second entry for the same member and day with
//! [`DiaryRepositoryError::DuplicateDay`].

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Diary, DiaryDraft, DiaryId, MemberId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by diary repository adapters.
    pub enum DiaryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "diary repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "diary repository query failed: {message}",
        /// The member already has an entry on that day.
        DuplicateDay { member_id: i64, day: NaiveDate } =>
            "member {member_id} already has a diary on {day}",
        /// A column-level constraint rejected the row.
        Constraint { field: String, message: String } =>
            "diary constraint violated on {field}: {message}",
    }
}

/// Port for diary storage and retrieval.
///
/// Timestamps are naive local date-times; range bounds are inclusive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiaryRepository: Send + Sync {
    /// Whether `owner` has any entry created within `[start, end]`.
    async fn exists_on(
        &self,
        owner: MemberId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<bool, DiaryRepositoryError>;

    /// Persist a new entry and return it with its assigned identifier.
    async fn save(&self, draft: &DiaryDraft) -> Result<Diary, DiaryRepositoryError>;

    /// Fetch an entry by identifier regardless of owner.
    async fn find_by_id(&self, id: DiaryId) -> Result<Option<Diary>, DiaryRepositoryError>;

    /// Entries of `owner` created within `[start, end]`, oldest first.
    async fn find_between(
        &self,
        owner: MemberId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Diary>, DiaryRepositoryError>;

    /// Overwrite title and content of a stored entry.
    ///
    /// Returns `None` when the entry no longer exists.
    async fn update(&self, diary: &Diary) -> Result<Option<Diary>, DiaryRepositoryError>;

    /// Remove an entry. Returns `false` when nothing was deleted.
    async fn delete(&self, id: DiaryId) -> Result<bool, DiaryRepositoryError>;
}
