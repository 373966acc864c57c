//! Driving port for reading diaries.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Diary, DiaryId, Error, MemberId};

/// Longest span, in days, a single listing may cover.
pub const MAX_PERIOD_DAYS: i64 = 366;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiaryPeriod {
    from: NaiveDate,
    to: NaiveDate,
}

impl DiaryPeriod {
    /// Validate a listing period.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::ports::DiaryPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let to = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    /// assert!(DiaryPeriod::new(from, to).is_ok());
    /// assert!(DiaryPeriod::new(to, from).is_err());
    /// ```
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, Error> {
        if from > to {
            return Err(Error::bad_request("'from' must not be after 'to'"));
        }
        if (to - from).num_days() >= MAX_PERIOD_DAYS {
            return Err(Error::bad_request(format!(
                "period must not exceed {MAX_PERIOD_DAYS} days"
            )));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }
}

/// Domain use-case port for reading diaries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiaryQuery: Send + Sync {
    /// Fetch one entry `member` owns.
    async fn find(&self, member: MemberId, id: DiaryId) -> Result<Diary, Error>;

    /// `member`'s entries within `period`, oldest first.
    async fn list(&self, member: MemberId, period: DiaryPeriod) -> Result<Vec<Diary>, Error>;
}
