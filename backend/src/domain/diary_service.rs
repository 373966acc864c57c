//! Diary use cases.
//!
//! [`DiaryService`] implements the [`DiaryCommand`] and [`DiaryQuery`]
//! driving ports on top of a [`DiaryRepository`]. The one-entry-per-day rule
//! is checked before saving and backed by the store's uniqueness constraint,
//! so concurrent writers for the same day cannot both succeed.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    DiaryCommand, DiaryPeriod, DiaryQuery, DiaryRepository, DiaryRepositoryError,
    UpdateDiaryCommand, WriteDiaryCommand,
};
use crate::domain::{
    BusinessCode, Diary, DiaryDraft, DiaryId, Error, FieldViolation, MemberId, day_bounds,
};

/// Diary service implementing the diary driving ports.
pub struct DiaryService<D: ?Sized> {
    diaries: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<D: ?Sized> Clone for DiaryService<D> {
    fn clone(&self) -> Self {
        Self {
            diaries: Arc::clone(&self.diaries),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<D: ?Sized> DiaryService<D> {
    /// Create a service over `diaries`, reading "now" from `clock`.
    pub fn new(diaries: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self { diaries, clock }
    }
}

impl<D> DiaryService<D>
where
    D: DiaryRepository + ?Sized,
{
    fn map_repository_error(error: DiaryRepositoryError) -> Error {
        match error {
            DiaryRepositoryError::DuplicateDay { member_id, day } => {
                debug!(member_id, %day, "store rejected second diary for the day");
                Error::business(BusinessCode::DiaryAlreadyWritten)
            }
            DiaryRepositoryError::Constraint { field, message } => {
                Error::constraint_violation(vec![FieldViolation::new(field, message, Value::Null)])
            }
            DiaryRepositoryError::Connection { message } => {
                warn!(%message, "diary repository unavailable");
                Error::internal(format!("diary repository unavailable: {message}"))
            }
            DiaryRepositoryError::Query { message } => {
                warn!(%message, "diary repository query failed");
                Error::internal(format!("diary repository error: {message}"))
            }
        }
    }

    /// Load `id` and make sure `member` owns it.
    async fn owned(&self, member: MemberId, id: DiaryId) -> Result<Diary, Error> {
        let diary = self
            .diaries
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::business(BusinessCode::DiaryNotFound))?;
        if !diary.is_owned_by(member) {
            warn!(diary_id = %id, member_id = %member, "diary access denied");
            return Err(Error::business(BusinessCode::DiaryAccessDenied));
        }
        Ok(diary)
    }
}

#[async_trait]
impl<D> DiaryCommand for DiaryService<D>
where
    D: DiaryRepository + ?Sized,
{
    async fn write(&self, member: MemberId, command: WriteDiaryCommand) -> Result<Diary, Error> {
        let now = self.clock.local().naive_local();
        if command.date > now.date() {
            warn!(member_id = %member, date = %command.date, "rejected diary for a future date");
            return Err(Error::business(BusinessCode::FutureDiaryDate));
        }

        let (start, end) = day_bounds(command.date);
        let taken = self
            .diaries
            .exists_on(member, start, end)
            .await
            .map_err(Self::map_repository_error)?;
        if taken {
            warn!(member_id = %member, date = %command.date, "diary already written that day");
            return Err(Error::business(BusinessCode::DiaryAlreadyWritten));
        }

        let draft = DiaryDraft {
            created_by: member,
            title: command.title,
            content: command.content,
            created_at: command.date.and_time(now.time()),
        };
        let diary = self
            .diaries
            .save(&draft)
            .await
            .map_err(Self::map_repository_error)?;
        info!(diary_id = %diary.id, member_id = %member, day = %diary.day(), "diary written");
        Ok(diary)
    }

    async fn update(
        &self,
        member: MemberId,
        id: DiaryId,
        command: UpdateDiaryCommand,
    ) -> Result<Diary, Error> {
        let mut diary = self.owned(member, id).await?;
        diary.title = command.title;
        diary.content = command.content;
        let updated = self
            .diaries
            .update(&diary)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::business(BusinessCode::DiaryNotFound))?;
        info!(diary_id = %id, member_id = %member, "diary updated");
        Ok(updated)
    }

    async fn delete(&self, member: MemberId, id: DiaryId) -> Result<(), Error> {
        self.owned(member, id).await?;
        let removed = self
            .diaries
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if removed {
            info!(diary_id = %id, member_id = %member, "diary deleted");
            Ok(())
        } else {
            Err(Error::business(BusinessCode::DiaryNotFound))
        }
    }
}

#[async_trait]
impl<D> DiaryQuery for DiaryService<D>
where
    D: DiaryRepository + ?Sized,
{
    async fn find(&self, member: MemberId, id: DiaryId) -> Result<Diary, Error> {
        self.owned(member, id).await
    }

    async fn list(&self, member: MemberId, period: DiaryPeriod) -> Result<Vec<Diary>, Error> {
        let (start, _) = day_bounds(period.from());
        let (_, end) = day_bounds(period.to());
        self.diaries
            .find_between(member, start, end)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "diary_service_tests.rs"]
mod tests;
