//! PostgreSQL-backed `DiaryRepository` implementation using Diesel ORM.
//!
//! The per-day rule is enforced twice: `exists_on` lets the service reject
//! duplicates early, and the `diaries_created_by_day_key` unique index turns
//! a lost race into [`DiaryRepositoryError::DuplicateDay`].

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{DiaryRepository, DiaryRepositoryError};
use crate::domain::{Diary, DiaryContent, DiaryDraft, DiaryId, DiaryTitle, MemberId};

use super::diesel_basic_error_mapping::{
    ConstraintFailure, constraint_failure, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{DiaryChanges, DiaryRow, NewDiaryRow};
use super::pool::{DbPool, PoolError};
use super::schema::diaries;

const DAY_KEY: &str = "diaries_created_by_day_key";

/// Diesel-backed implementation of the `DiaryRepository` port.
#[derive(Clone)]
pub struct DieselDiaryRepository {
    pool: DbPool,
}

impl DieselDiaryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DiaryRepositoryError {
    map_basic_pool_error(error, DiaryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DiaryRepositoryError {
    map_basic_diesel_error(
        error,
        DiaryRepositoryError::query,
        DiaryRepositoryError::connection,
    )
}

/// Field name reported to clients for a constraint name.
fn constraint_field(constraint: &str) -> &'static str {
    match constraint {
        "diaries_title_not_blank" => "title",
        "diaries_content_length" => "content",
        "diaries_created_by_fkey" => "createdBy",
        _ => "diary",
    }
}

/// Map a failed insert, recognising the per-day index and named checks.
fn map_write_error(
    error: diesel::result::Error,
    owner: MemberId,
    day: NaiveDate,
) -> DiaryRepositoryError {
    match constraint_failure(&error) {
        Some(ConstraintFailure::Unique(DAY_KEY)) => {
            DiaryRepositoryError::duplicate_day(owner.get(), day)
        }
        Some(ConstraintFailure::Check(name) | ConstraintFailure::ForeignKey(name)) => {
            let field = constraint_field(name);
            DiaryRepositoryError::constraint(field, format!("violates {name}"))
        }
        _ => map_diesel_error(error),
    }
}

fn row_to_diary(row: DiaryRow) -> Result<Diary, DiaryRepositoryError> {
    let invalid = |what: &str, err: &dyn std::fmt::Display| {
        warn!(diary_id = row.id, %err, "stored diary {what} is invalid");
        DiaryRepositoryError::query(format!("stored diary {} has invalid {what}", row.id))
    };
    let created_by = MemberId::new(row.created_by).map_err(|err| invalid("owner", &err))?;
    let title = DiaryTitle::new(row.title.as_str()).map_err(|err| invalid("title", &err))?;
    let content = DiaryContent::new(row.content.as_str()).map_err(|err| invalid("content", &err))?;

    Ok(Diary {
        id: DiaryId::new(row.id),
        created_by,
        title,
        content,
        created_at: row.created_at,
    })
}

#[async_trait]
impl DiaryRepository for DieselDiaryRepository {
    async fn exists_on(
        &self,
        owner: MemberId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<bool, DiaryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            diaries::table
                .filter(diaries::created_by.eq(owner.get()))
                .filter(diaries::created_at.between(start, end)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn save(&self, draft: &DiaryDraft) -> Result<Diary, DiaryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewDiaryRow {
            created_by: draft.created_by.get(),
            title: draft.title.as_str(),
            content: draft.content.as_str(),
            created_at: draft.created_at,
        };

        let row = diesel::insert_into(diaries::table)
            .values(&new_row)
            .returning(DiaryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, draft.created_by, draft.day()))?;
        row_to_diary(row)
    }

    async fn find_by_id(&self, id: DiaryId) -> Result<Option<Diary>, DiaryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diaries::table
            .find(id.get())
            .select(DiaryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_diary)
            .transpose()
    }

    async fn find_between(
        &self,
        owner: MemberId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Diary>, DiaryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DiaryRow> = diaries::table
            .filter(diaries::created_by.eq(owner.get()))
            .filter(diaries::created_at.between(start, end))
            .order((diaries::created_at.asc(), diaries::id.asc()))
            .select(DiaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_diary).collect()
    }

    async fn update(&self, diary: &Diary) -> Result<Option<Diary>, DiaryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = DiaryChanges {
            title: diary.title.as_str(),
            content: diary.content.as_str(),
        };
        diesel::update(diaries::table.find(diary.id.get()))
            .set(&changes)
            .returning(DiaryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, diary.created_by, diary.day()))?
            .map(row_to_diary)
            .transpose()
    }

    async fn delete(&self, id: DiaryId) -> Result<bool, DiaryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(diaries::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
