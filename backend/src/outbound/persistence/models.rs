//! Internal Diesel row structs.
//!
//! These never leave the persistence module; repositories convert them to
//! domain types.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{diaries, members};

/// Row read from `members`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub profile_url: Option<String>,
    pub role: String,
}

/// Row read from `diaries`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = diaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DiaryRow {
    pub id: i64,
    pub created_by: i64,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Row inserted into `diaries`.
#[derive(Debug, Insertable)]
#[diesel(table_name = diaries)]
pub(crate) struct NewDiaryRow<'a> {
    pub created_by: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub created_at: NaiveDateTime,
}

/// Editable columns of a diary.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = diaries)]
pub(crate) struct DiaryChanges<'a> {
    pub title: &'a str,
    pub content: &'a str,
}
