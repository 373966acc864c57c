//! Diary HTTP handlers.
//!
//! ```text
//! POST   /api/v1/diaries        {"title":"..","content":"..","date":"2024-03-24"}
//! GET    /api/v1/diaries?from=2024-03-01&to=2024-03-31
//! GET    /api/v1/diaries/{id}
//! PUT    /api/v1/diaries/{id}   {"title":"..","content":".."}
//! DELETE /api/v1/diaries/{id}
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{DiaryPeriod, UpdateDiaryCommand, WriteDiaryCommand};
use crate::domain::{Diary, DiaryContent, DiaryId, DiaryTitle};

use super::ApiResult;
use super::auth::AuthenticatedMember;
use super::error::ErrorResponse;
use super::response::ApiResponse;
use super::state::HttpState;
use super::validation::{FieldName, Violations, parse_date};

/// Collection path; single entries live below it.
pub const DIARIES_PATH: &str = "/api/v1/diaries";

const TITLE: FieldName = FieldName::new("title");
const CONTENT: FieldName = FieldName::new("content");
const DATE: FieldName = FieldName::new("date");
const FROM: FieldName = FieldName::new("from");
const TO: FieldName = FieldName::new("to");

/// Body of `POST /api/v1/diaries`.
///
/// Fields are optional on the wire so missing values are reported as field
/// violations rather than an unreadable body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct WriteDiaryRequest {
    #[schema(example = "Spring rain")]
    pub title: Option<String>,
    #[schema(example = "It rained all afternoon.")]
    pub content: Option<String>,
    /// Calendar day, `YYYY-MM-DD`.
    #[schema(example = "2024-03-24")]
    pub date: Option<String>,
}

impl TryFrom<WriteDiaryRequest> for WriteDiaryCommand {
    type Error = crate::domain::Error;

    fn try_from(request: WriteDiaryRequest) -> Result<Self, Self::Error> {
        let mut violations = Violations::default();
        let title = violations.field(TITLE, request.title, |raw| DiaryTitle::new(raw));
        let content = violations.field(CONTENT, request.content, |raw| DiaryContent::new(raw));
        let date = violations.field(DATE, request.date, parse_date);
        let parsed = title
            .zip(content)
            .zip(date)
            .map(|((title, content), date)| Self {
                title,
                content,
                date,
            });
        violations.finish(parsed)
    }
}

/// Body of `PUT /api/v1/diaries/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateDiaryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl TryFrom<UpdateDiaryRequest> for UpdateDiaryCommand {
    type Error = crate::domain::Error;

    fn try_from(request: UpdateDiaryRequest) -> Result<Self, Self::Error> {
        let mut violations = Violations::default();
        let title = violations.field(TITLE, request.title, |raw| DiaryTitle::new(raw));
        let content = violations.field(CONTENT, request.content, |raw| DiaryContent::new(raw));
        let parsed = title
            .zip(content)
            .map(|(title, content)| Self { title, content });
        violations.finish(parsed)
    }
}

/// Query string of `GET /api/v1/diaries`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DiaryListQuery {
    /// First day, inclusive.
    #[param(example = "2024-03-01")]
    pub from: Option<String>,
    /// Last day, inclusive.
    #[param(example = "2024-03-31")]
    pub to: Option<String>,
}

impl TryFrom<DiaryListQuery> for DiaryPeriod {
    type Error = crate::domain::Error;

    fn try_from(query: DiaryListQuery) -> Result<Self, Self::Error> {
        let mut violations = Violations::default();
        let from = violations.field(FROM, query.from, parse_date);
        let to = violations.field(TO, query.to, parse_date);
        let (from, to) = violations.finish(from.zip(to))?;
        DiaryPeriod::new(from, to)
    }
}

/// Diary as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiaryResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[schema(value_type = String, format = Date, example = "2024-03-24")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "2024-03-24T21:30:00")]
    pub created_at: NaiveDateTime,
}

impl From<Diary> for DiaryResponse {
    fn from(diary: Diary) -> Self {
        Self {
            id: diary.id.get(),
            date: diary.day(),
            created_at: diary.created_at,
            title: diary.title.into(),
            content: diary.content.into(),
        }
    }
}

/// Write the caller's diary entry for one day.
#[utoipa::path(
    post,
    path = "/api/v1/diaries",
    request_body = WriteDiaryRequest,
    responses(
        (status = 201, description = "Diary written", body = ApiResponse<DiaryResponse>,
            headers(("Location" = String, description = "URL of the new entry"))),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "A diary already exists for that day", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["diaries"],
    operation_id = "writeDiary",
    security(("bearer" = []))
)]
pub async fn write_diary(
    state: web::Data<HttpState>,
    member: AuthenticatedMember,
    payload: web::Json<WriteDiaryRequest>,
) -> ApiResult<HttpResponse> {
    let command = WriteDiaryCommand::try_from(payload.into_inner())?;
    let diary = state.diaries.write(member.member().id(), command).await?;
    let location = format!("{DIARIES_PATH}/{}", diary.id);
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, location))
        .json(ApiResponse::success(DiaryResponse::from(diary))))
}

/// List the caller's entries within a period, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/diaries",
    params(DiaryListQuery),
    responses(
        (status = 200, description = "Diaries in the period", body = ApiResponse<Vec<DiaryResponse>>),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["diaries"],
    operation_id = "listDiaries",
    security(("bearer" = []))
)]
pub async fn list_diaries(
    state: web::Data<HttpState>,
    member: AuthenticatedMember,
    query: web::Query<DiaryListQuery>,
) -> ApiResult<web::Json<ApiResponse<Vec<DiaryResponse>>>> {
    let period = DiaryPeriod::try_from(query.into_inner())?;
    let diaries = state
        .diaries_query
        .list(member.member().id(), period)
        .await?;
    Ok(web::Json(ApiResponse::success(
        diaries.into_iter().map(DiaryResponse::from).collect(),
    )))
}

/// Fetch one of the caller's entries.
#[utoipa::path(
    get,
    path = "/api/v1/diaries/{id}",
    params(("id" = i64, Path, description = "Diary identifier")),
    responses(
        (status = 200, description = "Diary", body = ApiResponse<DiaryResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Diary belongs to another member", body = ErrorResponse),
        (status = 404, description = "Diary not found", body = ErrorResponse)
    ),
    tags = ["diaries"],
    operation_id = "getDiary",
    security(("bearer" = []))
)]
pub async fn get_diary(
    state: web::Data<HttpState>,
    member: AuthenticatedMember,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ApiResponse<DiaryResponse>>> {
    let diary = state
        .diaries_query
        .find(member.member().id(), DiaryId::new(path.into_inner()))
        .await?;
    Ok(web::Json(ApiResponse::success(DiaryResponse::from(diary))))
}

/// Replace title and content of one of the caller's entries.
#[utoipa::path(
    put,
    path = "/api/v1/diaries/{id}",
    params(("id" = i64, Path, description = "Diary identifier")),
    request_body = UpdateDiaryRequest,
    responses(
        (status = 200, description = "Diary updated", body = ApiResponse<DiaryResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Diary belongs to another member", body = ErrorResponse),
        (status = 404, description = "Diary not found", body = ErrorResponse)
    ),
    tags = ["diaries"],
    operation_id = "updateDiary",
    security(("bearer" = []))
)]
pub async fn update_diary(
    state: web::Data<HttpState>,
    member: AuthenticatedMember,
    path: web::Path<i64>,
    payload: web::Json<UpdateDiaryRequest>,
) -> ApiResult<web::Json<ApiResponse<DiaryResponse>>> {
    let command = UpdateDiaryCommand::try_from(payload.into_inner())?;
    let diary = state
        .diaries
        .update(member.member().id(), DiaryId::new(path.into_inner()), command)
        .await?;
    Ok(web::Json(ApiResponse::success(DiaryResponse::from(diary))))
}

/// Delete one of the caller's entries.
#[utoipa::path(
    delete,
    path = "/api/v1/diaries/{id}",
    params(("id" = i64, Path, description = "Diary identifier")),
    responses(
        (status = 204, description = "Diary deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Diary belongs to another member", body = ErrorResponse),
        (status = 404, description = "Diary not found", body = ErrorResponse)
    ),
    tags = ["diaries"],
    operation_id = "deleteDiary",
    security(("bearer" = []))
)]
pub async fn delete_diary(
    state: web::Data<HttpState>,
    member: AuthenticatedMember,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .diaries
        .delete(member.member().id(), DiaryId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "diaries_tests.rs"]
mod tests;
