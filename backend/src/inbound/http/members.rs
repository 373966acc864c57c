//! Member HTTP handlers.

use actix_web::web;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Member;

use super::ApiResult;
use super::auth::AuthenticatedMember;
use super::error::ErrorResponse;
use super::response::ApiResponse;

/// Profile of the authenticated member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    #[schema(example = "writer@example.com")]
    pub email: String,
    pub name: String,
    pub profile_url: Option<String>,
    #[schema(example = "NORMAL")]
    pub role: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id().get(),
            email: member.email().to_owned(),
            name: member.name().to_owned(),
            profile_url: member.profile_url().map(str::to_owned),
            role: member.role().to_string(),
        }
    }
}

/// Return the member the bearer token belongs to.
#[utoipa::path(
    get,
    path = "/api/v1/members/me",
    responses(
        (status = 200, description = "Current member", body = ApiResponse<MemberResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tags = ["members"],
    operation_id = "currentMember",
    security(("bearer" = []))
)]
pub async fn current_member(
    member: AuthenticatedMember,
) -> ApiResult<web::Json<ApiResponse<MemberResponse>>> {
    Ok(web::Json(ApiResponse::success(MemberResponse::from(
        member.into_inner(),
    ))))
}
