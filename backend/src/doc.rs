//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the success and error envelopes,
//! and the bearer-token security scheme. The document backs Swagger UI in
//! debug builds and is exported by the `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::diaries::{DiaryResponse, UpdateDiaryRequest, WriteDiaryRequest};
use crate::inbound::http::error::{ErrorResponse, FieldErrorBody, ResultCode};
use crate::inbound::http::members::MemberResponse;

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Member access token sent as `Authorization: Bearer <token>`."))
            .build();
        components.add_security_scheme("bearer", SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Diary backend API",
        description = "HTTP interface for writing and reading daily diary entries."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::diaries::write_diary,
        crate::inbound::http::diaries::list_diaries,
        crate::inbound::http::diaries::get_diary,
        crate::inbound::http::diaries::update_diary,
        crate::inbound::http::diaries::delete_diary,
        crate::inbound::http::members::current_member,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        WriteDiaryRequest,
        UpdateDiaryRequest,
        DiaryResponse,
        MemberResponse,
        ErrorResponse,
        FieldErrorBody,
        ResultCode
    )),
    tags(
        (name = "diaries", description = "Daily diary entries"),
        (name = "members", description = "The authenticated member"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
