//! Builders wiring driven adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use backend::domain::ports::{DiaryRepository, MemberRepository};
use backend::domain::{DiaryService, Member, MemberAuthService, MemberId, Role};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{InMemoryDiaryRepository, InMemoryMemberRepository};
use backend::outbound::persistence::{DieselDiaryRepository, DieselMemberRepository};

use super::ServerConfig;

const FIXTURE_MEMBER_ID: i64 = 1;

/// Member available when the server runs without a database.
fn fixture_member() -> Option<Member> {
    let id = MemberId::new(FIXTURE_MEMBER_ID).ok()?;
    Some(Member::new(
        id,
        "writer@example.com",
        "Local writer",
        None,
        Role::Normal,
    ))
}

fn build_repositories(
    config: &ServerConfig,
) -> (Arc<dyn DiaryRepository>, Arc<dyn MemberRepository>) {
    match &config.db_pool {
        Some(pool) => (
            Arc::new(DieselDiaryRepository::new(pool.clone())),
            Arc::new(DieselMemberRepository::new(pool.clone())),
        ),
        None => {
            warn!(
                member_id = FIXTURE_MEMBER_ID,
                "no database configured; using in-memory adapters"
            );
            (
                Arc::new(InMemoryDiaryRepository::new()),
                Arc::new(InMemoryMemberRepository::new(fixture_member())),
            )
        }
    }
}

/// Assemble the services behind every HTTP driving port.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (diaries, members) = build_repositories(config);
    let diary_service = Arc::new(DiaryService::new(diaries, Arc::new(DefaultClock)));
    let authenticator = Arc::new(MemberAuthService::new(members, config.tokens.clone()));

    web::Data::new(HttpState::new(
        diary_service.clone(),
        diary_service,
        authenticator,
    ))
}
