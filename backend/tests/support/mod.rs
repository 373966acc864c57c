//! Shared harness for HTTP integration tests.
//!
//! Builds the full actix application over in-memory adapters, a fixed clock,
//! and a real JWT handler so tests exercise every layer except PostgreSQL.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use backend::Trace;
use backend::domain::ports::MemberTokenCodec;
use backend::domain::{DiaryService, Member, MemberAuthService, MemberId, Role};
use backend::inbound::http::configure;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{InMemoryDiaryRepository, InMemoryMemberRepository};
use backend::outbound::token::{JwtHandler, JwtProperties};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use zeroize::Zeroizing;

pub const WRITER: i64 = 1;
pub const NEIGHBOUR: i64 = 2;

/// Clock pinned to 2024-03-25 12:00 UTC.
pub struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn jwt_properties(secret: &str) -> JwtProperties {
    JwtProperties {
        token_type: "JWT".to_owned(),
        issuer: "diary-backend".to_owned(),
        member_claim: "memberId".to_owned(),
        secret_key: Zeroizing::new(secret.to_owned()),
    }
}

pub fn server_secret() -> String {
    "integration-secret-".repeat(3)
}

/// Handler sharing the server's settings.
pub fn tokens() -> JwtHandler {
    JwtHandler::new(&jwt_properties(&server_secret())).expect("valid jwt settings")
}

/// A fresh bearer token for `member_id`.
pub fn bearer(member_id: i64) -> String {
    let token = tokens()
        .create_token(member_id, 3600, Utc::now())
        .expect("token issued");
    format!("Bearer {token}")
}

/// A token that expired an hour ago.
pub fn expired_bearer(member_id: i64) -> String {
    let token = tokens()
        .create_token(member_id, 3600, Utc::now() - Duration::hours(2))
        .expect("token issued");
    format!("Bearer {token}")
}

fn member(id: i64, name: &str) -> Member {
    Member::new(
        MemberId::new(id).expect("positive id"),
        format!("{}@example.com", name.to_lowercase()),
        name,
        None,
        Role::Normal,
    )
}

pub fn http_state() -> web::Data<HttpState> {
    let now = Utc
        .with_ymd_and_hms(2024, 3, 25, 12, 0, 0)
        .single()
        .expect("fixture instant");
    let diaries = Arc::new(DiaryService::new(
        Arc::new(InMemoryDiaryRepository::new()),
        Arc::new(FixedClock(now)),
    ));
    let members = Arc::new(InMemoryMemberRepository::new([
        member(WRITER, "Writer"),
        member(NEIGHBOUR, "Neighbour"),
    ]));
    let authenticator = Arc::new(MemberAuthService::new(members, Arc::new(tokens())));
    web::Data::new(HttpState::new(diaries.clone(), diaries, authenticator))
}

pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    App::new()
        .app_data(health)
        .app_data(state)
        .wrap(Trace)
        .configure(configure)
}
