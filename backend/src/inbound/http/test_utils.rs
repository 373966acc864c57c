//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::NaiveDate;

use crate::domain::ports::{MockDiaryCommand, MockDiaryQuery, MockMemberAuthenticator};
use crate::domain::{Diary, DiaryContent, DiaryId, DiaryTitle, Member, MemberId, Role};

use super::state::HttpState;

/// Member with a predictable email and name.
pub fn member(id: i64) -> Member {
    Member::new(
        MemberId::new(id).expect("positive member id"),
        format!("member{id}@example.com"),
        format!("Member {id}"),
        None,
        Role::Normal,
    )
}

/// Stored diary written by `owner` at 21:30 on 2024-03-24.
pub fn diary(id: i64, owner: i64) -> Diary {
    Diary {
        id: DiaryId::new(id),
        created_by: MemberId::new(owner).expect("positive member id"),
        title: DiaryTitle::new("Spring rain").expect("title"),
        content: DiaryContent::new("It rained all afternoon.").expect("content"),
        created_at: NaiveDate::from_ymd_opt(2024, 3, 24)
            .and_then(|d| d.and_hms_opt(21, 30, 0))
            .expect("timestamp"),
    }
}

/// Wrap mocks into handler state.
pub fn state_with(
    diaries: MockDiaryCommand,
    query: MockDiaryQuery,
    authenticator: MockMemberAuthenticator,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(diaries),
        Arc::new(query),
        Arc::new(authenticator),
    ))
}

/// Authenticator that accepts any token as `member`.
pub fn accepting(member: Member) -> MockMemberAuthenticator {
    let mut auth = MockMemberAuthenticator::new();
    auth.expect_authenticate()
        .returning(move |_| Ok(member.clone()));
    auth
}
