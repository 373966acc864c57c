//! PostgreSQL-backed `MemberRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{MemberRepository, MemberRepositoryError};
use crate::domain::{Member, MemberId, Role};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::MemberRow;
use super::pool::DbPool;
use super::schema::members;

/// Diesel-backed implementation of the `MemberRepository` port.
#[derive(Clone)]
pub struct DieselMemberRepository {
    pool: DbPool,
}

impl DieselMemberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_member(row: MemberRow) -> Result<Member, MemberRepositoryError> {
    let id = MemberId::new(row.id)
        .map_err(|err| MemberRepositoryError::query(format!("stored member id invalid: {err}")))?;
    // Unknown roles are demoted rather than locking the member out.
    let role = row.role.parse::<Role>().unwrap_or_else(|err| {
        warn!(member_id = row.id, %err, "unrecognised member role, defaulting to NORMAL");
        Role::Normal
    });
    Ok(Member::new(id, row.email, row.name, row.profile_url, role))
}

#[async_trait]
impl MemberRepository for DieselMemberRepository {
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, MemberRepositoryError::connection))?;

        members::table
            .find(id.get())
            .select(MemberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_basic_diesel_error(
                    err,
                    MemberRepositoryError::query,
                    MemberRepositoryError::connection,
                )
            })?
            .map(row_to_member)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(id: i64, role: &str) -> MemberRow {
        MemberRow {
            id,
            email: "writer@example.com".to_owned(),
            name: "Writer".to_owned(),
            profile_url: Some("https://example.com/p.png".to_owned()),
            role: role.to_owned(),
        }
    }

    #[rstest]
    #[case("ADMIN", Role::Admin)]
    #[case("NORMAL", Role::Normal)]
    #[case("SUPERUSER", Role::Normal)]
    fn roles_are_parsed_with_fallback(#[case] raw: &str, #[case] expected: Role) {
        let member = row_to_member(row(5, raw)).expect("valid row");
        assert_eq!(member.role(), expected);
        assert_eq!(member.profile_url(), Some("https://example.com/p.png"));
    }

    #[rstest]
    fn non_positive_ids_are_query_errors() {
        assert!(matches!(
            row_to_member(row(0, "NORMAL")),
            Err(MemberRepositoryError::Query { .. })
        ));
    }
}
