//! Port for member lookup.

use async_trait::async_trait;

use crate::domain::{Member, MemberId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by member repository adapters.
    pub enum MemberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "member repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "member repository query failed: {message}",
    }
}

/// Read access to registered members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Fetch a member by identifier.
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberRepositoryError>;
}
