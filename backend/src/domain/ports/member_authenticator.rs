//! Driving port resolving bearer tokens to members.
//!
//! Inbound adapters hand over the raw token; implementations verify it and
//! load the member so handlers never touch token internals.

use async_trait::async_trait;

use crate::domain::{Error, Member};

/// Domain use-case port for request authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberAuthenticator: Send + Sync {
    /// Resolve `token` to the member it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_TOKEN` or `EXPIRED_TOKEN` when verification fails and
    /// `MEMBER_NOT_FOUND` when the subject no longer exists.
    async fn authenticate(&self, token: &str) -> Result<Member, Error>;
}
