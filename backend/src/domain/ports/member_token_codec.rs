//! Port for issuing and verifying member access tokens.
//!
//! Tokens are signed with a shared secret and carry the member identifier
//! under a configurable claim name. The port hides the token format so the
//! domain only deals in [`MemberId`] values and [`TokenClaims`].

use chrono::{DateTime, Utc};

use crate::domain::MemberId;

use super::define_port_error;

define_port_error! {
    /// Errors raised while issuing or verifying tokens.
    pub enum TokenError {
        /// The member identifier was zero or negative.
        InvalidMemberId { value: i64 } =>
            "member id must be a positive integer, got {value}",
        /// The token is past its expiry.
        Expired => "token has expired",
        /// Signature, issuer, or claim shape did not check out.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Verified contents of an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
    pub member_id: MemberId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies member access tokens.
#[cfg_attr(test, mockall::automock)]
pub trait MemberTokenCodec: Send + Sync {
    /// Issue a token for `member_id` valid for `expiration_seconds` from
    /// `issued_at`.
    ///
    /// Fails with [`TokenError::InvalidMemberId`] when `member_id < 1`.
    fn create_token(
        &self,
        member_id: i64,
        expiration_seconds: u64,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError>;

    /// Verify `token` and extract its claims.
    fn parse_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
