//! Bearer token authentication.
//!
//! [`MemberAuthService`] implements [`MemberAuthenticator`] by verifying the
//! token through a [`MemberTokenCodec`] and loading the subject through a
//! [`MemberRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    MemberAuthenticator, MemberRepository, MemberRepositoryError, MemberTokenCodec, TokenError,
};
use crate::domain::{BusinessCode, Error, Member};

/// Authenticator backed by a token codec and member store.
pub struct MemberAuthService<M: ?Sized, T: ?Sized> {
    members: Arc<M>,
    tokens: Arc<T>,
}

impl<M: ?Sized, T: ?Sized> MemberAuthService<M, T> {
    pub fn new(members: Arc<M>, tokens: Arc<T>) -> Self {
        Self { members, tokens }
    }
}

/// Translate a token failure into the error reported to clients.
fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::InvalidMemberId { value } => {
            debug!(value, "bearer token names a non-positive member");
            Error::business(BusinessCode::InvalidToken)
        }
        TokenError::Expired => Error::business(BusinessCode::ExpiredToken),
        TokenError::Invalid { message } => {
            debug!(%message, "rejected bearer token");
            Error::business(BusinessCode::InvalidToken)
        }
        TokenError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
    }
}

fn map_member_error(error: MemberRepositoryError) -> Error {
    warn!(error = %error, "member lookup failed");
    match error {
        MemberRepositoryError::Connection { message } => {
            Error::internal(format!("member repository unavailable: {message}"))
        }
        MemberRepositoryError::Query { message } => {
            Error::internal(format!("member repository error: {message}"))
        }
    }
}

#[async_trait]
impl<M, T> MemberAuthenticator for MemberAuthService<M, T>
where
    M: MemberRepository + ?Sized,
    T: MemberTokenCodec + ?Sized,
{
    async fn authenticate(&self, token: &str) -> Result<Member, Error> {
        let claims = self.tokens.parse_token(token).map_err(map_token_error)?;
        self.members
            .find_by_id(claims.member_id)
            .await
            .map_err(map_member_error)?
            .ok_or_else(|| Error::business(BusinessCode::MemberNotFound))
    }
}
