//! Bearer-token authentication for HTTP handlers.
//!
//! [`AuthenticatedMember`] is an extractor: adding it to a handler's
//! arguments makes the route require `Authorization: Bearer <token>`.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{BusinessCode, Error, Member};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// The member a request was authenticated as.
#[derive(Debug, Clone)]
pub struct AuthenticatedMember(pub Member);

impl AuthenticatedMember {
    pub fn member(&self) -> &Member {
        &self.0
    }

    pub fn into_inner(self) -> Member {
        self.0
    }
}

/// Pull the token out of an `Authorization` header value.
fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::business(BusinessCode::MissingToken))?;
    let value = header
        .to_str()
        .map_err(|_| Error::business(BusinessCode::InvalidToken))?;
    let token = value
        .get(..BEARER_PREFIX.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX))
        .and_then(|_| value.get(BEARER_PREFIX.len()..))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::business(BusinessCode::InvalidToken))?;
    Ok(token.to_owned())
}

impl FromRequest for AuthenticatedMember {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered with the app"))?;
            let member = state.authenticator.authenticate(&token).await?;
            Ok(Self(member))
        })
    }
}
