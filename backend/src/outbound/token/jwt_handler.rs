//! JWT implementation of the [`MemberTokenCodec`] port.
//!
//! Tokens carry `iss`, the configured member claim, `iat`, and `exp`
//! (seconds since the epoch). The HMAC variant follows the secret length so a
//! longer secret always buys the stronger digest.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::MemberId;
use crate::domain::ports::{MemberTokenCodec, TokenClaims, TokenError};

/// Claim names the handler writes itself.
const RESERVED_CLAIMS: [&str; 3] = ["iss", "iat", "exp"];

/// Smallest secret accepted, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Problems with the signing configuration, raised at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtConfigError {
    #[error("JWT secret must be at least {min} bytes, got {actual}")]
    SecretTooShort { actual: usize, min: usize },
    #[error("JWT {setting} must not be blank")]
    Blank { setting: &'static str },
    #[error("member claim `{0}` clashes with a registered claim")]
    ReservedClaim(String),
}

/// Token settings: header type, issuer, member claim name, and secret.
#[derive(Clone)]
pub struct JwtProperties {
    pub token_type: String,
    pub issuer: String,
    pub member_claim: String,
    pub secret_key: Zeroizing<String>,
}

impl fmt::Debug for JwtProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtProperties")
            .field("token_type", &self.token_type)
            .field("issuer", &self.issuer)
            .field("member_claim", &self.member_claim)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Pick the HMAC variant for a secret of `len` bytes.
fn algorithm_for(len: usize) -> Result<Algorithm, JwtConfigError> {
    match len {
        64.. => Ok(Algorithm::HS512),
        48.. => Ok(Algorithm::HS384),
        MIN_SECRET_BYTES.. => Ok(Algorithm::HS256),
        actual => Err(JwtConfigError::SecretTooShort {
            actual,
            min: MIN_SECRET_BYTES,
        }),
    }
}

/// Signs and verifies member access tokens with a shared secret.
#[derive(Clone)]
pub struct JwtHandler {
    token_type: String,
    issuer: String,
    member_claim: String,
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtHandler")
            .field("token_type", &self.token_type)
            .field("issuer", &self.issuer)
            .field("member_claim", &self.member_claim)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl JwtHandler {
    /// Validate `properties` and derive the signing keys.
    pub fn new(properties: &JwtProperties) -> Result<Self, JwtConfigError> {
        for (setting, value) in [
            ("token type", &properties.token_type),
            ("issuer", &properties.issuer),
            ("member claim", &properties.member_claim),
        ] {
            if value.trim().is_empty() {
                return Err(JwtConfigError::Blank { setting });
            }
        }
        if RESERVED_CLAIMS.contains(&properties.member_claim.as_str()) {
            return Err(JwtConfigError::ReservedClaim(
                properties.member_claim.clone(),
            ));
        }

        let secret = properties.secret_key.as_bytes();
        let algorithm = algorithm_for(secret.len())?;
        Ok(Self {
            token_type: properties.token_type.clone(),
            issuer: properties.issuer.clone(),
            member_claim: properties.member_claim.clone(),
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// HMAC variant chosen for the configured secret.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation
    }

    fn timestamp_claim(claims: &Map<String, Value>, name: &str) -> Result<DateTime<Utc>, TokenError> {
        claims
            .get(name)
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| TokenError::invalid(format!("missing or malformed `{name}` claim")))
    }
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::invalid(error.to_string()),
    }
}

impl MemberTokenCodec for JwtHandler {
    fn create_token(
        &self,
        member_id: i64,
        expiration_seconds: u64,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if member_id < 1 {
            return Err(TokenError::invalid_member_id(member_id));
        }
        let iat = issued_at.timestamp();
        let exp = i64::try_from(expiration_seconds)
            .ok()
            .and_then(|secs| iat.checked_add(secs))
            .ok_or_else(|| TokenError::signing("expiry overflows the timestamp range"))?;

        let mut claims = Map::new();
        claims.insert("iss".to_owned(), Value::from(self.issuer.as_str()));
        claims.insert(self.member_claim.clone(), Value::from(member_id));
        claims.insert("iat".to_owned(), Value::from(iat));
        claims.insert("exp".to_owned(), Value::from(exp));

        let mut header = Header::new(self.algorithm);
        header.typ = Some(self.token_type.clone());

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn parse_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let header = jsonwebtoken::decode_header(token).map_err(map_decode_error)?;
        if header.typ.as_deref() != Some(self.token_type.as_str()) {
            return Err(TokenError::invalid("unexpected token type"));
        }

        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation(),
        )
        .map_err(map_decode_error)?;
        let claims = data.claims;

        let raw_member = claims
            .get(&self.member_claim)
            .and_then(Value::as_i64)
            .ok_or_else(|| TokenError::invalid("missing or malformed member claim"))?;
        let member_id =
            MemberId::new(raw_member).map_err(|_| TokenError::invalid_member_id(raw_member))?;

        Ok(TokenClaims {
            member_id,
            issued_at: Self::timestamp_claim(&claims, "iat")?,
            expires_at: Self::timestamp_claim(&claims, "exp")?,
        })
    }
}

#[cfg(test)]
#[path = "jwt_handler_tests.rs"]
mod tests;
