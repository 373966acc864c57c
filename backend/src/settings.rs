//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DIARY_*` environment variables, and config
//! files. Everything is optional on the wire; accessors apply defaults and
//! report settings that cannot be defaulted.

use std::fmt;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::outbound::persistence::PoolConfig;
use crate::outbound::token::JwtProperties;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ISSUER: &str = "diary-backend";
const DEFAULT_TOKEN_TYPE: &str = "JWT";
const DEFAULT_MEMBER_CLAIM: &str = "memberId";
/// One day.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: u64 = 86_400;

/// Settings that are missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{setting} must be set")]
    Missing { setting: &'static str },
    #[error("{setting} is invalid: {message}")]
    Invalid {
        setting: &'static str,
        message: String,
    },
}

/// Server and token configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIARY")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// `iss` claim written into and required from tokens.
    pub jwt_issuer: Option<String>,
    /// `typ` header value.
    pub jwt_token_type: Option<String>,
    /// Name of the claim carrying the member id.
    pub jwt_member_claim: Option<String>,
    /// HMAC secret, at least 32 bytes.
    pub jwt_secret_key: Option<String>,
    /// Lifetime of issued tokens.
    pub access_token_ttl_seconds: Option<u64>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("pool_max_size", &self.pool_max_size)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_token_type", &self.jwt_token_type)
            .field("jwt_member_claim", &self.jwt_member_claim)
            .field("jwt_secret_key", &self.jwt_secret_key.as_ref().map(|_| "<redacted>"))
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .finish()
    }
}

impl AppSettings {
    /// Listening address, `0.0.0.0:8080` by default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
                setting: "bind_addr",
                message: err.to_string(),
            })
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().filter(|url| !url.trim().is_empty())?;
        let config = PoolConfig::new(url);
        Some(match self.pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        })
    }

    /// Token settings with defaults applied.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Missing`] when no secret is configured.
    pub fn jwt_properties(&self) -> Result<JwtProperties, SettingsError> {
        let secret = self
            .jwt_secret_key
            .clone()
            .filter(|secret| !secret.is_empty())
            .ok_or(SettingsError::Missing {
                setting: "jwt_secret_key",
            })?;
        Ok(JwtProperties {
            token_type: self
                .jwt_token_type
                .clone()
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_owned()),
            issuer: self
                .jwt_issuer
                .clone()
                .unwrap_or_else(|| DEFAULT_ISSUER.to_owned()),
            member_claim: self
                .jwt_member_claim
                .clone()
                .unwrap_or_else(|| DEFAULT_MEMBER_CLAIM.to_owned()),
            secret_key: Zeroizing::new(secret),
        })
    }

    pub fn access_token_ttl_seconds(&self) -> u64 {
        self.access_token_ttl_seconds
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECONDS)
    }
}
