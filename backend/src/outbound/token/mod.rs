//! HMAC-signed member access tokens.

mod fingerprint;
mod jwt_handler;

pub use fingerprint::secret_fingerprint;
pub use jwt_handler::{JwtConfigError, JwtHandler, JwtProperties};
