//! Error type shared by the verifier implementations.
//!
//! These errors never reach a client: the identity resolver logs them and
//! downgrades the request to anonymous.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
  /// Malformed token, bad signature, expired, or wrong issuer.
  #[error("token rejected: {0}")]
  Jwt(#[from] jsonwebtoken::errors::Error),

  #[error("token header carries no key id")]
  MissingKeyId,

  #[error("no JWKS key matches kid {0:?}")]
  UnknownKey(String),

  #[error("invalid JWKS document: {0}")]
  InvalidJwks(#[from] serde_json::Error),
}

pub type Result<T, E = VerifyError> = std::result::Result<T, E>;
