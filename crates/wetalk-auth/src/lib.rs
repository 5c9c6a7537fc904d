//! Token-verifier implementations for WeTalk.
//!
//! Two mutually-exclusive schemes exist behind the single
//! [`TokenVerifier`](wetalk_core::identity::TokenVerifier) capability:
//!
//! - [`LocalHs256Verifier`] — tokens signed with a shared secret (HS256).
//! - [`JwksVerifier`] — tokens issued by a federated identity provider and
//!   verified against its JWKS document (RS256), with issuer enforcement.
//!
//! Exactly one is selected at process startup via [`AnyVerifier`]; both are
//! never live at once.

pub mod error;
pub mod jwks;
pub mod local;

pub use error::VerifyError;
pub use jwks::JwksVerifier;
pub use local::LocalHs256Verifier;

use wetalk_core::identity::{ClaimSet, TokenVerifier};

/// The process-wide verifier, chosen once from configuration.
pub enum AnyVerifier {
  Local(LocalHs256Verifier),
  Federated(JwksVerifier),
}

impl TokenVerifier for AnyVerifier {
  type Error = VerifyError;

  async fn verify(&self, token: &str) -> Result<ClaimSet, VerifyError> {
    match self {
      AnyVerifier::Local(v) => v.verify(token).await,
      AnyVerifier::Federated(v) => v.verify(token).await,
    }
  }
}
