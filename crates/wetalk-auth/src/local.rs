//! Shared-secret (HS256) token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use wetalk_core::identity::{ClaimSet, TokenVerifier};

use crate::error::{Result, VerifyError};

/// Claims carried by a locally issued token.
#[derive(Debug, Deserialize)]
struct LocalClaims {
  /// The principal's stable id.
  sub:      String,
  #[serde(default)]
  username: Option<String>,
  #[serde(default)]
  email:    Option<String>,
}

/// Verifies tokens signed with a process-wide shared secret.
///
/// Token *issuance* (and the password checks that precede it) is the trust
/// authority's business; this side only verifies.
pub struct LocalHs256Verifier {
  decoding_key: DecodingKey,
  validation:   Validation,
}

impl LocalHs256Verifier {
  pub fn new(secret: &str) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    LocalHs256Verifier {
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      validation,
    }
  }
}

impl TokenVerifier for LocalHs256Verifier {
  type Error = VerifyError;

  async fn verify(&self, token: &str) -> Result<ClaimSet> {
    let data =
      decode::<LocalClaims>(token, &self.decoding_key, &self.validation)?;

    Ok(ClaimSet {
      subject_id:        data.claims.sub,
      provider_username: data.claims.username,
      email:             data.claims.email,
    })
  }
}

#[cfg(test)]
mod tests {
  use jsonwebtoken::{EncodingKey, Header, encode};
  use serde::Serialize;
  use wetalk_core::identity::{Identity, resolve_identity};

  use super::*;

  #[derive(Serialize)]
  struct TestClaims {
    sub:      String,
    username: Option<String>,
    exp:      i64,
  }

  fn token(secret: &str, sub: &str, username: Option<&str>, exp: i64) -> String {
    encode(
      &Header::default(),
      &TestClaims {
        sub:      sub.into(),
        username: username.map(Into::into),
        exp,
      },
      &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
  }

  fn far_future() -> i64 {
    (chrono::Utc::now() + chrono::Duration::days(7)).timestamp()
  }

  #[tokio::test]
  async fn accepts_token_signed_with_the_shared_secret() {
    let verifier = LocalHs256Verifier::new("dev_secret");
    let claims = verifier
      .verify(&token("dev_secret", "u1", Some("alice"), far_future()))
      .await
      .unwrap();

    assert_eq!(claims.subject_id, "u1");
    assert_eq!(claims.provider_username.as_deref(), Some("alice"));
    assert_eq!(claims.email, None);
  }

  #[tokio::test]
  async fn rejects_wrong_secret() {
    let verifier = LocalHs256Verifier::new("dev_secret");
    let result = verifier
      .verify(&token("other_secret", "u1", None, far_future()))
      .await;
    assert!(result.is_err());
  }

  #[tokio::test]
  async fn rejects_expired_token() {
    let verifier = LocalHs256Verifier::new("dev_secret");
    let expired = (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp();
    let result = verifier.verify(&token("dev_secret", "u1", None, expired)).await;
    assert!(result.is_err());
  }

  #[tokio::test]
  async fn rejects_garbage_token() {
    let verifier = LocalHs256Verifier::new("dev_secret");
    assert!(verifier.verify("not-a-jwt").await.is_err());
  }

  /// The end-to-end contract: a bad credential downgrades to guest, it never
  /// rejects the request.
  #[tokio::test]
  async fn resolver_downgrades_expired_token_to_anonymous() {
    let verifier = LocalHs256Verifier::new("dev_secret");
    let expired = (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp();
    let header = format!("Bearer {}", token("dev_secret", "u1", None, expired));

    let identity = resolve_identity(Some(&header), &verifier).await;
    assert_eq!(identity, Identity::Anonymous);
  }

  #[tokio::test]
  async fn resolver_authenticates_valid_token() {
    let verifier = LocalHs256Verifier::new("dev_secret");
    let header = format!(
      "Bearer {}",
      token("dev_secret", "u1", Some("alice"), far_future())
    );

    let identity = resolve_identity(Some(&header), &verifier).await;
    let principal = identity.principal().expect("authenticated");
    assert_eq!(principal.subject_id, "u1");
    assert_eq!(principal.display_name, "alice");
  }
}
