//! Request-scoped identity and the fail-open resolver.
//!
//! An [`Identity`] is computed exactly once per inbound request from the raw
//! `Authorization` header and an injected [`TokenVerifier`], then attached to
//! the request context. It is never persisted, never cached, never shared
//! across requests.
//!
//! Resolution is **fail-open**: a missing, malformed, or unverifiable
//! credential produces [`Identity::Anonymous`] rather than an error.
//! Authentication is an optional enhancement here, never a gate — every
//! route must remain usable by guests. [`resolve_identity`] cannot fail by
//! signature, which makes the contract visible in the type.

use std::future::Future;

// ─── Identity ────────────────────────────────────────────────────────────────

/// The resolved principal (or anonymous marker) attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
  Anonymous,
  Authenticated(Principal),
}

impl Identity {
  pub fn is_authenticated(&self) -> bool {
    matches!(self, Identity::Authenticated(_))
  }

  /// The principal, if the request is authenticated.
  pub fn principal(&self) -> Option<&Principal> {
    match self {
      Identity::Authenticated(p) => Some(p),
      Identity::Anonymous => None,
    }
  }
}

/// An authenticated entity, keyed by the trust authority's stable subject id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
  /// Opaque, stable, globally unique id assigned by the trust authority.
  /// The authority owns its format; we never parse it.
  pub subject_id:   String,
  /// Human-readable name. May change between logins; `subject_id` is the
  /// identity key, not this.
  pub display_name: String,
  pub email:        Option<String>,
}

impl From<ClaimSet> for Principal {
  fn from(claims: ClaimSet) -> Self {
    // Display-name fallback chain: provider username, then email, then a
    // literal placeholder. A present-but-empty claim falls through the same
    // as an absent one.
    let display_name = claims
      .provider_username
      .filter(|name| !name.is_empty())
      .or_else(|| claims.email.clone().filter(|email| !email.is_empty()))
      .unwrap_or_else(|| "User".to_string());

    Principal {
      subject_id: claims.subject_id,
      display_name,
      email: claims.email,
    }
  }
}

// ─── Token verification ──────────────────────────────────────────────────────

/// The validated claims returned by a [`TokenVerifier`].
///
/// Strongly typed at the trust boundary so downstream logic never inspects
/// an untyped bag of claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
  pub subject_id:        String,
  pub provider_username: Option<String>,
  pub email:             Option<String>,
}

/// Capability that validates a bearer token against a trust authority
/// (signature, issuer, expiry) and returns its claims.
///
/// Exactly one implementation is active per process, selected at startup.
/// Methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait TokenVerifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn verify<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<ClaimSet, Self::Error>> + Send + 'a;
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Extract the token from a `Bearer <token>` authorization value.
pub fn bearer_token(authorization: &str) -> Option<&str> {
  authorization.strip_prefix("Bearer ")
}

/// Resolve an inbound credential into an [`Identity`].
///
/// Runs once per request, before any route-specific logic. Makes at most one
/// outbound verification call. Verification failures are logged and
/// downgraded to [`Identity::Anonymous`]; they never escape as errors.
pub async fn resolve_identity<V: TokenVerifier>(
  authorization: Option<&str>,
  verifier: &V,
) -> Identity {
  let Some(token) = authorization.and_then(bearer_token) else {
    // No credential, or not the bearer scheme. Not an error path.
    return Identity::Anonymous;
  };

  match verifier.verify(token).await {
    Ok(claims) => Identity::Authenticated(Principal::from(claims)),
    Err(e) => {
      tracing::warn!(error = %e, "token verification failed, continuing as guest");
      Identity::Anonymous
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
