//! Per-request identity resolution.
//!
//! [`resolve`] is a router-wide middleware: it runs once per inbound request,
//! before any route-specific logic, and attaches the resolved [`Identity`] to
//! the request extensions. Handlers read it back through the
//! [`RequestIdentity`] extractor, whose rejection type is [`Infallible`]:
//! resolution is fail-open, so identity handling can never turn a request
//! away — a missing or bad credential yields the anonymous identity and the
//! handler runs regardless.

use std::convert::Infallible;

use axum::{
  extract::{FromRequestParts, Request, State},
  http::{header, request::Parts},
  middleware::Next,
  response::Response,
};
use wetalk_core::{
  identity::{Identity, TokenVerifier, resolve_identity},
  store::ForumStore,
};

use crate::AppState;

/// Resolve the `Authorization` header into an [`Identity`] and stash it in
/// the request extensions for the handlers downstream.
pub async fn resolve<S, V>(
  State(state): State<AppState<S, V>>,
  mut request: Request,
  next: Next,
) -> Response
where
  S: ForumStore + 'static,
  V: TokenVerifier + 'static,
{
  let authorization = request
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned);

  let identity =
    resolve_identity(authorization.as_deref(), state.verifier.as_ref()).await;
  request.extensions_mut().insert(identity);

  next.run(request).await
}

/// The identity resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequestIdentity
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    // A request that somehow skipped the middleware reads as anonymous.
    let identity = parts
      .extensions
      .get::<Identity>()
      .cloned()
      .unwrap_or(Identity::Anonymous);
    Ok(RequestIdentity(identity))
  }
}
