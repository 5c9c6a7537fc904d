//! JSON REST API for WeTalk.
//!
//! Exposes an axum [`Router`] backed by any
//! [`wetalk_core::store::ForumStore`] and any
//! [`wetalk_core::identity::TokenVerifier`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", wetalk_api::api_router(store.clone(), verifier.clone()))
//! ```

pub mod comments;
pub mod error;
pub mod identity;
pub mod posts;

use std::sync::Arc;

use axum::{
  Json, Router,
  middleware,
  routing::get,
};
use serde_json::json;
use wetalk_core::{identity::TokenVerifier, store::ForumStore};

pub use error::ApiError;
pub use identity::RequestIdentity;

/// Shared state threaded through all axum handlers.
pub struct AppState<S, V> {
  pub store:    Arc<S>,
  pub verifier: Arc<V>,
}

// Manual impl: `derive(Clone)` would demand `S: Clone`, but only the Arcs
// are cloned.
impl<S, V> Clone for AppState<S, V> {
  fn clone(&self) -> Self {
    AppState {
      store:    self.store.clone(),
      verifier: self.verifier.clone(),
    }
  }
}

/// Build a fully-materialised API router for `store` and `verifier`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, V>(store: Arc<S>, verifier: Arc<V>) -> Router<()>
where
  S: ForumStore + 'static,
  V: TokenVerifier + 'static,
{
  let state = AppState { store, verifier };

  Router::new()
    .route("/health", get(health))
    // Posts
    .route("/posts", get(posts::list::<S, V>).post(posts::create::<S, V>))
    .route("/posts/hot", get(posts::hot::<S, V>))
    .route("/posts/{id}", get(posts::get_one::<S, V>))
    .route("/me/posts", get(posts::mine::<S, V>))
    // Comments
    .route(
      "/posts/{id}/comments",
      get(comments::list::<S, V>).post(comments::create::<S, V>),
    )
    // Identity is resolved once here, before any handler runs.
    .layer(middleware::from_fn_with_state(
      state.clone(),
      identity::resolve::<S, V>,
    ))
    .with_state(state)
}

/// `GET /health` — liveness probe.
async fn health() -> Json<serde_json::Value> {
  Json(json!({ "status": "ok" }))
}
