//! Handlers for `/posts` and `/me/posts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/posts` | All posts, newest first |
//! | `POST` | `/posts` | Body: [`PostDraft`]; 201 + stored post |
//! | `GET`  | `/posts/hot` | Optional `?limit=` (default 1) |
//! | `GET`  | `/posts/:id` | 404 if not found |
//! | `GET`  | `/me/posts` | 401 unless authenticated |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use wetalk_core::{
  identity::TokenVerifier,
  post::{Post, PostDraft},
  store::ForumStore,
};

use crate::{AppState, RequestIdentity, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /posts`
pub async fn list<S, V>(
  State(state): State<AppState<S, V>>,
) -> Result<Json<Vec<Post>>, ApiError>
where
  S: ForumStore,
  V: TokenVerifier,
{
  let posts = state
    .store
    .list_posts()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(posts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /posts` — authorship is stamped from the resolved identity; client
/// author fields only count for guests.
pub async fn create<S, V>(
  State(state): State<AppState<S, V>>,
  RequestIdentity(identity): RequestIdentity,
  Json(draft): Json<PostDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ForumStore,
  V: TokenVerifier,
{
  let new_post = draft.stamp(&identity)?;
  let post = state
    .store
    .create_post(new_post)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(post)))
}

// ─── Hot ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HotParams {
  pub limit: Option<usize>,
}

/// `GET /posts/hot[?limit=<n>]` — ranked by comment volume, then recency.
pub async fn hot<S, V>(
  State(state): State<AppState<S, V>>,
  Query(params): Query<HotParams>,
) -> Result<Json<Vec<Post>>, ApiError>
where
  S: ForumStore,
  V: TokenVerifier,
{
  let posts = state
    .store
    .hot_posts(params.limit.unwrap_or(1))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(posts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /posts/:id`
pub async fn get_one<S, V>(
  State(state): State<AppState<S, V>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError>
where
  S: ForumStore,
  V: TokenVerifier,
{
  let post = state
    .store
    .get_post(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;
  Ok(Json(post))
}

// ─── Mine ─────────────────────────────────────────────────────────────────────

/// `GET /me/posts` — the authenticated principal's posts, newest first.
/// The one endpoint that requires authentication.
pub async fn mine<S, V>(
  State(state): State<AppState<S, V>>,
  RequestIdentity(identity): RequestIdentity,
) -> Result<Json<Vec<Post>>, ApiError>
where
  S: ForumStore,
  V: TokenVerifier,
{
  let principal = identity.principal().ok_or(ApiError::AuthRequired)?;

  let posts = state
    .store
    .posts_by_author(&principal.subject_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(posts))
}
