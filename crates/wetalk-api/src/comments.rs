//! Handlers for `/posts/:id/comments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/posts/:id/comments` | Optional `?visibility=public`, `?viewer=<name>` |
//! | `POST` | `/posts/:id/comments` | Body: [`CommentDraft`]; 201 + stored comment |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use wetalk_core::{
  comment::{Comment, CommentDraft},
  identity::TokenVerifier,
  store::ForumStore,
  visibility::{CommentFilter, CommentScope, VisibilityMode},
};

use crate::{AppState, RequestIdentity, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// `public` restricts the result to public comments; `all`, unset, or any
  /// other value means the default ("all") scope.
  pub visibility: Option<VisibilityMode>,
  /// Declared viewer name used as the private-thread matching key.
  pub viewer: Option<String>,
}

/// `GET /posts/:id/comments[?visibility=public][&viewer=<name>]`
///
/// The visibility rule lives entirely in [`CommentScope::from_request`];
/// this handler only forwards the request parameters.
pub async fn list<S, V>(
  State(state): State<AppState<S, V>>,
  Path(post_id): Path<Uuid>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Comment>>, ApiError>
where
  S: ForumStore,
  V: TokenVerifier,
{
  let scope = CommentScope::from_request(params.visibility, params.viewer);
  let filter = CommentFilter::new(post_id, scope);

  let comments = state
    .store
    .list_comments(&filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(comments))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /posts/:id/comments` — 404 unless the post exists; on success the
/// parent post's comment counter is incremented.
pub async fn create<S, V>(
  State(state): State<AppState<S, V>>,
  Path(post_id): Path<Uuid>,
  RequestIdentity(identity): RequestIdentity,
  Json(draft): Json<CommentDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ForumStore,
  V: TokenVerifier,
{
  state
    .store
    .get_post(post_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("post {post_id} not found")))?;

  let new_comment = draft.stamp(post_id, &identity)?;
  let comment = state
    .store
    .create_comment(new_comment)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  // The insert and the counter increment are two independent single-document
  // operations. If the increment fails the comment stays and the counter
  // undercounts — an accepted consistency gap, logged for visibility.
  if let Err(e) = state.store.increment_comment_count(post_id).await {
    tracing::warn!(
      error = %e,
      post_id = %post_id,
      "comment stored but counter increment failed"
    );
  }

  Ok((StatusCode::CREATED, Json(comment)))
}
