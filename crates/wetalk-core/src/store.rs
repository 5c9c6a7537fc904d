//! The `ForumStore` trait — the document-store collaborator interface.
//!
//! The trait is implemented by storage backends (e.g. `wetalk-store-sqlite`).
//! Higher layers (`wetalk-api`, the server binary) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  comment::{Comment, NewComment},
  post::{NewPost, Post},
  visibility::CommentFilter,
};

/// Abstraction over a WeTalk document store.
///
/// Each operation maps to a single atomic document-store call (create,
/// find-by-filter-with-sort, find-by-id, increment-field-by-id). No
/// multi-document transaction exists: a comment insert followed by a counter
/// increment is two independent operations, and callers tolerate the counter
/// lagging if the second fails.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ForumStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Posts ─────────────────────────────────────────────────────────────

  /// Persist a new post. The store assigns `id`, a zero `comment_count`,
  /// and `created_at`.
  fn create_post(
    &self,
    new: NewPost,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  /// All posts, newest first.
  fn list_posts(
    &self,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  /// The `limit` posts with the most comments, ties broken newest first.
  fn hot_posts(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  /// Retrieve a post by id. Returns `None` if not found.
  fn get_post(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  /// All posts authored by the given principal, newest first.
  fn posts_by_author<'a>(
    &'a self,
    author_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + 'a;

  /// Atomically add 1 to a post's `comment_count`.
  fn increment_comment_count(
    &self,
    post_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  /// Persist a new comment. The store assigns `id` and `created_at`.
  /// Does NOT touch the parent post's counter; that is a separate
  /// [`increment_comment_count`](Self::increment_comment_count) call.
  fn create_comment(
    &self,
    new: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// Comments matching `filter`, ordered by creation time ascending.
  fn list_comments<'a>(
    &'a self,
    filter: &'a CommentFilter,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + 'a;
}
