//! [`SqliteStore`] — the SQLite implementation of [`ForumStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use wetalk_core::{
  comment::{Comment, NewComment},
  post::{NewPost, Post},
  store::ForumStore,
  visibility::{CommentFilter, CommentScope},
};

use crate::{
  Error, Result,
  encode::{RawComment, RawPost, encode_dt, encode_uuid, encode_visibility},
  schema::SCHEMA,
};

const POST_COLUMNS: &str =
  "post_id, title, body, author_name, author_id, is_guest, comment_count, created_at";

const COMMENT_COLUMNS: &str =
  "comment_id, post_id, author_name, author_id, is_guest, content, visibility, recipient_name, created_at";

fn post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPost> {
  Ok(RawPost {
    post_id:       row.get(0)?,
    title:         row.get(1)?,
    body:          row.get(2)?,
    author_name:   row.get(3)?,
    author_id:     row.get(4)?,
    is_guest:      row.get(5)?,
    comment_count: row.get(6)?,
    created_at:    row.get(7)?,
  })
}

fn comment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawComment> {
  Ok(RawComment {
    comment_id:     row.get(0)?,
    post_id:        row.get(1)?,
    author_name:    row.get(2)?,
    author_id:      row.get(3)?,
    is_guest:       row.get(4)?,
    content:        row.get(5)?,
    visibility:     row.get(6)?,
    recipient_name: row.get(7)?,
    created_at:     row.get(8)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A WeTalk forum store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path.as_ref().to_owned()).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a post SELECT with a fixed ORDER BY / WHERE suffix.
  async fn select_posts(
    &self,
    suffix: &'static str,
    params: Vec<Box<dyn rusqlite::ToSql + Send>>,
  ) -> Result<Vec<Post>> {
    let raws: Vec<RawPost> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts {suffix}");
        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> =
          params.iter().map(|p| p.as_ref() as &dyn rusqlite::ToSql).collect();
        let rows = stmt
          .query_map(param_refs.as_slice(), post_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPost::into_post).collect()
  }
}

// ─── ForumStore impl ─────────────────────────────────────────────────────────

impl ForumStore for SqliteStore {
  type Error = Error;

  // ── Posts ─────────────────────────────────────────────────────────────────

  async fn create_post(&self, new: NewPost) -> Result<Post> {
    let post = Post {
      id:            Uuid::new_v4(),
      title:         new.title,
      body:          new.body,
      author_name:   new.author_name,
      author_id:     new.author_id,
      is_guest:      new.is_guest,
      comment_count: 0,
      created_at:    Utc::now(),
    };

    let id_str    = encode_uuid(post.id);
    let at_str    = encode_dt(post.created_at);
    let title     = post.title.clone();
    let body      = post.body.clone();
    let author    = post.author_name.clone();
    let author_id = post.author_id.clone();
    let is_guest  = post.is_guest;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO posts (
             post_id, title, body, author_name, author_id,
             is_guest, comment_count, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
          rusqlite::params![id_str, title, body, author, author_id, is_guest, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(post)
  }

  async fn list_posts(&self) -> Result<Vec<Post>> {
    self
      .select_posts("ORDER BY created_at DESC", vec![])
      .await
  }

  async fn hot_posts(&self, limit: usize) -> Result<Vec<Post>> {
    // Clamp rather than cast: past i64::MAX the cast wraps negative, which
    // SQLite reads as "no limit".
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    self
      .select_posts(
        "ORDER BY comment_count DESC, created_at DESC LIMIT ?1",
        vec![Box::new(limit)],
      )
      .await
  }

  async fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPost> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE post_id = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], post_from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPost::into_post).transpose()
  }

  async fn posts_by_author(&self, author_id: &str) -> Result<Vec<Post>> {
    self
      .select_posts(
        "WHERE author_id = ?1 ORDER BY created_at DESC",
        vec![Box::new(author_id.to_owned())],
      )
      .await
  }

  async fn increment_comment_count(&self, post_id: Uuid) -> Result<()> {
    let id_str = encode_uuid(post_id);

    let updated = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE posts SET comment_count = comment_count + 1 WHERE post_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(n)
      })
      .await?;

    if updated == 0 {
      return Err(Error::PostNotFound(post_id));
    }
    Ok(())
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn create_comment(&self, new: NewComment) -> Result<Comment> {
    let comment = Comment {
      id:             Uuid::new_v4(),
      post_id:        new.post_id,
      author_name:    new.author_name,
      author_id:      new.author_id,
      is_guest:       new.is_guest,
      content:        new.content,
      visibility:     new.visibility,
      recipient_name: new.recipient_name,
      created_at:     Utc::now(),
    };

    let id_str     = encode_uuid(comment.id);
    let post_str   = encode_uuid(comment.post_id);
    let author     = comment.author_name.clone();
    let author_id  = comment.author_id.clone();
    let is_guest   = comment.is_guest;
    let content    = comment.content.clone();
    let visibility = encode_visibility(comment.visibility).to_owned();
    let recipient  = comment.recipient_name.clone();
    let at_str     = encode_dt(comment.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (
             comment_id, post_id, author_name, author_id, is_guest,
             content, visibility, recipient_name, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str, post_str, author, author_id, is_guest,
            content, visibility, recipient, at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(comment)
  }

  async fn list_comments(&self, filter: &CommentFilter) -> Result<Vec<Comment>> {
    // The WHERE clause built here must agree with `CommentFilter::matches`.
    let post_str = encode_uuid(filter.post_id);
    let scope    = filter.scope.clone();

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let (condition, viewer): (&str, Option<String>) = match scope {
          CommentScope::PublicOnly => ("AND visibility = 'public'", None),
          CommentScope::Participant(name) => (
            "AND (visibility = 'public' OR author_name = ?2 OR recipient_name = ?2)",
            Some(name),
          ),
          CommentScope::Unrestricted => ("", None),
        };

        let sql = format!(
          "SELECT {COMMENT_COLUMNS} FROM comments
           WHERE post_id = ?1 {condition}
           ORDER BY created_at ASC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = if let Some(name) = viewer {
          stmt
            .query_map(rusqlite::params![post_str, name], comment_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          stmt
            .query_map(rusqlite::params![post_str], comment_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }
}
