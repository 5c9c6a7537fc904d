//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, visibility as its lowercase wire word.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use wetalk_core::{
  comment::{Comment, Visibility},
  post::Post,
};

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Visibility ───────────────────────────────────────────────────────────────

pub fn encode_visibility(v: Visibility) -> &'static str {
  match v {
    Visibility::Public => "public",
    Visibility::Private => "private",
  }
}

pub fn decode_visibility(s: &str) -> Result<Visibility> {
  match s {
    "public" => Ok(Visibility::Public),
    "private" => Ok(Visibility::Private),
    other => Err(Error::UnknownVisibility(other.to_string())),
  }
}

// ─── Row types ────────────────────────────────────────────────────────────────

/// A `posts` row as read from SQLite, before decoding.
pub struct RawPost {
  pub post_id:       String,
  pub title:         String,
  pub body:          String,
  pub author_name:   String,
  pub author_id:     Option<String>,
  pub is_guest:      bool,
  pub comment_count: i64,
  pub created_at:    String,
}

impl RawPost {
  pub fn into_post(self) -> Result<Post> {
    Ok(Post {
      id:            decode_uuid(&self.post_id)?,
      title:         self.title,
      body:          self.body,
      author_name:   self.author_name,
      author_id:     self.author_id,
      is_guest:      self.is_guest,
      comment_count: self.comment_count,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// A `comments` row as read from SQLite, before decoding.
pub struct RawComment {
  pub comment_id:     String,
  pub post_id:        String,
  pub author_name:    String,
  pub author_id:      Option<String>,
  pub is_guest:       bool,
  pub content:        String,
  pub visibility:     String,
  pub recipient_name: Option<String>,
  pub created_at:     String,
}

impl RawComment {
  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      id:             decode_uuid(&self.comment_id)?,
      post_id:        decode_uuid(&self.post_id)?,
      author_name:    self.author_name,
      author_id:      self.author_id,
      is_guest:       self.is_guest,
      content:        self.content,
      visibility:     decode_visibility(&self.visibility)?,
      recipient_name: self.recipient_name,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}
