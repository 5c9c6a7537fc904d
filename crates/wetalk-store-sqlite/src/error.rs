//! Error type for `wetalk-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown visibility value: {0:?}")]
  UnknownVisibility(String),

  /// The counter increment targeted a post id with no stored document.
  #[error("post not found: {0}")]
  PostNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
