//! SQL schema for the WeTalk SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS posts (
    post_id       TEXT PRIMARY KEY,
    title         TEXT NOT NULL,
    body          TEXT NOT NULL,
    author_name   TEXT NOT NULL,
    author_id     TEXT,             -- NULL means guest-authored
    is_guest      INTEGER NOT NULL DEFAULT 0,
    comment_count INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL     -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS comments (
    comment_id     TEXT PRIMARY KEY,
    post_id        TEXT NOT NULL REFERENCES posts(post_id),
    author_name    TEXT NOT NULL,
    author_id      TEXT,
    is_guest       INTEGER NOT NULL DEFAULT 0,
    content        TEXT NOT NULL,
    visibility     TEXT NOT NULL DEFAULT 'public',  -- 'public' | 'private'
    recipient_name TEXT,            -- other party of a private thread
    created_at     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS posts_created_idx  ON posts(created_at);
CREATE INDEX IF NOT EXISTS posts_author_idx   ON posts(author_id);
CREATE INDEX IF NOT EXISTS comments_post_idx  ON comments(post_id);

PRAGMA user_version = 1;
";
