//! Post — a top-level forum entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  authorship::Authorship,
  identity::Identity,
};

/// A persisted post document. Owned by the storage collaborator; the server
/// never holds one across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  pub id:            Uuid,
  pub title:         String,
  pub body:          String,
  pub author_name:   String,
  /// `None` means guest-authored. `is_guest` is tracked independently
  /// alongside it, matching the stored document shape.
  pub author_id:     Option<String>,
  pub is_guest:      bool,
  /// Number of comments ever created against this post. Incremented on
  /// comment creation, never decremented (there is no deletion path).
  pub comment_count: i64,
  pub created_at:    DateTime<Utc>,
}

/// Client-submitted body for post creation, before authorship stamping.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
  pub title: String,
  pub body:  String,
  #[serde(default)]
  pub author_name: Option<String>,
  #[serde(default)]
  pub is_guest: bool,
}

/// A validated, stamped post ready for the store. `id`, `comment_count`, and
/// `created_at` are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
  pub title:       String,
  pub body:        String,
  pub author_name: String,
  pub author_id:   Option<String>,
  pub is_guest:    bool,
}

impl PostDraft {
  /// Validate the draft and stamp authorship from `identity`.
  pub fn stamp(self, identity: &Identity) -> Result<NewPost> {
    let author = Authorship::resolve(identity, self.author_name, self.is_guest)?;

    if self.title.is_empty() {
      return Err(Error::MissingField("title"));
    }
    if self.body.is_empty() {
      return Err(Error::MissingField("body"));
    }

    Ok(NewPost {
      title:       self.title,
      body:        self.body,
      author_name: author.name,
      author_id:   author.id,
      is_guest:    author.is_guest,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::identity::Principal;

  fn draft() -> PostDraft {
    PostDraft {
      title:       "T".into(),
      body:        "B".into(),
      author_name: Some("ignored".into()),
      is_guest:    true,
    }
  }

  #[test]
  fn authenticated_stamp_discards_client_author_fields() {
    let identity = Identity::Authenticated(Principal {
      subject_id:   "u1".into(),
      display_name: "alice".into(),
      email:        None,
    });

    let new_post = draft().stamp(&identity).unwrap();
    assert_eq!(new_post.author_name, "alice");
    assert_eq!(new_post.author_id.as_deref(), Some("u1"));
    assert!(!new_post.is_guest);
  }

  #[test]
  fn empty_title_and_body_are_rejected() {
    let identity = Identity::Anonymous;

    let mut d = draft();
    d.title = String::new();
    assert_eq!(
      d.stamp(&identity).unwrap_err(),
      Error::MissingField("title")
    );

    let mut d = draft();
    d.body = String::new();
    assert_eq!(d.stamp(&identity).unwrap_err(), Error::MissingField("body"));
  }
}
