//! Comment — a threaded reply on a post, public or private-addressed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  authorship::Authorship,
  identity::Identity,
};

/// Whether a comment is readable by everyone or restricted to a named pair
/// of participants.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
  #[default]
  Public,
  Private,
}

/// A persisted comment document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  pub id:          Uuid,
  pub post_id:     Uuid,
  pub author_name: String,
  pub author_id:   Option<String>,
  pub is_guest:    bool,
  pub content:     String,
  pub visibility:  Visibility,
  /// The other party of a private thread. Always `None` for public
  /// comments — the write path discards whatever was submitted.
  pub recipient_name: Option<String>,
  pub created_at:  DateTime<Utc>,
}

/// Client-submitted body for comment creation, before authorship stamping.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
  #[serde(default)]
  pub author_name: Option<String>,
  #[serde(default)]
  pub is_guest: bool,
  pub content: String,
  #[serde(default)]
  pub visibility: Visibility,
  #[serde(default)]
  pub recipient_name: Option<String>,
}

/// A validated, stamped comment ready for the store. `id` and `created_at`
/// are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
  pub post_id:        Uuid,
  pub author_name:    String,
  pub author_id:      Option<String>,
  pub is_guest:       bool,
  pub content:        String,
  pub visibility:     Visibility,
  pub recipient_name: Option<String>,
}

impl CommentDraft {
  /// Validate the draft and stamp authorship from `identity`.
  ///
  /// `recipient_name` is forced to `None` unless visibility is `Private`.
  pub fn stamp(self, post_id: Uuid, identity: &Identity) -> Result<NewComment> {
    let author = Authorship::resolve(identity, self.author_name, self.is_guest)?;

    if self.content.is_empty() {
      return Err(Error::MissingField("content"));
    }

    let recipient_name = match self.visibility {
      Visibility::Private => self.recipient_name,
      Visibility::Public => None,
    };

    Ok(NewComment {
      post_id,
      author_name: author.name,
      author_id: author.id,
      is_guest: author.is_guest,
      content: self.content,
      visibility: self.visibility,
      recipient_name,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> CommentDraft {
    CommentDraft {
      author_name:    Some("Guest42".into()),
      is_guest:       true,
      content:        "hi".into(),
      visibility:     Visibility::Public,
      recipient_name: None,
    }
  }

  #[test]
  fn guest_comment_keeps_client_author_fields() {
    let new = draft().stamp(Uuid::new_v4(), &Identity::Anonymous).unwrap();
    assert_eq!(new.author_name, "Guest42");
    assert_eq!(new.author_id, None);
    assert!(new.is_guest);
  }

  #[test]
  fn empty_content_is_rejected() {
    let mut d = draft();
    d.content = String::new();
    assert_eq!(
      d.stamp(Uuid::new_v4(), &Identity::Anonymous).unwrap_err(),
      Error::MissingField("content")
    );
  }

  #[test]
  fn public_comment_discards_submitted_recipient() {
    let mut d = draft();
    d.recipient_name = Some("bob".into());
    let new = d.stamp(Uuid::new_v4(), &Identity::Anonymous).unwrap();
    assert_eq!(new.recipient_name, None);
  }

  #[test]
  fn private_comment_keeps_recipient() {
    let mut d = draft();
    d.visibility = Visibility::Private;
    d.recipient_name = Some("bob".into());
    let new = d.stamp(Uuid::new_v4(), &Identity::Anonymous).unwrap();
    assert_eq!(new.recipient_name.as_deref(), Some("bob"));
  }
}
