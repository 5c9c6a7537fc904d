//! Authorship stamping — the shared write-path policy.
//!
//! Decides the final author fields for a new post or comment. When the
//! request carries an authenticated [`Identity`], client-submitted author
//! fields are never trusted: name, guest flag, and author id all come from
//! the resolved principal. Guests pass their declared name through.

use crate::{
  Error, Result,
  identity::Identity,
};

/// The resolved author fields stamped onto a new post or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorship {
  pub name:     String,
  /// `None` for guest-authored documents.
  pub id:       Option<String>,
  pub is_guest: bool,
}

impl Authorship {
  /// Resolve authorship from the request identity and the client-submitted
  /// author fields.
  ///
  /// Fails with [`Error::MissingField`] only for a guest with no (or an
  /// empty) declared name; an authenticated principal always has a display
  /// name.
  pub fn resolve(
    identity: &Identity,
    client_name: Option<String>,
    client_is_guest: bool,
  ) -> Result<Self> {
    match identity {
      Identity::Authenticated(principal) => Ok(Authorship {
        name:     principal.display_name.clone(),
        id:       Some(principal.subject_id.clone()),
        is_guest: false,
      }),
      Identity::Anonymous => {
        let name = client_name
          .filter(|n| !n.is_empty())
          .ok_or(Error::MissingField("authorName"))?;
        Ok(Authorship {
          name,
          id: None,
          is_guest: client_is_guest,
        })
      }
    }
  }
}
