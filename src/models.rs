//! Changeset Models
//!
//! Raw changeset records as embedded in the page, and the normalized item
//! the triage engine works with.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Changeset identifier, unique across the loaded universe
pub type ChangesetId = u64;

/// Changeset record as delivered by the server (subset used by the UI)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawChangeset {
    #[serde(rename = "@id")]
    pub id: ChangesetId,
    #[serde(rename = "@uid", default)]
    pub uid: u64,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    /// Latest user details; `None` when the account has been deleted
    #[serde(default)]
    pub user: Option<RawUser>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawUser {
    pub display_name: String,
    #[serde(default)]
    pub blocks: RawBlocks,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawBlocks {
    #[serde(default)]
    pub received: RawBlockCount,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawBlockCount {
    #[serde(default)]
    pub active: u64,
}

/// A changeset annotated with the display fields the triage UI needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub id: ChangesetId,
    /// Display name, or `user_<uid>` for deleted accounts
    pub user: String,
    pub deleted: bool,
    pub blocked: bool,
    /// Comment text, never empty
    pub comment: String,
}

impl RawChangeset {
    /// Derive display fields. `placeholder` replaces a missing or empty comment.
    pub fn normalize(self, placeholder: &str) -> Changeset {
        let comment = self
            .tags
            .and_then(|mut tags| tags.remove("comment"))
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| placeholder.to_string());

        match self.user {
            Some(user) => Changeset {
                id: self.id,
                user: user.display_name,
                deleted: false,
                blocked: user.blocks.received.active > 0,
                comment,
            },
            None => Changeset {
                id: self.id,
                user: format!("user_{}", self.uid),
                deleted: true,
                blocked: false,
                comment,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawChangeset {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_live_user() {
        let cs = parse(
            r#"{"@id": 42, "@uid": 7, "tags": {"comment": "fix road"},
                "user": {"display_name": "alice", "blocks": {"received": {"count": 3, "active": 0}}}}"#,
        )
        .normalize("(no comment)");

        assert_eq!(cs.id, 42);
        assert_eq!(cs.user, "alice");
        assert!(!cs.deleted);
        assert!(!cs.blocked);
        assert_eq!(cs.comment, "fix road");
    }

    #[test]
    fn test_normalize_blocked_user() {
        let cs = parse(
            r#"{"@id": 1, "@uid": 7, "user": {"display_name": "bob", "blocks": {"received": {"active": 2}}}}"#,
        )
        .normalize("(no comment)");

        assert!(cs.blocked);
        assert!(!cs.deleted);
        assert_eq!(cs.comment, "(no comment)");
    }

    #[test]
    fn test_normalize_deleted_user() {
        let cs = parse(r#"{"@id": 5, "@uid": 99, "tags": {"comment": ""}, "user": null}"#)
            .normalize("-");

        assert_eq!(cs.user, "user_99");
        assert!(cs.deleted);
        assert!(!cs.blocked);
        assert_eq!(cs.comment, "-");
    }
}
