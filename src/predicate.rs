//! Auto-move Selectors
//!
//! Boolean predicates for the bulk move form and value fields for the
//! per-item "move all matching" buttons.

use std::str::FromStr;

use crate::category::Category;
use crate::error::{TriageError, TriageResult};
use crate::models::Changeset;

/// A checkbox on the auto-move form (`data-auto-move="..."`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Author account was deleted
    Deleted,
    /// Author has an active block
    Blocked,
}

impl Predicate {
    pub const ALL: [Predicate; 2] = [Predicate::Deleted, Predicate::Blocked];

    pub fn holds(&self, cs: &Changeset) -> bool {
        match self {
            Predicate::Deleted => cs.deleted,
            Predicate::Blocked => cs.blocked,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Predicate::Deleted => "deleted",
            Predicate::Blocked => "blocked",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Predicate::Deleted => "Deleted accounts",
            Predicate::Blocked => "Blocked users",
        }
    }
}

impl FromStr for Predicate {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deleted" => Ok(Predicate::Deleted),
            "blocked" => Ok(Predicate::Blocked),
            other => Err(TriageError::UnknownPredicate(other.to_string())),
        }
    }
}

/// Field compared by a matching-value move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    Author,
    Comment,
}

impl MatchField {
    pub const ALL: [MatchField; 2] = [MatchField::Author, MatchField::Comment];

    pub fn value<'a>(&self, cs: &'a Changeset) -> &'a str {
        match self {
            MatchField::Author => &cs.user,
            MatchField::Comment => &cs.comment,
        }
    }

    /// Attribute carried by the row button, its value names the destination
    pub fn attribute(&self) -> &'static str {
        match self {
            MatchField::Author => "data-auto-move-user-to",
            MatchField::Comment => "data-auto-move-comment-to",
        }
    }

    /// Single letter shown next to the row buttons
    pub fn short(&self) -> &'static str {
        match self {
            MatchField::Author => "u",
            MatchField::Comment => "c",
        }
    }
}

/// Predicates selected on the auto-move form, from `(checked, data-auto-move)`
/// per checkbox. A single unknown ticked value rejects the whole selection.
pub fn checked_predicates(
    boxes: impl IntoIterator<Item = (bool, Option<String>)>,
) -> TriageResult<Vec<Predicate>> {
    boxes
        .into_iter()
        .filter(|(checked, _)| *checked)
        .map(|(_, kind)| kind.ok_or(TriageError::MissingAttribute("data-auto-move"))?.parse::<Predicate>())
        .collect()
}

/// Field and destination encoded on a row's move button. `attribute` looks
/// up an attribute of the button.
pub fn button_target(attribute: impl Fn(&str) -> Option<String>) -> TriageResult<(MatchField, Category)> {
    let (field, dest) = MatchField::ALL
        .into_iter()
        .find_map(|f| attribute(f.attribute()).map(|v| (f, v)))
        .ok_or(TriageError::MissingAttribute("data-auto-move-{user,comment}-to"))?;
    Ok((field, dest.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changeset(deleted: bool, blocked: bool) -> Changeset {
        Changeset {
            id: 1,
            user: "alice".to_string(),
            deleted,
            blocked,
            comment: "hello".to_string(),
        }
    }

    #[test]
    fn test_predicates() {
        assert!(Predicate::Deleted.holds(&changeset(true, false)));
        assert!(!Predicate::Blocked.holds(&changeset(true, false)));
        assert!(Predicate::Blocked.holds(&changeset(false, true)));
        assert_eq!(
            "spammer".parse::<Predicate>(),
            Err(TriageError::UnknownPredicate("spammer".to_string()))
        );
    }

    #[test]
    fn test_match_fields() {
        let cs = changeset(false, false);
        assert_eq!(MatchField::Author.value(&cs), "alice");
        assert_eq!(MatchField::Comment.value(&cs), "hello");
    }

    fn ticked(kind: &str) -> (bool, Option<String>) {
        (true, Some(kind.to_string()))
    }

    #[test]
    fn test_checked_predicates_ignores_unticked() {
        let boxes = [ticked("blocked"), (false, Some("bogus".to_string())), (false, None)];
        assert_eq!(checked_predicates(boxes).unwrap(), vec![Predicate::Blocked]);
    }

    #[test]
    fn test_one_unknown_predicate_rejects_all() {
        let err = checked_predicates([ticked("deleted"), ticked("bogus"), ticked("blocked")]).unwrap_err();
        assert_eq!(err, TriageError::UnknownPredicate("bogus".to_string()));

        let err = checked_predicates([ticked("deleted"), (true, None)]).unwrap_err();
        assert_eq!(err, TriageError::MissingAttribute("data-auto-move"));
    }

    #[test]
    fn test_button_target() {
        let target = button_target(|name| (name == "data-auto-move-comment-to").then(|| "malicious".to_string()));
        assert_eq!(target.unwrap(), (MatchField::Comment, Category::Malicious));
    }

    #[test]
    fn test_button_target_unknown_destination() {
        let err = button_target(|name| (name == "data-auto-move-user-to").then(|| "spam".to_string())).unwrap_err();
        assert_eq!(err, TriageError::UnknownCategory("spam".to_string()));

        let err = button_target(|_| None).unwrap_err();
        assert!(matches!(err, TriageError::MissingAttribute(_)));
    }
}
