//! Item Store
//!
//! The changesets loaded for this session. Read-only after construction:
//! triage only changes which category an item sits in.

use std::collections::BTreeMap;

use crate::error::{TriageError, TriageResult};
use crate::models::{Changeset, ChangesetId, RawChangeset};
use crate::predicate::MatchField;

#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: BTreeMap<ChangesetId, Changeset>,
}

impl ItemStore {
    pub fn new(items: impl IntoIterator<Item = Changeset>) -> Self {
        Self {
            items: items.into_iter().map(|cs| (cs.id, cs)).collect(),
        }
    }

    pub fn from_raw(raw: impl IntoIterator<Item = RawChangeset>, placeholder: &str) -> Self {
        Self::new(raw.into_iter().map(|r| r.normalize(placeholder)))
    }

    /// Parse a JSON object of changesets keyed by stringified identifier
    pub fn from_json(text: &str, placeholder: &str) -> TriageResult<Self> {
        let raw: BTreeMap<String, RawChangeset> =
            serde_json::from_str(text).map_err(|e| TriageError::InvalidUniverse(e.to_string()))?;
        Ok(Self::from_raw(raw.into_values(), placeholder))
    }

    pub fn get(&self, id: ChangesetId) -> TriageResult<&Changeset> {
        self.items.get(&id).ok_or(TriageError::ChangesetNotFound(id))
    }

    pub fn field(&self, id: ChangesetId, field: MatchField) -> TriageResult<&str> {
        self.get(id).map(|cs| field.value(cs))
    }

    /// All identifiers, ascending
    pub fn ids(&self) -> impl Iterator<Item = ChangesetId> + '_ {
        self.items.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_orders_by_id() {
        let store = ItemStore::from_json(
            r#"{
                "30": {"@id": 30, "@uid": 3, "user": null},
                "4": {"@id": 4, "@uid": 1, "tags": {"comment": "x"}, "user": {"display_name": "a"}}
            }"#,
            "(no comment)",
        )
        .unwrap();

        assert_eq!(store.ids().collect::<Vec<_>>(), vec![4, 30]);
        assert_eq!(store.field(4, MatchField::Comment).unwrap(), "x");
        assert_eq!(store.field(30, MatchField::Author).unwrap(), "user_3");
    }

    #[test]
    fn test_unknown_id() {
        let store = ItemStore::default();
        assert_eq!(store.get(9).unwrap_err(), TriageError::ChangesetNotFound(9));
    }

    #[test]
    fn test_invalid_json() {
        let err = ItemStore::from_json("[1, 2]", "-").unwrap_err();
        assert!(matches!(err, TriageError::InvalidUniverse(_)));
    }
}
