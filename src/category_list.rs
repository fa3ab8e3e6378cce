//! Category List
//!
//! Ordered identifiers and their rendered rows for one category. Both
//! sequences live in [`Entries`], which only ever grows or shrinks them
//! together, so `ids[i]` always belongs to `rows[i]`.

use std::collections::BTreeSet;

use crate::category::Category;
use crate::error::{TriageError, TriageResult};
use crate::models::ChangesetId;
use crate::render::RenderedRow;

/// Parallel id/row sequences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    ids: Vec<ChangesetId>,
    rows: Vec<RenderedRow>,
}

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ChangesetId, row: RenderedRow) {
        self.ids.push(id);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ChangesetId] {
        &self.ids
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn into_pairs(self) -> impl Iterator<Item = (ChangesetId, RenderedRow)> {
        self.ids.into_iter().zip(self.rows)
    }
}

impl FromIterator<(ChangesetId, RenderedRow)> for Entries {
    fn from_iter<I: IntoIterator<Item = (ChangesetId, RenderedRow)>>(iter: I) -> Self {
        let mut entries = Entries::new();
        for (id, row) in iter {
            entries.push(id, row);
        }
        entries
    }
}

#[derive(Debug, Clone)]
pub struct CategoryList {
    category: Category,
    entries: Entries,
}

impl CategoryList {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: Entries::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> &[ChangesetId] {
        self.entries.ids()
    }

    pub fn rows(&self) -> &[RenderedRow] {
        self.entries.rows()
    }

    pub fn index_of(&self, id: ChangesetId) -> Option<usize> {
        self.entries.ids.iter().position(|&x| x == id)
    }

    pub fn contains(&self, id: ChangesetId) -> bool {
        self.index_of(id).is_some()
    }

    /// Remove the entries at `indices`, keeping the order of what remains.
    /// Returns the removed entries in their original order; out of range
    /// indices are ignored.
    pub fn remove_at(&mut self, indices: &BTreeSet<usize>) -> Entries {
        if indices.is_empty() {
            return Entries::new();
        }
        let mut kept = Entries::new();
        let mut removed = Entries::new();
        for (i, (id, row)) in std::mem::take(&mut self.entries).into_pairs().enumerate() {
            if indices.contains(&i) {
                removed.push(id, row);
            } else {
                kept.push(id, row);
            }
        }
        self.entries = kept;
        removed
    }

    pub fn append_all(&mut self, batch: Entries) {
        self.entries.ids.extend(batch.ids);
        self.entries.rows.extend(batch.rows);
    }

    /// Insert `batch` immediately before `anchor`
    pub fn insert_before(&mut self, anchor: ChangesetId, batch: Entries) -> TriageResult<()> {
        let at = self.index_of(anchor).ok_or(TriageError::NotInCategory {
            id: anchor,
            category: self.category,
        })?;
        self.entries.ids.splice(at..at, batch.ids);
        self.entries.rows.splice(at..at, batch.rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: ChangesetId) -> RenderedRow {
        RenderedRow::new(format!("<div data-id=\"{id}\"></div>"))
    }

    fn list(ids: &[ChangesetId]) -> CategoryList {
        let mut list = CategoryList::new(Category::Uncategorized);
        list.append_all(ids.iter().map(|&id| (id, row(id))).collect());
        list
    }

    fn assert_parallel(list: &CategoryList) {
        assert_eq!(list.ids().len(), list.rows().len());
        for (id, r) in list.ids().iter().zip(list.rows()) {
            assert_eq!(*r, row(*id));
        }
    }

    #[test]
    fn test_remove_at_keeps_order() {
        let mut l = list(&[1, 2, 3, 4, 5]);
        let removed = l.remove_at(&BTreeSet::from([3, 0, 2]));

        assert_eq!(removed.ids(), &[1, 3, 4]);
        assert_eq!(l.ids(), &[2, 5]);
        assert_parallel(&l);
        assert_eq!(removed.rows()[1], row(3));
    }

    #[test]
    fn test_remove_at_ignores_out_of_range() {
        let mut l = list(&[1, 2]);
        let removed = l.remove_at(&BTreeSet::from([5]));
        assert!(removed.is_empty());
        assert_eq!(l.ids(), &[1, 2]);
    }

    #[test]
    fn test_insert_before() {
        let mut l = list(&[1, 2, 3]);
        l.insert_before(2, [(9, row(9))].into_iter().collect()).unwrap();
        assert_eq!(l.ids(), &[1, 9, 2, 3]);
        assert_parallel(&l);

        l.insert_before(1, [(8, row(8))].into_iter().collect()).unwrap();
        assert_eq!(l.ids(), &[8, 1, 9, 2, 3]);
    }

    #[test]
    fn test_insert_before_missing_anchor() {
        let mut l = list(&[1, 2]);
        let err = l.insert_before(7, [(9, row(9))].into_iter().collect()).unwrap_err();
        assert_eq!(
            err,
            TriageError::NotInCategory { id: 7, category: Category::Uncategorized }
        );
        assert_eq!(l.ids(), &[1, 2]);
    }

    #[test]
    fn test_index_of() {
        let l = list(&[4, 5, 6]);
        assert_eq!(l.index_of(6), Some(2));
        assert_eq!(l.index_of(1), None);
        assert_eq!(l.len(), 3);
    }
}
