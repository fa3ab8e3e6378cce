//! Triage Board
//!
//! One category list plus render adapter per category, and the three move
//! protocols over them. Every protocol checks its guards first and mutates
//! second, then pushes the full content of each changed list to its widget
//! and refreshes that category's counter.

use std::collections::BTreeSet;

use tracing::debug;

use crate::category::{Category, CategoryMap};
use crate::category_list::{CategoryList, Entries};
use crate::counter::{CounterDisplay, CounterProjection};
use crate::error::{TriageError, TriageResult};
use crate::models::ChangesetId;
use crate::predicate::{MatchField, Predicate};
use crate::render::{RenderAdapter, RowTemplate, VirtualList};
use crate::store::ItemStore;

/// Where a dragged item was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// On another item: insert before it
    Item { id: ChangesetId, category: Category },
    /// On empty list space: append
    List(Category),
}

impl DropTarget {
    pub fn category(&self) -> Category {
        match *self {
            DropTarget::Item { category, .. } => category,
            DropTarget::List(category) => category,
        }
    }
}

/// Result of a move protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Number of items that left their source position
    pub moved: usize,
}

impl MoveOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn is_noop(&self) -> bool {
        self.moved == 0
    }
}

pub struct Board<W, D> {
    lists: CategoryMap<CategoryList>,
    adapters: CategoryMap<RenderAdapter<W>>,
    counters: CounterProjection<D>,
}

impl<W: VirtualList, D: CounterDisplay> Board<W, D> {
    pub fn new(widgets: CategoryMap<W>, counters: CounterProjection<D>) -> Self {
        Self {
            lists: CategoryMap::from_fn(CategoryList::new),
            adapters: widgets.map(RenderAdapter::new),
            counters,
        }
    }

    pub fn list(&self, category: Category) -> &CategoryList {
        &self.lists[category]
    }

    /// Initial placement: every item uncategorized, ascending by identifier
    pub fn seed(&mut self, store: &ItemStore, template: &RowTemplate) {
        let mut placement = CategoryMap::<Vec<ChangesetId>>::default();
        placement[Category::Uncategorized] = store.ids().collect();
        if let Err(e) = self.place(store, template, placement) {
            tracing::error!(error = %e, "initial placement failed");
        }
    }

    /// Replace all three lists with `placement`. Every stored item must
    /// appear exactly once across the categories.
    pub fn place(
        &mut self,
        store: &ItemStore,
        template: &RowTemplate,
        placement: CategoryMap<Vec<ChangesetId>>,
    ) -> TriageResult<()> {
        let mut seen = BTreeSet::new();
        for (_, ids) in placement.iter() {
            for &id in ids {
                store.get(id)?;
                if !seen.insert(id) {
                    return Err(TriageError::InvalidUniverse(format!("changeset {id} placed twice")));
                }
            }
        }
        if seen.len() != store.len() {
            return Err(TriageError::InvalidUniverse(format!(
                "{} of {} changesets placed",
                seen.len(),
                store.len()
            )));
        }

        for (category, ids) in placement.iter() {
            let mut list = CategoryList::new(category);
            list.append_all(
                ids.iter()
                    .map(|&id| store.get(id).map(|cs| (id, template.render(cs))))
                    .collect::<TriageResult<Entries>>()?,
            );
            self.lists[category] = list;
        }
        for category in Category::ALL {
            self.push(category);
        }
        debug!(items = store.len(), "board placed");
        Ok(())
    }

    /// Bulk move: every item in `from` satisfying any of `predicates` is
    /// appended to `to`, keeping relative order on both sides.
    pub fn predicate_move(
        &mut self,
        store: &ItemStore,
        from: Category,
        to: Category,
        predicates: &[Predicate],
    ) -> TriageResult<MoveOutcome> {
        if predicates.is_empty() || from == to {
            return Ok(MoveOutcome::unchanged());
        }

        let mut selected = BTreeSet::new();
        for (index, &id) in self.lists[from].ids().iter().enumerate() {
            let cs = store.get(id)?;
            if predicates.iter().any(|p| p.holds(cs)) {
                selected.insert(index);
            }
        }

        let outcome = self.transfer(from, to, &selected);
        debug!(?predicates, %from, %to, moved = outcome.moved, "predicate move");
        Ok(outcome)
    }

    /// Move every item in `source` whose `field` equals that of `clicked`.
    ///
    /// Matched items are always appended to the end of `to`, even when
    /// `to == source`.
    pub fn matching_move(
        &mut self,
        store: &ItemStore,
        clicked: ChangesetId,
        source: Category,
        field: MatchField,
        to: Category,
    ) -> TriageResult<MoveOutcome> {
        let value = store.field(clicked, field)?;
        if !self.lists[source].contains(clicked) {
            return Err(TriageError::NotInCategory { id: clicked, category: source });
        }

        let mut selected = BTreeSet::new();
        for (index, &id) in self.lists[source].ids().iter().enumerate() {
            if store.field(id, field)? == value {
                selected.insert(index);
            }
        }

        let outcome = self.transfer(source, to, &selected);
        debug!(?field, value, %source, %to, moved = outcome.moved, "matching move");
        Ok(outcome)
    }

    /// Move one dragged item to `target`
    pub fn drag_move(
        &mut self,
        dragged: ChangesetId,
        source: Category,
        target: DropTarget,
    ) -> TriageResult<MoveOutcome> {
        let index = self.lists[source]
            .index_of(dragged)
            .ok_or(TriageError::NotInCategory { id: dragged, category: source })?;

        let dest = target.category();
        let anchor = match target {
            DropTarget::Item { id, .. } if id == dragged => return Ok(MoveOutcome::unchanged()),
            DropTarget::Item { id, category } => {
                if !self.lists[category].contains(id) {
                    return Err(TriageError::NotInCategory { id, category });
                }
                Some(id)
            }
            DropTarget::List(_) => None,
        };

        let removed = self.lists[source].remove_at(&BTreeSet::from([index]));
        match anchor {
            // The anchor position is looked up after removal, which matters
            // when source and destination are the same list.
            Some(anchor) => self.lists[dest].insert_before(anchor, removed)?,
            None => self.lists[dest].append_all(removed),
        }

        if source != dest {
            self.push(source);
        }
        self.push(dest);
        debug!(dragged, %source, %dest, ?anchor, "drag move");
        Ok(MoveOutcome { moved: 1 })
    }

    /// Remove `indices` from `from` and append them to `to`
    fn transfer(&mut self, from: Category, to: Category, indices: &BTreeSet<usize>) -> MoveOutcome {
        if indices.is_empty() {
            return MoveOutcome::unchanged();
        }

        let moved = match self.lists.pair_mut(from, to) {
            Some((source, dest)) => {
                let removed = source.remove_at(indices);
                let moved = removed.len();
                dest.append_all(removed);
                moved
            }
            None => {
                let list = &mut self.lists[from];
                let removed = list.remove_at(indices);
                let moved = removed.len();
                list.append_all(removed);
                moved
            }
        };

        self.push(from);
        if from != to {
            self.push(to);
        }
        MoveOutcome { moved }
    }

    /// Hand the full content of `category` to its widget and refresh its counter
    fn push(&self, category: Category) {
        let list = &self.lists[category];
        self.adapters[category].replace(list);
        self.counters.refresh(category, list.len());
    }
}
