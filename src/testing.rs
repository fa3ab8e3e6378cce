//! Test doubles for the widget and counter seams.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::counter::CounterDisplay;
use crate::models::{Changeset, ChangesetId};
use crate::render::{RenderedRow, VirtualList};

/// Virtual list that records every content push
#[derive(Clone, Default)]
pub struct FakeList {
    pushes: Rc<RefCell<Vec<Vec<RenderedRow>>>>,
}

impl FakeList {
    pub fn push_count(&self) -> usize {
        self.pushes.borrow().len()
    }

    pub fn last(&self) -> Option<Vec<RenderedRow>> {
        self.pushes.borrow().last().cloned()
    }

    /// Rows in the most recent push
    pub fn rows_amount(&self) -> usize {
        self.pushes.borrow().last().map_or(0, Vec::len)
    }
}

impl VirtualList for FakeList {
    fn update(&self, rows: &[RenderedRow]) {
        self.pushes.borrow_mut().push(rows.to_vec());
    }
}

/// Counter display that remembers what it was last told
#[derive(Clone, Default)]
pub struct RecordingCounter {
    value: Rc<Cell<Option<usize>>>,
}

impl RecordingCounter {
    pub fn last(&self) -> Option<usize> {
        self.value.get()
    }
}

impl CounterDisplay for RecordingCounter {
    fn show(&self, count: usize) {
        self.value.set(Some(count));
    }
}

pub fn changeset(id: ChangesetId, user: &str, comment: &str) -> Changeset {
    Changeset {
        id,
        user: user.to_string(),
        deleted: false,
        blocked: false,
        comment: comment.to_string(),
    }
}
