//! Counter Projection
//!
//! Shows each category's item count. A category whose counter is not mounted
//! yet is skipped.

use crate::category::{Category, CategoryMap};

/// Somewhere a count can be displayed
pub trait CounterDisplay {
    fn show(&self, count: usize);
}

pub struct CounterProjection<D> {
    displays: CategoryMap<Option<D>>,
}

impl<D> Default for CounterProjection<D> {
    fn default() -> Self {
        Self {
            displays: CategoryMap::from_fn(|_| None),
        }
    }
}

impl<D: CounterDisplay> CounterProjection<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, category: Category, display: D) {
        self.displays[category] = Some(display);
    }

    pub fn unmount(&mut self, category: Category) -> Option<D> {
        self.displays[category].take()
    }

    pub fn is_mounted(&self, category: Category) -> bool {
        self.displays[category].is_some()
    }

    pub fn refresh(&self, category: Category, count: usize) {
        match &self.displays[category] {
            Some(display) => display.show(count),
            None => tracing::trace!(%category, "counter not mounted, skipping refresh"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCounter;

    #[test]
    fn test_refresh_mounted_only() {
        let legit = RecordingCounter::default();
        let mut counters = CounterProjection::new();
        counters.mount(Category::Legitimate, legit.clone());

        counters.refresh(Category::Legitimate, 4);
        counters.refresh(Category::Malicious, 9);

        assert_eq!(legit.last(), Some(4));
        assert!(!counters.is_mounted(Category::Malicious));
    }

    #[test]
    fn test_unmount_stops_updates() {
        let legit = RecordingCounter::default();
        let mut counters = CounterProjection::new();
        counters.mount(Category::Legitimate, legit.clone());
        counters.refresh(Category::Legitimate, 1);
        assert!(counters.unmount(Category::Legitimate).is_some());
        counters.refresh(Category::Legitimate, 2);
        assert_eq!(legit.last(), Some(1));
    }
}
