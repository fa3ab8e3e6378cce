//! Event Binding
//!
//! The virtual list recreates row elements whenever the viewport moves, so
//! handlers are (re)attached after every render. The binder remembers which
//! elements already carry handlers and skips them.

use std::collections::HashSet;
use std::hash::Hash;

use wasm_bindgen::JsCast;

/// Set of elements that already carry handlers
pub trait BoundSet<E: ?Sized> {
    /// Record `element`. Returns `false` if it was already recorded.
    fn mark(&mut self, element: &E) -> bool;
}

impl<K: Hash + Eq + Clone> BoundSet<K> for HashSet<K> {
    fn mark(&mut self, element: &K) -> bool {
        self.insert(element.clone())
    }
}

/// Bound set keyed by DOM element identity. Held weakly, so elements the
/// widget discards can be collected.
pub struct ElementSet(js_sys::WeakSet);

impl ElementSet {
    pub fn new() -> Self {
        Self(js_sys::WeakSet::new())
    }
}

impl BoundSet<web_sys::Element> for ElementSet {
    fn mark(&mut self, element: &web_sys::Element) -> bool {
        let object = element.unchecked_ref::<js_sys::Object>();
        if self.0.has(object) {
            return false;
        }
        self.0.add(object);
        true
    }
}

pub struct EventBinder<S> {
    bound: S,
    attached: usize,
}

impl<S> EventBinder<S> {
    pub fn new(bound: S) -> Self {
        Self { bound, attached: 0 }
    }

    /// Run `attach` unless `element` was bound before. Returns whether it ran.
    pub fn bind<E: ?Sized>(&mut self, element: &E, attach: impl FnOnce(&E)) -> bool
    where
        S: BoundSet<E>,
    {
        if !self.bound.mark(element) {
            return false;
        }
        attach(element);
        self.attached += 1;
        true
    }

    /// Elements bound so far
    pub fn attached(&self) -> usize {
        self.attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_is_idempotent() {
        let mut binder = EventBinder::new(HashSet::<&str>::new());
        let mut calls = Vec::new();

        for el in ["row-1", "row-2", "row-1", "row-2", "row-3"] {
            binder.bind(&el, |el| calls.push(*el));
        }

        assert_eq!(calls, vec!["row-1", "row-2", "row-3"]);
        assert_eq!(binder.attached(), 3);
    }

    #[test]
    fn test_rebinding_after_render_cycles() {
        let mut binder = EventBinder::new(HashSet::<u32>::new());
        let mut attached = 0;
        // Each render cycle materializes a window of rows, overlapping the last.
        for window in [0..10u32, 5..15, 0..10, 10..20] {
            for el in window {
                if binder.bind(&el, |_| ()) {
                    attached += 1;
                }
            }
        }
        assert_eq!(attached, 20);
    }
}
