//! HTML DragDrop Utilities
//!
//! Native HTML5 drag-and-drop helpers for rows rendered outside the
//! reactive tree. The dragged identifier travels through `DataTransfer`,
//! hover highlighting is tracked per target with nested enter/leave counting.

use std::collections::HashMap;
use std::hash::Hash;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DragEvent, Element, Event, Node};

/// MIME type used for the drag payload
pub const DRAG_MIME: &str = "text/plain";

/// Class added to the dragged element and to `<body>` while dragging
pub const DRAGGING_CLASS: &str = "dragging";

/// Class added to the element currently hovered by a drag
pub const HOVER_CLASS: &str = "dragging-effects";

/// Per-target enter/leave counter.
///
/// Browsers fire `dragenter` on a child before `dragleave` on its parent, so a
/// single flag per target flickers off when the cursor crosses a nested
/// element. Counting enters per target and removing the highlight only when
/// the count drops back to zero keeps it stable.
#[derive(Debug, Clone)]
pub struct HoverTracker<K> {
    counters: HashMap<K, u32>,
}

impl<K> Default for HoverTracker<K> {
    fn default() -> Self {
        Self { counters: HashMap::new() }
    }
}

impl<K: Hash + Eq> HoverTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an enter on a nestable target.
    pub fn enter(&mut self, key: K) {
        *self.counters.entry(key).or_insert(0) += 1;
    }

    /// Record a leave on a nestable target.
    ///
    /// Returns `true` when the highlight should be removed, i.e. this was the
    /// last outstanding enter. A leave without a matching enter also returns
    /// `true`.
    pub fn leave(&mut self, key: K) -> bool {
        let count = self.counters.get(&key).copied().unwrap_or(1).saturating_sub(1);
        if count > 0 {
            self.counters.insert(key, count);
            false
        } else {
            self.counters.remove(&key);
            true
        }
    }

    /// Outstanding enters for `key`
    pub fn count(&self, key: &K) -> u32 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    /// Whether any target still holds an outstanding enter
    pub fn is_idle(&self) -> bool {
        self.counters.is_empty()
    }

    /// Drop every counter. Called on drop and drag end.
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}

// ========================
// Element identity
// ========================

/// Storage for identity keys assigned to elements
pub trait IdentityMap<E: ?Sized> {
    fn get(&self, element: &E) -> Option<u32>;
    fn insert(&mut self, element: &E, key: u32);
}

impl<K: Hash + Eq + Clone> IdentityMap<K> for HashMap<K, u32> {
    fn get(&self, element: &K) -> Option<u32> {
        HashMap::get(self, element).copied()
    }

    fn insert(&mut self, element: &K, key: u32) {
        HashMap::insert(self, element.clone(), key);
    }
}

/// Identity keys for DOM elements, held weakly so discarded rows can be
/// collected.
pub struct ElementMap(js_sys::WeakMap);

impl ElementMap {
    pub fn new() -> Self {
        Self(js_sys::WeakMap::new())
    }
}

impl IdentityMap<Element> for ElementMap {
    fn get(&self, element: &Element) -> Option<u32> {
        self.0
            .get(element.unchecked_ref::<js_sys::Object>())
            .as_f64()
            .map(|key| key as u32)
    }

    fn insert(&mut self, element: &Element, key: u32) {
        self.0
            .set(element.unchecked_ref::<js_sys::Object>(), &JsValue::from(key));
    }
}

/// Hover counters keyed by target identity.
///
/// A virtual list may replace a row element with a fresh one for the same
/// item while a drag is in progress. The replacement gets its own key, so
/// enters recorded on the discarded element never hold its highlight.
pub struct HoverTargets<M> {
    keys: M,
    next: u32,
    tracker: HoverTracker<u32>,
}

impl<M> HoverTargets<M> {
    pub fn new(keys: M) -> Self {
        Self {
            keys,
            next: 0,
            tracker: HoverTracker::new(),
        }
    }

    fn key<E: ?Sized>(&mut self, element: &E) -> u32
    where
        M: IdentityMap<E>,
    {
        if let Some(key) = self.keys.get(element) {
            return key;
        }
        let key = self.next;
        self.next = self.next.wrapping_add(1);
        self.keys.insert(element, key);
        key
    }

    pub fn enter<E: ?Sized>(&mut self, element: &E)
    where
        M: IdentityMap<E>,
    {
        let key = self.key(element);
        self.tracker.enter(key);
    }

    /// See [`HoverTracker::leave`]
    pub fn leave<E: ?Sized>(&mut self, element: &E) -> bool
    where
        M: IdentityMap<E>,
    {
        let key = self.key(element);
        self.tracker.leave(key)
    }

    pub fn is_idle(&self) -> bool {
        self.tracker.is_idle()
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }
}

// ========================
// DataTransfer payload
// ========================

/// Write the drag payload. Returns `false` if the event carries no data channel.
pub fn set_payload(ev: &DragEvent, value: &str) -> bool {
    match ev.data_transfer() {
        Some(dt) => dt.set_data(DRAG_MIME, value).is_ok(),
        None => false,
    }
}

/// Read the drag payload, if any
pub fn payload(ev: &DragEvent) -> Option<String> {
    let raw = ev.data_transfer()?.get_data(DRAG_MIME).ok()?;
    if raw.is_empty() { None } else { Some(raw) }
}

// ========================
// Target resolution
// ========================

/// Element the event was dispatched to. Text nodes resolve to their parent.
pub fn event_element(ev: &Event) -> Option<Element> {
    let target = ev.target()?;
    if let Some(el) = target.dyn_ref::<Element>() {
        return Some(el.clone());
    }
    target.dyn_ref::<Node>()?.parent_element()
}

/// Nearest ancestor (inclusive) of the event target matching `selector`
pub fn closest(ev: &Event, selector: &str) -> Option<Element> {
    event_element(ev)?.closest(selector).ok().flatten()
}

/// Element the listener is attached to
pub fn current_element(ev: &Event) -> Option<Element> {
    ev.current_target()?.dyn_into::<Element>().ok()
}

// ========================
// Class markers
// ========================

pub fn add_marker(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_marker(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

/// Toggle `class` on `<body>`
pub fn set_body_marker(class: &str, on: bool) {
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    if on {
        add_marker(&body, class);
    } else {
        remove_marker(&body, class);
    }
}

/// Remove `class` from every element in the document carrying it
pub fn clear_marker(class: &str) {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    for el in query_all(&doc, &format!(".{class}")) {
        remove_marker(&el, class);
    }
}

/// `querySelectorAll` collected into elements. Invalid selectors yield nothing.
pub fn query_all<R>(root: &R, selector: &str) -> Vec<Element>
where
    R: JsCast,
{
    let list = if let Some(doc) = root.dyn_ref::<web_sys::Document>() {
        doc.query_selector_all(selector)
    } else if let Some(el) = root.dyn_ref::<Element>() {
        el.query_selector_all(selector)
    } else {
        return Vec::new();
    };
    let Ok(list) = list else {
        tracing::warn!(selector, "invalid selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
