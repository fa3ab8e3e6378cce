//! DOM Interaction Boundary
//!
//! Turns browser events into explicit move arguments: categories, anchors and
//! selectors are read from the live DOM here, once, and handed to the board.
//! This is the only place where errors are reported and dropped.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, HtmlInputElement, MouseEvent};

use html_dragdrop::{
    add_marker, clear_marker, closest, current_element, payload, query_all, remove_marker, set_body_marker,
    set_payload, DRAGGING_CLASS, HOVER_CLASS,
};

use crate::board::{DropTarget, MoveOutcome};
use crate::category::Category;
use crate::context::TriageContext;
use crate::error::{TriageError, TriageResult};
use crate::models::ChangesetId;
use crate::predicate::{button_target, checked_predicates, Predicate};

pub const ITEM_SELECTOR: &str = ".changeset-item";
pub const LIST_SELECTOR: &str = ".changeset-list";
pub const CONTENT_SELECTOR: &str = ".clusterize-content";
pub const CATEGORY_SELECTOR: &str = ".category";
const ROW_BUTTON_SELECTOR: &str = "[data-auto-move-user-to], [data-auto-move-comment-to]";
const PREDICATE_SELECTOR: &str = "input[data-auto-move]";

/// Listeners shared by every materialized row. Created once, attached to
/// each new row element.
pub struct RowHandlers {
    dragstart: Closure<dyn FnMut(DragEvent)>,
    dragend: Closure<dyn FnMut(DragEvent)>,
    button_click: Closure<dyn FnMut(MouseEvent)>,
}

impl RowHandlers {
    pub fn new(ctx: TriageContext) -> Self {
        Self {
            dragstart: Closure::new(on_item_dragstart),
            dragend: Closure::new(move |ev: DragEvent| on_item_dragend(ctx, ev)),
            button_click: Closure::new(move |ev: MouseEvent| on_row_button_click(ctx, ev)),
        }
    }

    fn attach_item(&self, el: &Element) {
        listen(el, "dragstart", self.dragstart.as_ref().unchecked_ref());
        listen(el, "dragend", self.dragend.as_ref().unchecked_ref());
    }

    fn attach_button(&self, el: &Element) {
        listen(el, "click", self.button_click.as_ref().unchecked_ref());
    }
}

fn listen(el: &Element, event: &str, handler: &js_sys::Function) {
    if let Err(e) = el.add_event_listener_with_callback(event, handler) {
        tracing::warn!(event, error = ?e, "failed to attach listener");
    }
}

/// Post-render hook: attach row handlers to rows the widget just materialized
pub fn bind_rendered(ctx: TriageContext, category: Category) {
    let Some(root) = document().and_then(|d| d.get_element_by_id(category.as_str())) else {
        return;
    };
    let items = query_all(&root, ITEM_SELECTOR);
    let buttons = query_all(&root, ROW_BUTTON_SELECTOR);

    ctx.bind_with(|binder, handlers| {
        let mut fresh = 0;
        for el in &items {
            fresh += usize::from(binder.bind(el, |el| handlers.attach_item(el)));
        }
        for el in &buttons {
            fresh += usize::from(binder.bind(el, |el| handlers.attach_button(el)));
        }
        tracing::trace!(%category, fresh, total = binder.attached(), "bound rendered rows");
    });
}

// ========================
// Row handlers
// ========================

fn on_item_dragstart(ev: DragEvent) {
    let Some(item) = closest(&ev, ITEM_SELECTOR) else {
        return;
    };
    let Some(id) = item.get_attribute("data-id") else {
        return;
    };
    if !set_payload(&ev, &id) {
        tracing::warn!(id, "drag started without a data transfer");
    }
    add_marker(&item, DRAGGING_CLASS);
    set_body_marker(DRAGGING_CLASS, true);
}

fn on_item_dragend(ctx: TriageContext, ev: DragEvent) {
    if let Some(item) = closest(&ev, ITEM_SELECTOR) {
        remove_marker(&item, DRAGGING_CLASS);
    }
    set_body_marker(DRAGGING_CLASS, false);
    clear_hover(ctx);
}

fn on_row_button_click(ctx: TriageContext, ev: MouseEvent) {
    let Some(button) = current_element(&ev) else {
        return;
    };
    report("matching move", move_matching(ctx, &button));
}

fn move_matching(ctx: TriageContext, button: &Element) -> TriageResult<MoveOutcome> {
    let (field, to) = button_target(|name| button.get_attribute(name))?;

    let item = button
        .closest(ITEM_SELECTOR)
        .ok()
        .flatten()
        .ok_or_else(|| TriageError::ElementNotFound(ITEM_SELECTOR.to_string()))?;
    let clicked = item_id(&item)?;
    let source = category_of(&item)?;

    ctx.with_session(|s| s.board.matching_move(&s.store, clicked, source, field, to))
}

// ========================
// List handlers
// ========================

pub fn on_list_dragover(ev: DragEvent) {
    ev.prevent_default();
}

pub fn on_list_dragenter(ctx: TriageContext, ev: DragEvent) {
    if let Some(item) = closest(&ev, ITEM_SELECTOR) {
        ctx.with_hover(|targets| targets.enter(&item));
        add_marker(&item, HOVER_CLASS);
    } else if let Some(list) = closest(&ev, LIST_SELECTOR) {
        add_marker(&list, HOVER_CLASS);
    }
}

pub fn on_list_dragleave(ctx: TriageContext, ev: DragEvent) {
    if let Some(item) = closest(&ev, ITEM_SELECTOR) {
        if ctx.with_hover(|targets| targets.leave(&item)).unwrap_or(true) {
            remove_marker(&item, HOVER_CLASS);
        }
    } else if let Some(list) = closest(&ev, LIST_SELECTOR) {
        remove_marker(&list, HOVER_CLASS);
    }
}

/// Drop on the list of `category`
pub fn on_list_drop(ctx: TriageContext, category: Category, ev: DragEvent) {
    ev.prevent_default();
    clear_hover(ctx);
    report("drag move", move_dropped(ctx, category, &ev));
}

fn move_dropped(ctx: TriageContext, category: Category, ev: &DragEvent) -> TriageResult<MoveOutcome> {
    let raw = payload(ev).ok_or_else(|| TriageError::InvalidDragPayload(String::new()))?;
    let dragged: ChangesetId = raw
        .trim()
        .parse()
        .map_err(|_| TriageError::InvalidDragPayload(raw.clone()))?;

    let selector = format!("{ITEM_SELECTOR}[data-id=\"{dragged}\"]");
    let dragged_el = document()
        .and_then(|d| d.query_selector(&selector).ok().flatten())
        .ok_or(TriageError::ElementNotFound(selector))?;
    let source = category_of(&dragged_el)?;

    let target = match closest(ev, ITEM_SELECTOR) {
        Some(item) => DropTarget::Item { id: item_id(&item)?, category },
        None => DropTarget::List(category),
    };

    ctx.with_session(|s| s.board.drag_move(dragged, source, target))
}

// ========================
// Auto-move form
// ========================

pub fn on_auto_move_click(ctx: TriageContext, from: Category, to: Category) {
    let result = read_predicates()
        .and_then(|predicates| ctx.with_session(|s| s.board.predicate_move(&s.store, from, to, &predicates)));
    report("predicate move", result);
}

/// Predicates whose checkbox is ticked. Any unknown checkbox aborts.
fn read_predicates() -> TriageResult<Vec<Predicate>> {
    let Some(doc) = document() else {
        return Ok(Vec::new());
    };
    let boxes = query_all(&doc, PREDICATE_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| (input.checked(), input.get_attribute("data-auto-move")));
    checked_predicates(boxes)
}

// ========================
// Helpers
// ========================

fn clear_hover(ctx: TriageContext) {
    clear_marker(HOVER_CLASS);
    ctx.with_hover(|targets| targets.reset());
}

fn report(action: &str, result: TriageResult<MoveOutcome>) {
    match result {
        Ok(outcome) if outcome.is_noop() => tracing::debug!(action, "nothing to move"),
        Ok(outcome) => tracing::info!(action, moved = outcome.moved, "moved changesets"),
        Err(e) => tracing::error!(action, error = %e, "move aborted"),
    }
}

fn item_id(el: &Element) -> TriageResult<ChangesetId> {
    let raw = el.get_attribute("data-id").ok_or(TriageError::MissingAttribute("data-id"))?;
    raw.parse().map_err(|_| TriageError::InvalidItemId(raw))
}

fn category_of(el: &Element) -> TriageResult<Category> {
    el.closest(CATEGORY_SELECTOR)
        .ok()
        .flatten()
        .ok_or_else(|| TriageError::ElementNotFound(CATEGORY_SELECTOR.to_string()))?
        .id()
        .parse()
}

pub fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}
