//! Triage Context
//!
//! Shared state provided via Leptos Context API. Every field is a separate
//! stored value: the widget's post-render hook binds rows while a move still
//! holds the session, so binding state must never live inside it.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use html_dragdrop::{ElementMap, HoverTargets};

use crate::binding::{ElementSet, EventBinder};
use crate::board::Board;
use crate::clusterize::Clusterize;
use crate::counter::CounterDisplay;
use crate::dom::RowHandlers;
use crate::error::{TriageError, TriageResult};
use crate::store::ItemStore;

pub type DomBoard = Board<Clusterize, WriteSignal<usize>>;

impl CounterDisplay for WriteSignal<usize> {
    fn show(&self, count: usize) {
        self.set(count);
    }
}

/// Loaded changesets and the board triaging them
pub struct Session {
    pub store: ItemStore,
    pub board: DomBoard,
}

#[derive(Clone, Copy)]
pub struct TriageContext {
    session: StoredValue<Option<Session>, LocalStorage>,
    hover: StoredValue<HoverTargets<ElementMap>, LocalStorage>,
    binder: StoredValue<EventBinder<ElementSet>, LocalStorage>,
    handlers: StoredValue<Option<RowHandlers>, LocalStorage>,
}

impl TriageContext {
    pub fn new() -> Self {
        Self {
            session: StoredValue::new_local(None),
            hover: StoredValue::new_local(HoverTargets::new(ElementMap::new())),
            binder: StoredValue::new_local(EventBinder::new(ElementSet::new())),
            handlers: StoredValue::new_local(None),
        }
    }

    pub fn start(&self, session: Session) {
        self.session.set_value(Some(session));
    }

    /// Run a move against the session. Fails with `NotReady` before bootstrap.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> TriageResult<R>) -> TriageResult<R> {
        self.session
            .try_update_value(|s| s.as_mut().map(f))
            .flatten()
            .unwrap_or(Err(TriageError::NotReady))
    }

    pub fn with_hover<R>(&self, f: impl FnOnce(&mut HoverTargets<ElementMap>) -> R) -> Option<R> {
        self.hover.try_update_value(f)
    }

    pub fn install_handlers(&self, handlers: RowHandlers) {
        self.handlers.set_value(Some(handlers));
    }

    /// Bind handlers through the idempotent binder. No-op before handlers exist.
    pub fn bind_with(&self, f: impl FnOnce(&mut EventBinder<ElementSet>, &RowHandlers)) {
        self.handlers.with_value(|handlers| {
            if let Some(handlers) = handlers {
                self.binder.update_value(|binder| f(binder, handlers));
            }
        });
    }
}
