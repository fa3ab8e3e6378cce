//! Changeset Triage App
//!
//! Root component with the three-column triage layout. The board is built
//! once after the shell is mounted, from the changesets embedded in the page.

use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::JsValue;

use crate::board::Board;
use crate::category::{Category, CategoryMap};
use crate::clusterize::Clusterize;
use crate::components::{AutoMoveForm, CategoryColumn};
use crate::config::TriageConfig;
use crate::context::{Session, TriageContext};
use crate::counter::CounterProjection;
use crate::dom::{self, RowHandlers, CONTENT_SELECTOR, LIST_SELECTOR};
use crate::error::{TriageError, TriageResult};
use crate::models::RawChangeset;
use crate::store::ItemStore;

#[component]
pub fn App() -> impl IntoView {
    let config = TriageConfig::from_window();
    let ctx = TriageContext::new();
    provide_context(ctx);

    let counts = CategoryMap::from_fn(|_| signal(0usize));
    let readers = counts.map(|_, (read, _)| read);
    let writers = counts.map(|_, (_, write)| write);

    // Runs once, after the columns are in the DOM
    Effect::new(move |_| {
        if let Err(e) = bootstrap(ctx, writers, &config) {
            tracing::error!(error = %e, "failed to start triage board");
        }
    });

    view! {
        <div class="triage-layout container-fluid">
            <AutoMoveForm/>
            <div class="row categories">
                {Category::ALL
                    .into_iter()
                    .map(|category| view! { <CategoryColumn category=category count=readers[category]/> })
                    .collect_view()}
            </div>
            <p class="item-count">
                {move || format!("{} changesets", readers.iter().map(|(_, r)| r.get()).sum::<usize>())}
            </p>
        </div>
    }
}

fn bootstrap(ctx: TriageContext, counters: CategoryMap<WriteSignal<usize>>, config: &TriageConfig) -> TriageResult<()> {
    let window = web_sys::window().ok_or_else(|| TriageError::ElementNotFound("window".to_string()))?;
    let document = window.document().ok_or_else(|| TriageError::ElementNotFound("document".to_string()))?;

    let universe = js_sys::Reflect::get(&window, &JsValue::from_str(&config.changesets_global)).unwrap_or(JsValue::UNDEFINED);
    if universe.is_undefined() || universe.is_null() {
        tracing::info!(global = %config.changesets_global, "no changesets on this page");
        return Ok(());
    }
    let store = load_store(universe, &config.no_comment_placeholder)?;

    // Handlers must exist before the first push materializes rows.
    ctx.install_handlers(RowHandlers::new(ctx));

    let widgets = CategoryMap::try_from_fn(|category| mount_widget(ctx, &document, category))?;

    let mut projection = CounterProjection::new();
    for (category, writer) in counters.iter() {
        if counter_mounted(&document, category) {
            projection.mount(category, *writer);
        }
    }

    let mut board = Board::new(widgets, projection);
    board.seed(&store, &config.row_template());
    tracing::info!(changesets = store.len(), "triage board ready");
    ctx.start(Session { store, board });
    Ok(())
}

fn load_store(universe: JsValue, placeholder: &str) -> TriageResult<ItemStore> {
    // Pages may embed the universe as a JSON string or as an object literal.
    if let Some(text) = universe.as_string() {
        return ItemStore::from_json(&text, placeholder);
    }
    let raw: HashMap<String, RawChangeset> =
        serde_wasm_bindgen::from_value(universe).map_err(|e| TriageError::InvalidUniverse(e.to_string()))?;
    Ok(ItemStore::from_raw(raw.into_values(), placeholder))
}

fn mount_widget(ctx: TriageContext, document: &web_sys::Document, category: Category) -> TriageResult<Clusterize> {
    let root = document
        .get_element_by_id(category.as_str())
        .ok_or_else(|| TriageError::ElementNotFound(format!("#{category}")))?;
    let scroll = root
        .query_selector(LIST_SELECTOR)
        .ok()
        .flatten()
        .ok_or_else(|| TriageError::ElementNotFound(format!("#{category} {LIST_SELECTOR}")))?;
    let content = scroll
        .query_selector(CONTENT_SELECTOR)
        .ok()
        .flatten()
        .ok_or_else(|| TriageError::ElementNotFound(format!("#{category} {CONTENT_SELECTOR}")))?;

    Clusterize::mount(&scroll, &content, move || dom::bind_rendered(ctx, category))
}

fn counter_mounted(document: &web_sys::Document, category: Category) -> bool {
    document
        .query_selector(&format!("#{category} .counter"))
        .ok()
        .flatten()
        .is_some()
}
