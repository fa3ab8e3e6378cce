//! Auto-move Form Component
//!
//! Predicate checkboxes and one button per source/destination pair.

use leptos::prelude::*;

use crate::category::Category;
use crate::context::TriageContext;
use crate::dom;
use crate::predicate::Predicate;

#[component]
pub fn AutoMoveForm() -> impl IntoView {
    let ctx = use_context::<TriageContext>().expect("TriageContext should be provided");

    let pairs = Category::ALL
        .into_iter()
        .flat_map(|from| Category::ALL.into_iter().filter(move |&to| to != from).map(move |to| (from, to)));

    view! {
        <div class="auto-move mb-2">
            <span class="me-2">"Auto-move:"</span>
            {Predicate::ALL
                .into_iter()
                .map(|p| view! {
                    <label class="form-check form-check-inline">
                        <input class="form-check-input" type="checkbox" data-auto-move=p.as_str()/>
                        <span class="form-check-label">{p.label()}</span>
                    </label>
                })
                .collect_view()}
            {pairs
                .map(|(from, to)| view! {
                    <button
                        type="button"
                        class="btn btn-sm btn-outline-secondary me-1"
                        data-auto-move-from=from.as_str()
                        data-auto-move-to=to.as_str()
                        on:click=move |_| dom::on_auto_move_click(ctx, from, to)
                    >
                        {format!("{} → {}", from.marker(), to.marker())}
                    </button>
                })
                .collect_view()}
        </div>
    }
}
