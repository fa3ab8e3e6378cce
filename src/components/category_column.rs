//! Category Column Component
//!
//! One triage bucket: header with counter, and the scroll container the
//! virtual list renders into.

use leptos::prelude::*;

use crate::category::Category;
use crate::context::TriageContext;
use crate::dom;

#[component]
pub fn CategoryColumn(
    category: Category,
    /// Item count maintained by the counter projection
    count: ReadSignal<usize>,
) -> impl IntoView {
    let ctx = use_context::<TriageContext>().expect("TriageContext should be provided");

    view! {
        <section class=format!("category col-4 category-{}", category.as_str()) id=category.as_str()>
            <h5 class="category-header">
                {category.marker()} " " {category.title()}
                <span class="counter badge text-bg-secondary ms-2">{move || count.get()}</span>
            </h5>
            <div
                class="changeset-list clusterize-scroll"
                on:dragenter=move |ev| dom::on_list_dragenter(ctx, ev)
                on:dragleave=move |ev| dom::on_list_dragleave(ctx, ev)
                on:dragover=dom::on_list_dragover
                on:drop=move |ev| dom::on_list_drop(ctx, category, ev)
            >
                <div class="clusterize-content"></div>
            </div>
        </section>
    }
}
