#![allow(warnings)]
//! Changeset Triage Frontend Entry Point

mod app;
mod binding;
mod board;
mod category;
mod category_list;
mod clusterize;
mod components;
mod config;
mod context;
mod counter;
mod dom;
mod error;
mod models;
mod predicate;
mod render;
mod store;

#[cfg(test)]
mod testing;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    wasm_tracing::set_as_global_default();

    tracing::info!("starting changeset triage frontend");
    mount_to_body(App);
}
