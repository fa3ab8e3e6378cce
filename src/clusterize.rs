//! Clusterize.js Bindings
//!
//! The page loads Clusterize.js as a plain script; this wraps one instance
//! per category as a [`VirtualList`].

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::error::{TriageError, TriageResult};
use crate::render::{RenderedRow, VirtualList};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Clusterize)]
    type ClusterizeJs;

    #[wasm_bindgen(catch, constructor, js_class = "Clusterize")]
    fn new(options: &Object) -> Result<ClusterizeJs, JsValue>;

    #[wasm_bindgen(method)]
    fn update(this: &ClusterizeJs, rows: &Array);
}

pub struct Clusterize {
    inner: ClusterizeJs,
    // Owned so the callback lives exactly as long as the widget.
    _on_cluster_changed: Closure<dyn FnMut()>,
}

impl Clusterize {
    /// Attach a widget to `scroll`/`content`. `on_cluster_changed` runs after
    /// every re-render, including the ones caused by scrolling.
    pub fn mount(
        scroll: &Element,
        content: &Element,
        on_cluster_changed: impl FnMut() + 'static,
    ) -> TriageResult<Self> {
        let on_cluster_changed = Closure::<dyn FnMut()>::new(on_cluster_changed);

        let callbacks = Object::new();
        set(&callbacks, "clusterChanged", on_cluster_changed.as_ref())?;

        let options = Object::new();
        set(&options, "scrollElem", scroll)?;
        set(&options, "contentElem", content)?;
        set(&options, "show_no_data_row", &JsValue::FALSE)?;
        set(&options, "callbacks", &callbacks)?;

        let inner = ClusterizeJs::new(&options).map_err(|e| TriageError::WidgetUnavailable(format!("{e:?}")))?;
        Ok(Self {
            inner,
            _on_cluster_changed: on_cluster_changed,
        })
    }
}

impl VirtualList for Clusterize {
    fn update(&self, rows: &[RenderedRow]) {
        let array: Array = rows.iter().map(|r| JsValue::from_str(r.as_str())).collect();
        self.inner.update(&array);
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> TriageResult<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| TriageError::WidgetUnavailable(format!("{e:?}")))
}
