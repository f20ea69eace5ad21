//! WASM bindings for supplynet-layout.
//!
//! Exposes `layout`, `layoutWithOptions` and `trace` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{Dataset, LayoutPolicy, SupplyGraph};

/// Lay out a dataset JSON document with the default policy.
#[wasm_bindgen]
pub fn layout(dataset: &str) -> Result<String, JsError> {
    crate::layout_json(dataset, None, None, false).map_err(|e| JsError::new(&e.to_string()))
}

/// Lay out a dataset with full control over options.
///
/// - `policy`: partial policy JSON, or empty string for the defaults
/// - `year`: reporting year to select, or 0 to use the dataset as given
#[wasm_bindgen(js_name = "layoutWithOptions")]
pub fn layout_with_options(dataset: &str, policy: &str, year: u16) -> Result<String, JsError> {
    let policy = if policy.is_empty() { None } else { Some(policy) };
    let year = if year == 0 { None } else { Some(year) };
    crate::layout_json(dataset, policy, year, false).map_err(|e| JsError::new(&e.to_string()))
}

/// Network trace of one node as JSON.
#[wasm_bindgen]
pub fn trace(dataset: &str, node_id: &str) -> Result<String, JsError> {
    let err = |e: crate::LayoutError| JsError::new(&e.to_string());
    let dataset = Dataset::from_json(dataset).map_err(|e| err(e.into()))?;
    let graph = SupplyGraph::from_dataset(&dataset).map_err(|e| err(e.into()))?;
    let trace = crate::trace::trace_id(&graph, node_id).map_err(err)?;
    serde_json::to_string(&trace.to_report(&graph)).map_err(|e| err(e.into()))
}

/// Default policy as JSON, for callers building partial overrides.
#[wasm_bindgen(js_name = "defaultPolicy")]
pub fn default_policy() -> Result<String, JsError> {
    serde_json::to_string(&LayoutPolicy::default()).map_err(|e| JsError::new(&e.to_string()))
}
