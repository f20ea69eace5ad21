//! supplynet-layout: layered flow layout and network tracing for supply
//! relationship graphs.
//!
//! Public API: [`layout_records()`], [`layout_dataset()`], [`layout_json()`],
//! plus the stage modules for callers that drive the pipeline themselves.
//!
//! Pipeline: records → `SupplyGraph` (classification) → `layout::layout`
//! (clusters, order, tiers, positions, link geometry, traces) → `LayoutReport`.

pub mod config;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod model;
pub mod stats;
pub mod svg;
pub mod trace;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::LayoutPolicy;
pub use dataset::{Dataset, LinkRecord, NodeRecord};
pub use error::{ConfigError, GraphError, LayoutError};
pub use layout::{LayoutReport, LayoutResult, layout};
pub use model::SupplyGraph;
pub use stats::GraphStats;
pub use trace::{NetworkTrace, trace};

/// Crate version as stamped by the build script.
pub const VERSION: &str = env!("SUPPLYNET_LAYOUT_VERSION");

/// Build a graph from records and lay it out.
pub fn layout_records(
    nodes: &[NodeRecord],
    links: &[LinkRecord],
    policy: &LayoutPolicy,
) -> Result<LayoutResult, LayoutError> {
    let graph = SupplyGraph::build(nodes, links)?;
    layout(graph, policy)
}

/// Lay out a dataset, optionally narrowed to one reporting year first.
pub fn layout_dataset(
    dataset: &Dataset,
    year: Option<u16>,
    policy: &LayoutPolicy,
) -> Result<LayoutResult, LayoutError> {
    match year {
        Some(year) => {
            let selected = dataset.for_year(year);
            layout_records(&selected.nodes, &selected.links, policy)
        }
        None => layout_records(&dataset.nodes, &dataset.links, policy),
    }
}

/// Dataset JSON in, layout report JSON out.
///
/// `policy` is an optional (possibly partial) policy document.
pub fn layout_json(
    dataset: &str,
    policy: Option<&str>,
    year: Option<u16>,
    pretty: bool,
) -> Result<String, LayoutError> {
    let dataset = Dataset::from_json(dataset)?;
    let policy = match policy {
        Some(text) => LayoutPolicy::from_json(text)?,
        None => LayoutPolicy::default(),
    };
    let result = layout_dataset(&dataset, year, &policy)?;
    Ok(result.report(true).to_json(pretty)?)
}
