//! Layout pipeline.
//!
//! Stages run strictly in order, each over the finished output of the one
//! before: clusters → inner order → tiers → intermediate source/sink order →
//! metrics → intermediate placement → outer order → outer placement → link
//! geometry → traces.

pub mod arrange;
pub mod cluster;
pub mod geometry;
pub mod position;
pub mod report;
pub mod scale;
pub mod sequence;
pub mod tier;
pub mod types;

pub use cluster::Clusters;
pub use position::{LayoutMetrics, Placement};
pub use report::LayoutReport;
pub use types::{Heading, LinkDirection, LinkPath, Point, Size};

use crate::config::{Extent, LayoutPolicy};
use crate::error::LayoutError;
use crate::model::{Category, NodeIdx, SupplyGraph};
use crate::trace::trace;

use geometry::{TaperScale, link_direction, link_path};
use position::RadiusScales;
use sequence::{order_intermediate_edges, order_inner, order_outer};
use tier::assign_tiers;

/// The annotated graph plus the group orders and metrics that placed it.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub graph: SupplyGraph,
    pub clusters: Clusters,
    pub metrics: LayoutMetrics,
    pub extent: Extent,
}

impl LayoutResult {
    /// Offset from chart coordinates to canvas coordinates.
    pub fn chart_offset(&self) -> Point {
        Point::new(self.extent.margin.left, self.extent.margin.top)
    }

    pub fn report(&self, include_traces: bool) -> LayoutReport {
        LayoutReport::new(self, include_traces)
    }
}

/// Lay out a summarised graph under `policy`.
pub fn layout(mut graph: SupplyGraph, policy: &LayoutPolicy) -> Result<LayoutResult, LayoutError> {
    policy.validate()?;

    let nodes: Vec<NodeIdx> = graph.nodes().collect();
    for &n in &nodes {
        let category = graph.node(n).category();
        graph.node_mut(n).layout.category = category;
    }

    // ── Ordering of the intermediates ───────────────────────────────────────
    let mut clusters = Clusters::assign(&graph);
    clusters.inner = order_inner(&graph, &clusters.inner);
    let tiers = assign_tiers(&graph, &clusters.inner, &policy.tier);
    let edges = order_intermediate_edges(
        &graph,
        &clusters.intermediate_source,
        &clusters.intermediate_sink,
        &clusters.inner,
    );
    clusters.intermediate_source = edges.sources;
    clusters.intermediate_sink = edges.sinks;
    clusters.intermediate_edges = edges.interleaved;

    // ── Intermediate placement ──────────────────────────────────────────────
    let metrics = LayoutMetrics::compute(&clusters, policy);
    for (i, &n) in clusters.unconnected.iter().enumerate() {
        apply(&mut graph, n, i, metrics.unconnected(i, policy));
    }
    for (i, &n) in clusters.intermediate_edges.iter().enumerate() {
        let is_source = graph.node(n).category() == Some(Category::IntermediateSource);
        apply(&mut graph, n, i, metrics.intermediate_edge(i, is_source, policy));
    }
    for (i, (&n, &tier)) in clusters.inner.iter().zip(&tiers).enumerate() {
        apply(&mut graph, n, i, metrics.inner(i, tier, policy));
        graph.node_mut(n).layout.tier = Some(tier);
    }

    let intermediates: Vec<NodeIdx> = clusters
        .unconnected
        .iter()
        .chain(&clusters.intermediate_edges)
        .chain(&clusters.inner)
        .copied()
        .collect();
    let radius = RadiusScales::new(&graph, &intermediates, &metrics, policy);
    for &n in &intermediates {
        let r = radius.radius(&graph, n);
        graph.node_mut(n).layout.radius = Some(r);
    }

    // ── Outer placement ─────────────────────────────────────────────────────
    let (sources, sinks) = order_outer(&graph, &clusters.source, &clusters.sink, &policy.sequence);
    clusters.source = sources;
    clusters.sink = sinks;
    for (i, &n) in clusters.source.iter().enumerate() {
        apply(&mut graph, n, i, metrics.source(i, policy));
    }
    for (i, &n) in clusters.sink.iter().enumerate() {
        apply(&mut graph, n, i, metrics.sink(i, policy));
    }

    // ── Links ───────────────────────────────────────────────────────────────
    let taper = TaperScale::new(metrics.intermediate.size, &policy.link.taper);
    let links: Vec<_> = graph.links().collect();
    let mut drawn = 0usize;
    for l in links {
        let path = link_path(&graph, l, &metrics, &taper, policy);
        let (from, to) = (graph.link(l).from, graph.link(l).to);
        let direction = link_direction(&graph, from, to);
        drawn += usize::from(path.is_some());
        let link = graph.link_mut(l);
        link.path = path;
        link.direction = Some(direction);
    }

    // ── Traces ──────────────────────────────────────────────────────────────
    for &n in &nodes {
        let t = trace(&graph, n);
        graph.node_mut(n).trace = Some(t);
    }

    tracing::debug!(
        nodes = nodes.len(),
        placed = clusters.placed(),
        links = graph.link_count(),
        drawn,
        "layout complete"
    );
    Ok(LayoutResult {
        graph,
        clusters,
        metrics,
        extent: policy.extent.clone(),
    })
}

fn apply(graph: &mut SupplyGraph, n: NodeIdx, sequence: usize, placement: Placement) {
    let layout = &mut graph.node_mut(n).layout;
    layout.sequence = Some(sequence);
    layout.position = placement.position;
    layout.size = placement.size;
    layout.layer = placement.layer;
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout.rs"]
mod tests;
