//! Placement of each group: node sizes, group lengths and centre coordinates.
//!
//! Coordinates are in chart space: `x` runs across the flow over the chart
//! width (minor axis), `y` runs with the flow over the chart height (major
//! axis). Every length derives from the policy and the group counts, and
//! every division is guarded so empty groups give zero lengths.

use serde::Serialize;

use super::cluster::Clusters;
use super::scale::{SqrtScale, lerp};
use super::types::{Point, Size};
use crate::config::LayoutPolicy;
use crate::model::{NodeIdx, SupplyGraph};

// ─── Metrics ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OuterMetrics {
    pub count: usize,
    /// Node width; the height is this times the group's `major_ratio`.
    pub size: f64,
    pub layers: usize,
    /// Nodes in the first layer.
    pub outer: usize,
    /// Nodes in the second (offset) layer.
    pub inner: usize,
    /// Minor-axis length of the first layer, padding included.
    pub length: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnconnectedMetrics {
    pub count: usize,
    pub side_a: usize,
    pub side_b: usize,
    /// Widest layer either side may need.
    pub layer_max: usize,
    /// Minor-axis length reserved for each side.
    pub side_length: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntermediateMetrics {
    pub size: f64,
    /// Gap between neighbouring intermediate nodes, in chart units.
    pub padding: f64,
    pub inner_count: usize,
    pub inner_length: f64,
    pub unconnected: UnconnectedMetrics,
    /// Intermediate sources plus sinks.
    pub edge_count: usize,
    pub edge_length: f64,
    pub double_spaced: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutMetrics {
    /// Chart width.
    pub minor: f64,
    /// Chart height.
    pub major: f64,
    pub source: OuterMetrics,
    pub sink: OuterMetrics,
    pub intermediate: IntermediateMetrics,
}

/// Where one node goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point,
    pub size: Size,
    pub layer: Option<usize>,
}

impl LayoutMetrics {
    pub fn compute(clusters: &Clusters, policy: &LayoutPolicy) -> Self {
        let minor = policy.extent.chart_width();
        let major = policy.extent.chart_height();
        let node = &policy.node;

        // Sources pack into two offset layers across the full chart width.
        let n_source = clusters.source.len();
        let source_outer = n_source.div_ceil(2);
        let source_inner = n_source / 2;
        let source_units = source_outer as f64 + source_inner as f64 * node.source.padding;

        // Sinks share the source size so both bands read alike.
        let n_sink = clusters.sink.len();
        let sink_layers = if n_source as f64 / 2.0 > n_sink as f64 { 1 } else { 2 };
        let sink_outer = if sink_layers == 2 { n_sink.div_ceil(2) } else { n_sink };

        let outer_size = if source_units > 0.0 {
            minor / source_units
        } else {
            let units = sink_outer as f64 + sink_outer.saturating_sub(1) as f64 * node.sink.padding;
            if units > 0.0 { minor / units } else { 0.0 }
        };
        if n_source == 0 {
            tracing::warn!("no source nodes; outer node size taken from the sinks");
        }

        let source = OuterMetrics {
            count: n_source,
            size: outer_size,
            layers: if source_inner > 0 { 2 } else { 1 },
            outer: source_outer,
            inner: source_inner,
            length: span(source_outer, outer_size, node.source.padding * outer_size),
        };
        let sink = OuterMetrics {
            count: n_sink,
            size: outer_size,
            layers: sink_layers,
            outer: sink_outer,
            inner: n_sink - sink_outer,
            length: span(sink_outer, outer_size, node.sink.padding * outer_size),
        };

        // Intermediate size leaves room for both unconnected sides and the inner row.
        let n_unconnected = clusters.unconnected.len();
        let layer_max = n_unconnected.div_ceil(4) + 1;
        let inner_count = clusters.inner.len();
        let units = (2 * layer_max + inner_count) as f64;
        let pad = node.intermediate.padding;
        let size = minor / (units + (units - 1.0) * pad);
        let padding = pad * size;

        let edge_count = clusters.intermediate_source.len() + clusters.intermediate_sink.len();
        let double_spaced = (edge_count as f64) < (inner_count as f64 - 1.0) * 0.5;
        let edge_length = span(edge_count, size, padding) * if double_spaced { 2.0 } else { 1.0 };

        let metrics = Self {
            minor,
            major,
            source,
            sink,
            intermediate: IntermediateMetrics {
                size,
                padding,
                inner_count,
                inner_length: span(inner_count, size, padding),
                unconnected: UnconnectedMetrics {
                    count: n_unconnected,
                    side_a: n_unconnected.div_ceil(2),
                    side_b: n_unconnected / 2,
                    layer_max,
                    side_length: span(layer_max, size, padding),
                },
                edge_count,
                edge_length,
                double_spaced,
            },
        };
        tracing::debug!(
            outer_size = metrics.source.size,
            intermediate_size = metrics.intermediate.size,
            sink_layers = metrics.sink.layers,
            double_spaced,
            "computed layout metrics"
        );
        metrics
    }

    // ── Outer groups ────────────────────────────────────────────────────────

    /// Sources alternate between two offset layers by index parity.
    pub fn source(&self, index: usize, policy: &LayoutPolicy) -> Placement {
        let s = self.source.size;
        let p = &policy.node.source;
        let layer = index % 2;
        let x = s * 0.5 + s * index as f64;
        let y = s * p.major_ratio * 0.5
            + self.major * policy.cluster.source
            + layer as f64 * s * (1.0 + p.padding) * (p.major_ratio - 1.0);
        Placement {
            position: Point::new(x, y),
            size: Size::new(s, s * p.major_ratio),
            layer: Some(layer),
        }
    }

    /// Sinks fill the first layer, then the offset second layer.
    pub fn sink(&self, index: usize, policy: &LayoutPolicy) -> Placement {
        let s = self.sink.size;
        let p = &policy.node.sink;
        let pad = p.padding * s;
        let outer = self.sink.outer.max(1);
        let count = (index % outer) as f64;
        let layer = index / outer;
        let offset = self.minor * 0.5 - self.sink.length * 0.5;
        let x = offset + s * 0.5 + layer as f64 * (s + pad) * 0.5 + count * (s + pad);
        let y = -s * p.major_ratio * 0.5 + self.major * policy.cluster.sink
            - layer as f64 * s * (1.0 + p.padding) * (p.major_ratio - 1.0);
        Placement {
            position: Point::new(x, y),
            size: Size::new(s, s * p.major_ratio),
            layer: Some(layer),
        }
    }

    // ── Intermediate groups ─────────────────────────────────────────────────

    /// Unconnected nodes: side A at the start of the minor axis, side B at
    /// the end, each in two offset layers.
    pub fn unconnected(&self, index: usize, policy: &LayoutPolicy) -> Placement {
        let m = &self.intermediate;
        let u = &m.unconnected;
        let (s, pad) = (m.size, m.padding);

        let (side_index, side_count, far_side) = if index < u.side_a {
            (index, u.side_a, false)
        } else {
            (index - u.side_a, u.side_b, true)
        };
        let layer_len = side_count.div_ceil(2).max(1);
        let count = (side_index % layer_len) as f64;
        let layer = side_index / layer_len;

        let node_len = s + side_count.saturating_sub(1) as f64 * (s * 0.5 + pad * 0.5);
        let mut offset = (u.side_length - node_len) * 0.5;
        if far_side {
            offset += self.minor - u.side_length;
        }

        let x = s * 0.5 + count * (s + pad) + layer as f64 * (s + pad) * 0.5 + offset;
        let y = self.major * policy.cluster.unconnected + layer as f64 * pad * 1.5 - pad * 0.75;
        Placement {
            position: Point::new(x, y),
            size: Size::square(s),
            layer: Some(layer),
        }
    }

    /// Inner nodes: minor position by sequence index, major by tier.
    pub fn inner(&self, index: usize, tier: f64, policy: &LayoutPolicy) -> Placement {
        let m = &self.intermediate;
        let offset = self.minor * 0.5 - m.inner_length * 0.5;
        let x = offset + m.size * 0.5 + index as f64 * (m.size + m.padding);
        let t = if policy.tier.max > 0.0 { tier / policy.tier.max } else { 0.0 };
        let y = lerp(
            t,
            self.major * policy.cluster.inner_start,
            self.major * policy.cluster.inner_end,
        );
        Placement {
            position: Point::new(x, y),
            size: Size::square(m.size),
            layer: None,
        }
    }

    /// Intermediate sources and sinks share one interleaved minor sequence;
    /// sources sit on the upper rail, sinks on the lower.
    pub fn intermediate_edge(&self, index: usize, is_source: bool, policy: &LayoutPolicy) -> Placement {
        let m = &self.intermediate;
        let factor = if m.double_spaced { 2.0 } else { 1.0 };
        let offset = self.minor * 0.5 - m.edge_length * 0.5;
        let x = (m.size * 0.5 + index as f64 * (m.size + m.padding)) * factor + offset;
        let y = if is_source {
            self.major * policy.cluster.intermediate_source
                - m.size * policy.node.intermediate.source_lift
        } else {
            self.major * policy.cluster.intermediate_sink
        };
        Placement {
            position: Point::new(x, y),
            size: Size::square(m.size),
            layer: None,
        }
    }
}

/// Length of `n` nodes of `size` with `gap` between neighbours.
fn span(n: usize, size: f64, gap: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    n as f64 * size + (n - 1) as f64 * gap
}

// ─── Radius ──────────────────────────────────────────────────────────────────

/// Square-root radius scales for intermediate nodes, one domain for
/// responsible entities and one for everything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScales {
    pub responsible: SqrtScale,
    pub other: SqrtScale,
}

impl RadiusScales {
    pub fn new(graph: &SupplyGraph, intermediates: &[NodeIdx], metrics: &LayoutMetrics, policy: &LayoutPolicy) -> Self {
        let size = metrics.intermediate.size;
        let range = (
            size * policy.node.intermediate.radius_min,
            size * policy.node.intermediate.radius_max,
        );
        let degrees = |responsible: bool| {
            intermediates
                .iter()
                .map(|&n| graph.node(n))
                .filter(move |node| node.responsible_entity == responsible)
                .map(|node| node.stats.connections as f64)
        };
        Self {
            responsible: SqrtScale::from_values(degrees(true), range),
            other: SqrtScale::from_values(degrees(false), range),
        }
    }

    pub fn radius(&self, graph: &SupplyGraph, n: NodeIdx) -> f64 {
        let node = graph.node(n);
        let scale = if node.responsible_entity { &self.responsible } else { &self.other };
        scale.apply(node.stats.connections as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_position.rs"]
mod tests;
