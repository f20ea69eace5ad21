//! Link geometry: tapered network links, return arcs and stemmed boundary links.

use super::position::LayoutMetrics;
use super::scale::LinearScale;
use super::types::{LinkDirection, LinkPath, Point};
use crate::config::{LayoutPolicy, StemPolicy, TaperPolicy};
use crate::model::{Category, LinkIdx, NodeIdx, SupplyGraph};

// ─── Taper ───────────────────────────────────────────────────────────────────

/// Start and end half-widths of tapered links, scaled by intermediate node size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperScale {
    start: LinearScale,
    end: f64,
}

impl TaperScale {
    pub fn new(node_size: f64, policy: &TaperPolicy) -> Self {
        Self {
            start: LinearScale::new(
                (policy.repeat_low, policy.repeat_high),
                (node_size * policy.min, node_size * policy.max),
            ),
            end: node_size * policy.end,
        }
    }

    /// Start half-width for a link repeated `repeats` times between the same nodes.
    pub fn start(&self, repeats: usize) -> f64 {
        self.start.apply(repeats as f64)
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

// ─── Builders ────────────────────────────────────────────────────────────────

/// Quadrilateral narrowing from half-width `w1` at `from` to `w2` at `to`.
/// Zero-length links have no shape.
pub fn tapered_line(from: Point, to: Point, w1: f64, w2: f64) -> Option<LinkPath> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return None;
    }
    let (px, py) = (-dy / len, dx / len);
    let outline = [
        Point::new(from.x + px * w1, from.y + py * w1),
        Point::new(to.x + px * w2, to.y + py * w2),
        Point::new(to.x - px * w2, to.y - py * w2),
        Point::new(from.x - px * w1, from.y - py * w1),
    ];
    Some(LinkPath::TaperedLine {
        from,
        to,
        start_half_width: w1,
        end_half_width: w2,
        outline,
    })
}

/// Quadratic curve whose control point sits `arc_ratio × chord` off the
/// chord midpoint, outlined at `segments + 1` samples.
pub fn tapered_arc(
    from: Point,
    to: Point,
    arc_ratio: f64,
    w1: f64,
    w2: f64,
    segments: usize,
) -> Option<LinkPath> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let len = dx.hypot(dy);
    if len == 0.0 || segments == 0 {
        return None;
    }
    let (nx, ny) = (-dy / len, dx / len);
    let mid = from.midpoint(&to);
    let control = Point::new(mid.x + nx * len * arc_ratio, mid.y + ny * len * arc_ratio);

    let mut left = Vec::with_capacity(segments + 1);
    let mut right = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let u = 1.0 - t;
        let x = u * u * from.x + 2.0 * u * t * control.x + t * t * to.x;
        let y = u * u * from.y + 2.0 * u * t * control.y + t * t * to.y;

        let tx = 2.0 * u * (control.x - from.x) + 2.0 * t * (to.x - control.x);
        let ty = 2.0 * u * (control.y - from.y) + 2.0 * t * (to.y - control.y);
        let tlen = tx.hypot(ty);
        let (px, py) = if tlen == 0.0 { (nx, ny) } else { (-ty / tlen, tx / tlen) };

        let w = w1 + (w2 - w1) * t;
        left.push(Point::new(x + px * w, y + py * w));
        right.push(Point::new(x - px * w, y - py * w));
    }
    Some(LinkPath::TaperedArc {
        from,
        to,
        control,
        start_half_width: w1,
        end_half_width: w2,
        left,
        right,
    })
}

/// Rails a boundary link bends between, chosen by the category of its
/// supplier. Inner suppliers only get rails towards sinks; a link touching
/// an unplaced node gets none.
pub fn stem_rails<'a>(
    from: Option<Category>,
    to: Option<Category>,
    policy: &'a LayoutPolicy,
) -> Option<&'a StemPolicy> {
    let link = &policy.link;
    let to = to?;
    match from? {
        Category::Source => Some(&link.source_stem),
        Category::IntermediateSource => Some(&link.intermediate_stem.source),
        Category::IntermediateSink => Some(&link.intermediate_stem.sink),
        Category::Unconnected => Some(&link.intermediate_stem.unconnected),
        Category::IntermediateInner => {
            (to == Category::Sink).then_some(&link.intermediate_stem.inner)
        }
        Category::Sink => None,
    }
}

// ─── Per-link dispatch ───────────────────────────────────────────────────────

/// Geometry for one link from the final node positions.
pub fn link_path(
    graph: &SupplyGraph,
    idx: LinkIdx,
    metrics: &LayoutMetrics,
    taper: &TaperScale,
    policy: &LayoutPolicy,
) -> Option<LinkPath> {
    let link = graph.link(idx);
    let (from_node, to_node) = (graph.node(link.from), graph.node(link.to));
    let start = from_node.layout.position;
    let end = to_node.layout.position;

    if from_node.class().is_intermediate && to_node.class().is_intermediate {
        let w1 = taper.start(graph.repeat_count(idx));
        let w2 = taper.end();
        return if link.is_return {
            tapered_arc(
                start,
                end,
                policy.link.return_arc_ratio,
                w1,
                w2,
                policy.link.arc_segments,
            )
        } else {
            tapered_line(start, end, w1, w2)
        };
    }

    if link.is_loop {
        return None;
    }
    let rails = stem_rails(from_node.category(), to_node.category(), policy)?;
    Some(LinkPath::StemBezier {
        start,
        stem_start: Point::new(start.x, metrics.major * rails.start),
        stem_end: Point::new(end.x, metrics.major * rails.end),
        end,
    })
}

pub fn link_direction(graph: &SupplyGraph, from: NodeIdx, to: NodeIdx) -> LinkDirection {
    LinkDirection::between(
        &graph.node(from).layout.position,
        &graph.node(to).layout.position,
    )
}

#[cfg(test)]
#[path = "../../tests/rust/test_geometry.rs"]
mod tests;
