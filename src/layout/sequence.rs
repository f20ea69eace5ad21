//! Minor-axis ordering of every placement group.
//!
//! The inner group is ordered first by a greedy crossing-reduction pass; the
//! intermediate sources and sinks then follow the inner order, and once the
//! intermediates have coordinates the outer sources and sinks follow those.

use std::cmp::{Ordering, Reverse};

use super::arrange::{insert_in_middle, interleave_balanced, mountain_sort};
use super::scale::{mean, round_half_up};
use crate::config::{SequencePolicy, SourceOrder};
use crate::model::{Category, IntermediateClass, NodeIdx, SupplyGraph};

// ─── Inner group ─────────────────────────────────────────────────────────────

/// Non-loop links between `n` and inner intermediate nodes, both directions.
pub fn inner_degree(graph: &SupplyGraph, n: NodeIdx) -> usize {
    graph
        .successors(n)
        .chain(graph.predecessors(n))
        .filter(|&m| graph.node(m).is_inner())
        .count()
}

/// Order the inner group along the minor axis.
///
/// Nodes are ranked by inner degree and inserted one at a time next to the
/// mean position of the neighbours already placed. Groups of two or fewer
/// nodes come back in rank order.
pub fn order_inner(graph: &SupplyGraph, group: &[NodeIdx]) -> Vec<NodeIdx> {
    let mut ranked = group.to_vec();
    ranked.sort_by_key(|&n| Reverse(inner_degree(graph, n)));
    if ranked.len() <= 2 {
        return ranked;
    }

    let mut seq: Vec<NodeIdx> = ranked[..2].to_vec();
    let mut deferred = Vec::new();
    for &n in &ranked[2..] {
        match mean_linked_index(graph, &seq, n) {
            Some(at) => {
                let offset = usize::from(at as f64 >= seq.len() as f64 * 0.5);
                seq.insert((at + offset).min(seq.len()), n);
            }
            None => deferred.push(n),
        }
    }
    for n in deferred {
        match mean_linked_index(graph, &seq, n) {
            Some(at) => seq.insert(at.min(seq.len()), n),
            None => {
                tracing::trace!(node = %graph.node(n).id, "no placed neighbour, appended");
                seq.push(n);
            }
        }
    }

    reinsert_free_nodes(graph, &ranked, &mut seq);
    place_partners_outside(graph, &ranked, &mut seq);
    collapse_shared_targets(graph, &ranked, &mut seq);
    seq
}

/// Non-RE nodes without a reciprocal partner move to the mean index of
/// their linked neighbours.
fn reinsert_free_nodes(graph: &SupplyGraph, ranked: &[NodeIdx], seq: &mut Vec<NodeIdx>) {
    for &n in ranked {
        let node = graph.node(n);
        if node.responsible_entity || !node.return_nodes.is_empty() {
            continue;
        }
        let Some(from) = index_of(seq, n) else {
            continue;
        };
        // Target index is taken before the node leaves the sequence.
        let at = mean_linked_index(graph, seq, n).unwrap_or(from);
        seq.remove(from);
        seq.insert(at.min(seq.len()), n);
    }
}

/// A node with a responsible-entity partner keeps its partners beside it,
/// on the side further from the centre.
fn place_partners_outside(graph: &SupplyGraph, ranked: &[NodeIdx], seq: &mut Vec<NodeIdx>) {
    for &n in ranked {
        let node = graph.node(n);
        if !node
            .return_nodes
            .iter()
            .any(|&p| graph.node(p).responsible_entity)
        {
            continue;
        }
        for &partner in &node.return_nodes {
            let Some(from) = index_of(seq, partner) else {
                tracing::trace!(
                    node = %node.id,
                    partner = %graph.node(partner).id,
                    "partner outside inner group"
                );
                continue;
            };
            seq.remove(from);
            let Some(anchor) = index_of(seq, n) else {
                seq.insert(from, partner);
                continue;
            };
            let at = if (anchor as f64) < seq.len() as f64 * 0.5 {
                anchor
            } else {
                anchor + 1
            };
            seq.insert(at, partner);
        }
    }
}

/// Out-neighbours shared by a non-RE node and its partner sit right after
/// whichever of the pair comes first.
fn collapse_shared_targets(graph: &SupplyGraph, ranked: &[NodeIdx], seq: &mut Vec<NodeIdx>) {
    for &n in ranked {
        let node = graph.node(n);
        if node.responsible_entity {
            continue;
        }
        for &partner in &node.return_nodes {
            for shared in shared_targets(graph, n, partner) {
                if index_of(seq, n).is_none() || index_of(seq, partner).is_none() {
                    continue;
                }
                let Some(from) = index_of(seq, shared) else {
                    continue;
                };
                seq.remove(from);
                let (Some(a), Some(b)) = (index_of(seq, n), index_of(seq, partner)) else {
                    seq.insert(from, shared);
                    continue;
                };
                seq.insert(a.min(b) + 1, shared);
            }
        }
    }
}

/// Targets of both `a` and `b`, excluding intermediate sinks and the pair
/// itself, in `a`'s link order without repeats.
pub fn shared_targets(graph: &SupplyGraph, a: NodeIdx, b: NodeIdx) -> Vec<NodeIdx> {
    let b_targets: Vec<NodeIdx> = graph.successors(b).collect();
    let mut shared = Vec::new();
    for t in graph.successors(a) {
        if t == a || t == b || shared.contains(&t) || !b_targets.contains(&t) {
            continue;
        }
        if graph.node(t).intermediate_class() == Some(IntermediateClass::Sink) {
            continue;
        }
        shared.push(t);
    }
    shared
}

/// Rounded mean sequence index of the placed nodes `n` links to or from,
/// one entry per link.
fn mean_linked_index(graph: &SupplyGraph, seq: &[NodeIdx], n: NodeIdx) -> Option<usize> {
    let linked = graph
        .successors(n)
        .chain(graph.predecessors(n))
        .filter_map(|m| index_of(seq, m))
        .map(|i| i as f64);
    mean(linked).map(|m| round_half_up(m) as usize)
}

fn index_of(seq: &[NodeIdx], n: NodeIdx) -> Option<usize> {
    seq.iter().position(|&m| m == n)
}

// ─── Intermediate sources and sinks ──────────────────────────────────────────

/// Ordered intermediate sources and sinks, and their balanced interleaving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeOrder {
    pub sources: Vec<NodeIdx>,
    pub sinks: Vec<NodeIdx>,
    pub interleaved: Vec<NodeIdx>,
}

/// Sort intermediate sources by the mean inner index of their inner targets
/// and sinks by that of their inner suppliers, descending, then interleave.
pub fn order_intermediate_edges(
    graph: &SupplyGraph,
    sources: &[NodeIdx],
    sinks: &[NodeIdx],
    inner: &[NodeIdx],
) -> EdgeOrder {
    let inner_mean = |n: NodeIdx, downstream: bool| -> Option<f64> {
        let neighbours: Vec<NodeIdx> = if downstream {
            graph.successors(n).collect()
        } else {
            graph.predecessors(n).collect()
        };
        mean(
            neighbours
                .into_iter()
                .filter(|&m| graph.node(m).is_inner())
                .filter_map(|m| index_of(inner, m))
                .map(|i| i as f64),
        )
    };

    let mut sources = sources.to_vec();
    sources.sort_by(|&a, &b| descending_some_first(inner_mean(a, true), inner_mean(b, true)));
    let mut sinks = sinks.to_vec();
    sinks.sort_by(|&a, &b| descending_some_first(inner_mean(a, false), inner_mean(b, false)));

    let interleaved = interleave_balanced(&sources, &sinks);
    EdgeOrder {
        sources,
        sinks,
        interleaved,
    }
}

fn descending_some_first(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ─── Outer sources and sinks ─────────────────────────────────────────────────

/// Order outer sources and sinks by the current x of the nodes they link to.
///
/// Reads `layout.position`, so the intermediate groups must already be placed.
pub fn order_outer(
    graph: &SupplyGraph,
    sources: &[NodeIdx],
    sinks: &[NodeIdx],
    policy: &SequencePolicy,
) -> (Vec<NodeIdx>, Vec<NodeIdx>) {
    // Only intermediates have coordinates yet; direct source-to-sink links
    // and unplaced neighbours do not count.
    let placed_x = |m: NodeIdx| {
        let node = graph.node(m);
        node.category()
            .is_some_and(Category::is_intermediate)
            .then_some(node.layout.position.x)
    };
    let target_x = |n: NodeIdx| -> f64 {
        let xs = graph
            .node(n)
            .links
            .outgoing
            .iter()
            .filter_map(|&l| placed_x(graph.link(l).to));
        mean(xs).unwrap_or(0.0)
    };
    let supplier_x = |n: NodeIdx| -> f64 {
        let xs = graph
            .node(n)
            .links
            .incoming
            .iter()
            .filter_map(|&l| placed_x(graph.link(l).from));
        mean(xs).unwrap_or(0.0)
    };
    let out_links = |n: NodeIdx| graph.node(n).links.outgoing.len();

    let by_target = |nodes: &mut Vec<NodeIdx>| {
        nodes.sort_by(|&a, &b| target_x(a).total_cmp(&target_x(b)));
    };

    let ordered_sources = match policy.source_order {
        SourceOrder::ByTarget => {
            let mut all = sources.to_vec();
            by_target(&mut all);
            all
        }
        SourceOrder::CentreMultiLink | SourceOrder::CentreMultiLinkMountain => {
            let (mut multi, mut single): (Vec<NodeIdx>, Vec<NodeIdx>) =
                sources.iter().copied().partition(|&n| out_links(n) > 1);
            by_target(&mut single);
            if policy.source_order == SourceOrder::CentreMultiLinkMountain {
                multi.sort_by_key(|&n| Reverse(out_links(n)));
                multi = mountain_sort(&multi);
            } else {
                by_target(&mut multi);
            }
            insert_in_middle(&single, &multi)
        }
    };

    let mut ordered_sinks = sinks.to_vec();
    ordered_sinks.sort_by(|&a, &b| supplier_x(a).total_cmp(&supplier_x(b)));

    (ordered_sources, ordered_sinks)
}

#[cfg(test)]
#[path = "../../tests/rust/test_sequence.rs"]
mod tests;
