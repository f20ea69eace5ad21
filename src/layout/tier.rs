//! Major-axis tier levels for the inner intermediate group.
//!
//! Responsible entities are bucketed by how many inner suppliers they have,
//! then nudged by their in/out balance; chain nodes settle between their two
//! neighbours; reciprocal pairs and their shared customers share a level.

use std::collections::HashMap;

use super::sequence::shared_targets;
use crate::config::TierPolicy;
use crate::model::{NodeIdx, SupplyGraph};

/// Tier levels, one per entry of `sequence` and in the same order.
///
/// `sequence` must be the minor-axis order of the inner group; chain
/// weighting reads distances between sequence indices.
pub fn assign_tiers(graph: &SupplyGraph, sequence: &[NodeIdx], policy: &TierPolicy) -> Vec<f64> {
    let index: HashMap<NodeIdx, usize> = sequence.iter().enumerate().map(|(i, &n)| (n, i)).collect();
    let mut level = vec![policy.neutral; sequence.len()];

    // ── Responsible entities by inner supplier count ────────────────────────
    let mut low = Vec::new();
    let mut high = Vec::new();
    for (i, &n) in sequence.iter().enumerate() {
        if !graph.node(n).responsible_entity {
            continue;
        }
        let suppliers = graph
            .predecessors(n)
            .filter(|&m| graph.node(m).is_inner())
            .count();
        level[i] = match suppliers {
            0 => policy.step(0.0),
            1 => {
                low.push(i);
                policy.step(2.0)
            }
            _ => {
                high.push(i);
                policy.step(4.0)
            }
        };
    }

    for &i in &low {
        let n = sequence[i];
        if network_out(graph, n).len() > network_in(graph, n).len() {
            level[i] = policy.step(1.0);
        }
    }
    for &i in &high {
        let n = sequence[i];
        if network_in(graph, n).len() > network_out(graph, n).len() {
            level[i] = policy.step(5.0);
        }
    }

    // ── Chain nodes ─────────────────────────────────────────────────────────
    let chains: Vec<(usize, usize, usize)> = sequence
        .iter()
        .enumerate()
        .filter_map(|(i, &n)| {
            let (ins, outs) = (network_in(graph, n), network_out(graph, n));
            match (ins.as_slice(), outs.as_slice()) {
                ([a], [b]) => Some((i, *index.get(a)?, *index.get(b)?)),
                _ => None,
            }
        })
        .collect();

    for &(i, a, b) in &chains {
        let range = a.abs_diff(b) as f64;
        level[i] = if range == 0.0 {
            (level[a] + level[b]) * 0.5
        } else {
            let to_in = i.abs_diff(a) as f64;
            let to_out = i.abs_diff(b) as f64;
            level[a] * to_out / range + level[b] * to_in / range
        };
    }
    let is_chain = |j: usize| chains.iter().any(|&(c, _, _)| c == j);
    for &(i, a, b) in &chains {
        if is_chain(a) && is_chain(b) {
            level[i] = (level[a] + level[b]) * 0.5;
        }
    }

    // ── Tie-break among same-level siblings ─────────────────────────────────
    let half = policy.step(0.5);
    for group in [&low, &high] {
        for &i in group {
            // No sibling links at all, or only outgoing ones: back half a step.
            let (from_sibling, _) = sibling_links(graph, sequence, group, &level, i);
            if !from_sibling {
                level[i] -= half;
            }
        }
        for &i in group {
            let (from_sibling, to_sibling) = sibling_links(graph, sequence, group, &level, i);
            if from_sibling && !to_sibling {
                level[i] += half;
            }
        }
    }

    // ── Pairs and shared customers ──────────────────────────────────────────
    for (i, &n) in sequence.iter().enumerate() {
        let node = graph.node(n);
        if node.responsible_entity {
            continue;
        }
        for partner in &node.return_nodes {
            if let Some(&p) = index.get(partner) {
                level[i] = level[p];
            }
        }
    }
    for (i, &n) in sequence.iter().enumerate() {
        let node = graph.node(n);
        if node.responsible_entity {
            continue;
        }
        for &partner in &node.return_nodes {
            for shared in shared_targets(graph, n, partner) {
                if let Some(&s) = index.get(&shared) {
                    level[s] = level[i];
                }
            }
        }
    }

    for l in &mut level {
        *l = l.clamp(0.0, policy.max);
    }
    tracing::debug!(
        nodes = sequence.len(),
        chains = chains.len(),
        "assigned tiers"
    );
    level
}

/// Inner suppliers of `n`, one per link, skipping reciprocal partners.
fn network_in(graph: &SupplyGraph, n: NodeIdx) -> Vec<NodeIdx> {
    graph
        .predecessors(n)
        .filter(|&m| graph.node(m).is_inner() && !graph.node(m).return_nodes.contains(&n))
        .collect()
}

/// Inner customers of `n`, one per link, skipping reciprocal partners.
fn network_out(graph: &SupplyGraph, n: NodeIdx) -> Vec<NodeIdx> {
    graph
        .successors(n)
        .filter(|&m| graph.node(m).is_inner() && !graph.node(m).return_nodes.contains(&n))
        .collect()
}

/// Whether some same-level sibling in `group` links into the node at `i`,
/// and whether the node links out to one.
fn sibling_links(
    graph: &SupplyGraph,
    sequence: &[NodeIdx],
    group: &[usize],
    level: &[f64],
    i: usize,
) -> (bool, bool) {
    let n = sequence[i];
    let mut from_sibling = false;
    let mut to_sibling = false;
    for &j in group {
        if j == i || level[j] != level[i] {
            continue;
        }
        let sibling = sequence[j];
        from_sibling |= graph.successors(sibling).any(|m| m == n);
        to_sibling |= graph.predecessors(sibling).any(|m| m == n);
    }
    (from_sibling, to_sibling)
}

#[cfg(test)]
#[path = "../../tests/rust/test_tier.rs"]
mod tests;
