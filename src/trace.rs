//! Network trace: the depth-layered upstream/downstream reach of one node.
//!
//! Both directions expand together, one depth per step, each with its own
//! visited set. A node can therefore show up once upstream and once
//! downstream, but never twice in the same direction, which also bounds
//! the walk on cyclic graphs.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::LayoutError;
use crate::model::{LinkIdx, NodeIdx, SupplyGraph};

// ─── Types ───────────────────────────────────────────────────────────────────

/// Links followed at one depth in one direction, and the nodes they reached
/// for the first time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    pub links: Vec<LinkIdx>,
    pub nodes: Vec<NodeIdx>,
}

impl Frontier {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceLevel {
    pub depth: usize,
    pub upstream: Frontier,
    pub downstream: Frontier,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaxDepth {
    pub upstream: usize,
    pub downstream: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTrace {
    pub root: NodeIdx,
    /// Level 0 holds only the root (as the node set of both directions).
    pub levels: Vec<TraceLevel>,
    pub max_depth: MaxDepth,
}

#[derive(Clone, Copy)]
enum Direction {
    Upstream,
    Downstream,
}

// ─── Trace ───────────────────────────────────────────────────────────────────

/// Trace the network reachable from `root`. Reads adjacency only.
pub fn trace(graph: &SupplyGraph, root: NodeIdx) -> NetworkTrace {
    let seed = Frontier {
        links: Vec::new(),
        nodes: vec![root],
    };
    let mut levels = vec![TraceLevel {
        depth: 0,
        upstream: seed.clone(),
        downstream: seed,
    }];
    let mut seen_up: HashSet<NodeIdx> = HashSet::from([root]);
    let mut seen_down: HashSet<NodeIdx> = HashSet::from([root]);
    let mut max_depth = MaxDepth::default();

    let mut up = vec![root];
    let mut down = vec![root];
    let mut depth = 0;
    while !up.is_empty() || !down.is_empty() {
        depth += 1;
        let upstream = expand(graph, &up, &mut seen_up, Direction::Upstream);
        let downstream = expand(graph, &down, &mut seen_down, Direction::Downstream);
        if upstream.links.is_empty() && downstream.links.is_empty() {
            break;
        }
        if !upstream.links.is_empty() {
            max_depth.upstream = depth;
        }
        if !downstream.links.is_empty() {
            max_depth.downstream = depth;
        }
        up.clone_from(&upstream.nodes);
        down.clone_from(&downstream.nodes);
        levels.push(TraceLevel {
            depth,
            upstream,
            downstream,
        });
    }

    NetworkTrace {
        root,
        levels,
        max_depth,
    }
}

/// Trace the node with the given id.
pub fn trace_id(graph: &SupplyGraph, id: &str) -> Result<NetworkTrace, LayoutError> {
    let root = graph
        .find(id)
        .ok_or_else(|| LayoutError::UnknownTraceTarget(id.to_string()))?;
    Ok(trace(graph, root))
}

fn expand(
    graph: &SupplyGraph,
    frontier: &[NodeIdx],
    seen: &mut HashSet<NodeIdx>,
    direction: Direction,
) -> Frontier {
    let mut next = Frontier::default();
    for &n in frontier {
        let adj = &graph.node(n).links;
        let links = match direction {
            Direction::Upstream => &adj.incoming,
            Direction::Downstream => &adj.outgoing,
        };
        for &l in links {
            next.links.push(l);
            let link = graph.link(l);
            let reached = match direction {
                Direction::Upstream => link.from,
                Direction::Downstream => link.to,
            };
            if seen.insert(reached) {
                next.nodes.push(reached);
            }
        }
    }
    next
}

// ─── Report ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontierReport {
    pub links: Vec<usize>,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceLevelReport {
    pub depth: usize,
    pub upstream: FrontierReport,
    pub downstream: FrontierReport,
}

/// A trace with node ids and link ids in place of arena indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    pub root: String,
    pub levels: Vec<TraceLevelReport>,
    pub max_depth: MaxDepth,
}

impl NetworkTrace {
    /// Every node reached in either direction, root excluded, without repeats.
    pub fn reached(&self) -> Vec<NodeIdx> {
        let mut out: Vec<NodeIdx> = Vec::new();
        for level in self.levels.iter().skip(1) {
            for &n in level.upstream.nodes.iter().chain(&level.downstream.nodes) {
                if n != self.root && !out.contains(&n) {
                    out.push(n);
                }
            }
        }
        out
    }

    pub fn to_report(&self, graph: &SupplyGraph) -> TraceReport {
        let frontier = |f: &Frontier| FrontierReport {
            links: f.links.iter().map(|&l| graph.link(l).id).collect(),
            nodes: f.nodes.iter().map(|&n| graph.node(n).id.clone()).collect(),
        };
        TraceReport {
            root: graph.node(self.root).id.clone(),
            levels: self
                .levels
                .iter()
                .map(|level| TraceLevelReport {
                    depth: level.depth,
                    upstream: frontier(&level.upstream),
                    downstream: frontier(&level.downstream),
                })
                .collect(),
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_trace.rs"]
mod tests;
