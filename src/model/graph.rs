//! SupplyGraph: the arena holding every node and link of one dataset.
//!
//! Nodes and links live in a petgraph `DiGraph`; all cross references are
//! arena indices. Node ids map to indices through `node_index`.

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;

use super::link::{Link, LinkAttributes, LinkEndpoints};
use super::node::{Classification, IntermediateClass, LinkStats, Node};
use super::{LinkIdx, NodeIdx};
use crate::dataset::{Dataset, LinkRecord, NodeRecord};
use crate::error::GraphError;

#[derive(Debug, Clone, Default)]
pub struct SupplyGraph {
    pub digraph: DiGraph<Node, Link>,
    /// Maps node id → arena index.
    pub node_index: HashMap<String, NodeIdx>,
}

impl SupplyGraph {
    /// Build and summarise a graph from records.
    ///
    /// Every link endpoint must name a node record; the first that does not
    /// fails the whole build before any link is registered.
    pub fn build(nodes: &[NodeRecord], links: &[LinkRecord]) -> Result<Self, GraphError> {
        let mut graph = Self::default();
        for record in nodes {
            graph.add_node(record)?;
        }
        for (i, record) in links.iter().enumerate() {
            for id in [&record.from, &record.to] {
                if !graph.node_index.contains_key(id) {
                    return Err(GraphError::UnknownNode {
                        link: i,
                        node_id: id.clone(),
                    });
                }
            }
        }
        for (i, record) in links.iter().enumerate() {
            graph.add_link(i, record)?;
        }
        graph.summarise();
        Ok(graph)
    }

    pub fn from_dataset(dataset: &Dataset) -> Result<Self, GraphError> {
        Self::build(&dataset.nodes, &dataset.links)
    }

    // ── Mutation ─────────────────────────────────────────────────────────────

    fn add_node(&mut self, record: &NodeRecord) -> Result<NodeIdx, GraphError> {
        if self.node_index.contains_key(&record.id) {
            return Err(GraphError::DuplicateNode {
                id: record.id.clone(),
            });
        }
        let idx = self.digraph.add_node(Node::from_record(record));
        self.node_index.insert(record.id.clone(), idx);
        Ok(idx)
    }

    /// Register a link in both endpoints and mark any reciprocal pair.
    fn add_link(&mut self, position: usize, record: &LinkRecord) -> Result<LinkIdx, GraphError> {
        let resolve = |id: &String| {
            self.node_index
                .get(id)
                .copied()
                .ok_or_else(|| GraphError::UnknownNode {
                    link: position,
                    node_id: id.clone(),
                })
        };
        let from = resolve(&record.from)?;
        let to = resolve(&record.to)?;

        let id = self.digraph.edge_count();
        let link = Link::new(id, from, to, LinkAttributes::from(record));
        let idx = self.digraph.add_edge(from, to, link);

        if from == to {
            let adj = &mut self.digraph[from].links;
            adj.incoming.push(idx);
            adj.outgoing.push(idx);
            adj.loops.push(idx);
            return Ok(idx);
        }
        self.digraph[from].links.outgoing.push(idx);
        self.digraph[to].links.incoming.push(idx);

        let reverse: Vec<LinkIdx> = self.digraph[to]
            .links
            .outgoing
            .iter()
            .copied()
            .filter(|&l| self.digraph[l].to == from)
            .collect();
        if !reverse.is_empty() {
            self.digraph[idx].is_return = true;
            for l in reverse {
                self.digraph[l].is_return = true;
            }
            if !self.digraph[from].return_nodes.contains(&to) {
                self.digraph[from].return_nodes.push(to);
            }
            if !self.digraph[to].return_nodes.contains(&from) {
                self.digraph[to].return_nodes.push(from);
            }
        }
        Ok(idx)
    }

    // ── Summarisation ────────────────────────────────────────────────────────

    /// Recompute statistics and classification from the current adjacency.
    ///
    /// The intermediate sub-class reads the neighbours' `is_intermediate`, so
    /// classification is repeated until a pass changes nothing. Returns the
    /// number of passes taken.
    pub fn summarise(&mut self) -> usize {
        let indices: Vec<NodeIdx> = self.digraph.node_indices().collect();
        for &n in &indices {
            let stats = self.link_stats(n);
            self.digraph[n].stats = stats;
        }

        let limit = indices.len() + 2;
        let mut passes = 0;
        loop {
            passes += 1;
            let next: Vec<Classification> = indices.iter().map(|&n| self.classify(n)).collect();
            let mut changed = 0usize;
            for (&n, class) in indices.iter().zip(next) {
                if self.digraph[n].class != class {
                    self.digraph[n].class = class;
                    changed += 1;
                }
            }
            tracing::trace!(pass = passes, changed, "classification pass");
            if changed == 0 {
                break;
            }
            if passes >= limit {
                tracing::warn!(passes, "classification did not settle");
                break;
            }
        }

        let edges: Vec<LinkIdx> = self.digraph.edge_indices().collect();
        for e in edges {
            let (from, to) = (self.digraph[e].from, self.digraph[e].to);
            let endpoints = LinkEndpoints {
                from: self.digraph[from].category(),
                to: self.digraph[to].category(),
            };
            self.digraph[e].endpoints = Some(endpoints);
        }

        tracing::debug!(
            nodes = indices.len(),
            links = self.digraph.edge_count(),
            passes,
            "summarised graph"
        );
        passes
    }

    fn classify(&self, n: NodeIdx) -> Classification {
        let adj = &self.digraph[n].links;
        let mut class =
            Classification::from_degrees(adj.incoming.len(), adj.outgoing.len(), adj.loops.len());
        debug_assert!(
            !(class.is_source && class.is_sink),
            "node '{}' classified as both source and sink",
            self.digraph[n].id
        );

        if class.is_intermediate {
            let inter_out = adj
                .outgoing
                .iter()
                .map(|&l| &self.digraph[l])
                .filter(|l| !l.is_loop && self.digraph[l.to].class.is_intermediate)
                .count();
            let inter_in = adj
                .incoming
                .iter()
                .map(|&l| &self.digraph[l])
                .filter(|l| !l.is_loop && self.digraph[l.from].class.is_intermediate)
                .count();
            class.intermediate = Some(IntermediateClass::from_counts(inter_in, inter_out));
        }
        class
    }

    fn link_stats(&self, n: NodeIdx) -> LinkStats {
        let adj = &self.digraph[n].links;
        let incoming = || adj.incoming.iter().map(|&l| &self.digraph[l].attrs);
        let outgoing = || adj.outgoing.iter().map(|&l| &self.digraph[l].attrs);

        let services: BTreeSet<String> = incoming()
            .chain(outgoing())
            .flat_map(|a| a.services.iter().cloned())
            .collect();

        let in_degree = adj.incoming.len();
        let out_degree = adj.outgoing.len();
        let loops = adj.loops.len();
        LinkStats {
            in_degree,
            out_degree,
            loops,
            in_external: in_degree - loops,
            out_external: out_degree - loops,
            connections: in_degree + out_degree,
            connections_external: in_degree + out_degree - 2 * loops,
            single_point_of_failure_in: incoming()
                .filter(|a| a.failure_point == Some(true))
                .count(),
            specialised_supplier_in: incoming()
                .filter(|a| a.from_specialised == Some(true))
                .count(),
            single_point_of_failure_out: outgoing()
                .filter(|a| a.failure_point == Some(true))
                .count(),
            resilient_in: incoming()
                .filter(|a| a.failure_resilient == Some(true))
                .count(),
            resilient_out: outgoing()
                .filter(|a| a.failure_resilient == Some(true))
                .count(),
            services: services.into_iter().collect(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.digraph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.digraph[idx]
    }

    pub fn link(&self, idx: LinkIdx) -> &Link {
        &self.digraph[idx]
    }

    pub fn link_mut(&mut self, idx: LinkIdx) -> &mut Link {
        &mut self.digraph[idx]
    }

    pub fn find(&self, id: &str) -> Option<NodeIdx> {
        self.node_index.get(id).copied()
    }

    /// Node indices in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.digraph.node_indices()
    }

    /// Link indices in creation (id) order.
    pub fn links(&self) -> impl Iterator<Item = LinkIdx> + '_ {
        self.digraph.edge_indices()
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.digraph.edge_count()
    }

    /// Targets of the node's non-loop outgoing links, one entry per link.
    pub fn successors(&self, n: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        self.digraph[n]
            .links
            .outgoing
            .iter()
            .map(|&l| &self.digraph[l])
            .filter(|l| !l.is_loop)
            .map(|l| l.to)
    }

    /// Sources of the node's non-loop incoming links, one entry per link.
    pub fn predecessors(&self, n: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        self.digraph[n]
            .links
            .incoming
            .iter()
            .map(|&l| &self.digraph[l])
            .filter(|l| !l.is_loop)
            .map(|l| l.from)
    }

    /// Number of links sharing this link's direction and endpoints.
    pub fn repeat_count(&self, link: LinkIdx) -> usize {
        let l = &self.digraph[link];
        self.digraph[l.from]
            .links
            .outgoing
            .iter()
            .filter(|&&o| self.digraph[o].to == l.to)
            .count()
    }

    /// Returns true if the graph has a directed cycle (self-links included).
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.digraph)
    }

    /// Unordered reciprocal pairs, each reported once with the lower index first.
    pub fn return_pairs(&self) -> Vec<(NodeIdx, NodeIdx)> {
        let mut pairs = Vec::new();
        for n in self.nodes() {
            for &m in &self.digraph[n].return_nodes {
                if n < m {
                    pairs.push((n, m));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_model_graph.rs"]
mod tests;
