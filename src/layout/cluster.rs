//! Partition of the graph into placement groups.

use crate::model::{Category, NodeIdx, SupplyGraph};

/// Node indices per placement group, each in arena order until the
/// sequencing stages reorder them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clusters {
    pub source: Vec<NodeIdx>,
    pub sink: Vec<NodeIdx>,
    pub unconnected: Vec<NodeIdx>,
    pub intermediate_source: Vec<NodeIdx>,
    pub intermediate_sink: Vec<NodeIdx>,
    pub inner: Vec<NodeIdx>,
    /// Intermediate sources and sinks interleaved along the minor axis.
    pub intermediate_edges: Vec<NodeIdx>,
}

impl Clusters {
    pub fn assign(graph: &SupplyGraph) -> Self {
        let mut clusters = Self::default();
        for n in graph.nodes() {
            let Some(category) = graph.node(n).category() else {
                continue;
            };
            clusters.group_mut(category).push(n);
        }
        tracing::debug!(
            source = clusters.source.len(),
            sink = clusters.sink.len(),
            unconnected = clusters.unconnected.len(),
            intermediate_source = clusters.intermediate_source.len(),
            intermediate_sink = clusters.intermediate_sink.len(),
            inner = clusters.inner.len(),
            "assigned clusters"
        );
        clusters
    }

    pub fn group(&self, category: Category) -> &[NodeIdx] {
        match category {
            Category::Source => &self.source,
            Category::Sink => &self.sink,
            Category::Unconnected => &self.unconnected,
            Category::IntermediateSource => &self.intermediate_source,
            Category::IntermediateSink => &self.intermediate_sink,
            Category::IntermediateInner => &self.inner,
        }
    }

    fn group_mut(&mut self, category: Category) -> &mut Vec<NodeIdx> {
        match category {
            Category::Source => &mut self.source,
            Category::Sink => &mut self.sink,
            Category::Unconnected => &mut self.unconnected,
            Category::IntermediateSource => &mut self.intermediate_source,
            Category::IntermediateSink => &mut self.intermediate_sink,
            Category::IntermediateInner => &mut self.inner,
        }
    }

    /// Unconnected nodes split into the two side groups: `ceil(n/2)` then the rest.
    pub fn unconnected_sides(&self) -> (&[NodeIdx], &[NodeIdx]) {
        self.unconnected.split_at(self.unconnected.len().div_ceil(2))
    }

    /// Total number of placed nodes.
    pub fn placed(&self) -> usize {
        self.source.len()
            + self.sink.len()
            + self.unconnected.len()
            + self.intermediate_source.len()
            + self.intermediate_sink.len()
            + self.inner.len()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_cluster.rs"]
mod tests;
