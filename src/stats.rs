//! Whole-graph statistics: category counts, pairs, loops, failure points and
//! service coverage.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::Schema;
use crate::model::{Category, SupplyGraph};

/// Schema tables holding essential-service ids, in lookup order.
const ESSENTIAL_SERVICE_TABLES: [&str; 2] = ["essential-services", "essential-waste-services"];
const SERVICE_TABLE: &str = "services";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceCount {
    pub label: String,
    pub nodes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub links: usize,
    pub categories: BTreeMap<Category, usize>,
    /// Nodes with no category (isolated, or self-links only).
    pub unplaced: usize,
    pub responsible_entities: usize,
    /// Nodes with at least one self-link.
    pub vertically_integrated: usize,
    pub loops: usize,
    pub return_pairs: usize,
    pub failure_points: usize,
    pub resilient_links: usize,
    pub has_cycles: bool,
    /// Essential-service id → responsible entities that provide it.
    pub essential_services: BTreeMap<String, ServiceCount>,
    /// Service id → nodes with a link assigned to it.
    pub services: BTreeMap<String, ServiceCount>,
}

impl GraphStats {
    pub fn collect(graph: &SupplyGraph, schema: &Schema) -> Self {
        let mut stats = GraphStats {
            nodes: graph.node_count(),
            links: graph.link_count(),
            return_pairs: graph.return_pairs().len(),
            has_cycles: graph.has_cycles(),
            ..Self::default()
        };

        for n in graph.nodes() {
            let node = graph.node(n);
            match node.category() {
                Some(category) => *stats.categories.entry(category).or_default() += 1,
                None => stats.unplaced += 1,
            }
            stats.responsible_entities += usize::from(node.responsible_entity);
            stats.vertically_integrated += usize::from(node.class().has_loop);
        }

        for l in graph.links() {
            let link = graph.link(l);
            stats.loops += usize::from(link.is_loop);
            stats.failure_points += usize::from(link.attrs.failure_point == Some(true));
            stats.resilient_links += usize::from(link.attrs.failure_resilient == Some(true));
        }

        if let Some(table) = ESSENTIAL_SERVICE_TABLES
            .iter()
            .find(|t| schema.tables.contains_key(**t))
        {
            for id in schema.ids(table) {
                let nodes = graph
                    .nodes()
                    .map(|n| graph.node(n))
                    .filter(|node| {
                        node.responsible_entity && node.essential_services.iter().any(|s| s == id)
                    })
                    .count();
                stats.essential_services.insert(
                    id.to_string(),
                    ServiceCount {
                        label: schema.label(table, id).to_string(),
                        nodes,
                    },
                );
            }
        }

        for id in schema.ids(SERVICE_TABLE) {
            let nodes = graph
                .nodes()
                .filter(|&n| graph.node(n).stats.services.iter().any(|s| s == id))
                .count();
            stats.services.insert(
                id.to_string(),
                ServiceCount {
                    label: schema.label(SERVICE_TABLE, id).to_string(),
                    nodes,
                },
            );
        }

        tracing::debug!(
            nodes = stats.nodes,
            links = stats.links,
            return_pairs = stats.return_pairs,
            "collected graph statistics"
        );
        stats
    }

    pub fn category(&self, category: Category) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_stats.rs"]
mod tests;
