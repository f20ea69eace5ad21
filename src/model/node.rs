//! Node entity: identity, metadata, adjacency, derived classification and
//! the layout fields written by the pipeline.

use serde::Serialize;

use super::{LinkIdx, NodeIdx};
use crate::dataset::NodeRecord;
use crate::layout::types::{Point, Size};
use crate::trace::NetworkTrace;

// ─── Category ────────────────────────────────────────────────────────────────

/// Placement group of a node. Every layout rule matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Source,
    Sink,
    IntermediateSource,
    IntermediateSink,
    IntermediateInner,
    Unconnected,
}

impl Category {
    pub fn is_intermediate(self) -> bool {
        !matches!(self, Category::Source | Category::Sink)
    }
}

/// Position of an intermediate node within the intermediate-only subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntermediateClass {
    Source,
    Sink,
    Inner,
    Unconnected,
}

impl IntermediateClass {
    /// Classify from link counts to and from other intermediate nodes.
    pub fn from_counts(inter_in: usize, inter_out: usize) -> Self {
        match (inter_in > 0, inter_out > 0) {
            (false, true) => IntermediateClass::Source,
            (true, false) => IntermediateClass::Sink,
            (true, true) => IntermediateClass::Inner,
            (false, false) => IntermediateClass::Unconnected,
        }
    }
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Flags derived from adjacency. Only [`super::SupplyGraph`] writes these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub has_in: bool,
    pub has_out: bool,
    pub has_loop: bool,
    pub is_source: bool,
    pub is_sink: bool,
    pub is_intermediate: bool,
    pub intermediate: Option<IntermediateClass>,
}

impl Classification {
    /// Flags that depend only on the node's own degree counts.
    pub fn from_degrees(in_degree: usize, out_degree: usize, loops: usize) -> Self {
        let has_in = in_degree > 0;
        let has_out = out_degree > 0;
        Self {
            has_in,
            has_out,
            has_loop: loops > 0,
            is_source: has_out && !has_in,
            is_sink: has_in && !has_out,
            is_intermediate: in_degree - loops > 0 && out_degree - loops > 0,
            intermediate: None,
        }
    }

    pub fn category(&self) -> Option<Category> {
        if self.is_source {
            return Some(Category::Source);
        }
        if self.is_sink {
            return Some(Category::Sink);
        }
        match self.intermediate {
            Some(IntermediateClass::Source) => Some(Category::IntermediateSource),
            Some(IntermediateClass::Sink) => Some(Category::IntermediateSink),
            Some(IntermediateClass::Inner) => Some(Category::IntermediateInner),
            Some(IntermediateClass::Unconnected) => Some(Category::Unconnected),
            None => None,
        }
    }
}

// ─── Adjacency ───────────────────────────────────────────────────────────────

/// Link ids touching a node. Self-links are listed in all three.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    pub incoming: Vec<LinkIdx>,
    pub outgoing: Vec<LinkIdx>,
    pub loops: Vec<LinkIdx>,
}

// ─── Statistics ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub in_degree: usize,
    pub out_degree: usize,
    pub loops: usize,
    /// In-degree without self-links.
    pub in_external: usize,
    /// Out-degree without self-links.
    pub out_external: usize,
    pub connections: usize,
    pub connections_external: usize,
    /// Customers that named this node a single point of failure.
    pub single_point_of_failure_in: usize,
    /// Customers that consider this node a specialised supplier.
    pub specialised_supplier_in: usize,
    /// Suppliers this node named as a single point of failure.
    pub single_point_of_failure_out: usize,
    /// Links marked resilient to this node failing, in and out.
    pub resilient_in: usize,
    pub resilient_out: usize,
    /// Unique services assigned across all in and out links, sorted.
    pub services: Vec<String>,
}

// ─── Layout fields ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLayout {
    pub category: Option<Category>,
    /// Index along the minor axis within the node's placement group.
    pub sequence: Option<usize>,
    /// Major-axis tier (inner intermediate nodes only).
    pub tier: Option<f64>,
    /// Offset band for source, sink and unconnected nodes.
    pub layer: Option<usize>,
    /// Center of the node in chart coordinates.
    pub position: Point,
    pub size: Size,
    pub radius: Option<f64>,
}

// ─── Node ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeMeta {
    pub name: Option<String>,
    pub label: Option<String>,
    pub label_short: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub meta: NodeMeta,
    pub responsible_entity: bool,
    pub services: Vec<String>,
    pub essential_services: Vec<String>,
    pub links: Adjacency,
    pub return_nodes: Vec<NodeIdx>,
    pub(crate) class: Classification,
    pub stats: LinkStats,
    pub layout: NodeLayout,
    pub trace: Option<NetworkTrace>,
}

impl Node {
    pub fn from_record(record: &NodeRecord) -> Self {
        Self {
            id: record.id.clone(),
            meta: NodeMeta {
                name: record.name.clone(),
                label: record.label.clone(),
                label_short: record.label_short.clone(),
                description: record.description.clone(),
            },
            responsible_entity: record.responsible_entity,
            services: record.services.clone(),
            essential_services: record.essential_services.clone(),
            links: Adjacency::default(),
            return_nodes: Vec::new(),
            class: Classification::default(),
            stats: LinkStats::default(),
            layout: NodeLayout::default(),
            trace: None,
        }
    }

    pub fn class(&self) -> &Classification {
        &self.class
    }

    pub fn category(&self) -> Option<Category> {
        self.class.category()
    }

    pub fn is_inner(&self) -> bool {
        self.class.intermediate == Some(IntermediateClass::Inner)
    }

    pub fn intermediate_class(&self) -> Option<IntermediateClass> {
        self.class.intermediate
    }

    pub fn label(&self) -> &str {
        self.meta
            .label
            .as_deref()
            .or(self.meta.name.as_deref())
            .unwrap_or(&self.id)
    }
}
