//! Graph model: nodes, links and the arena that owns them.

pub mod graph;
pub mod link;
pub mod node;

use petgraph::graph::{EdgeIndex, NodeIndex};

pub use graph::SupplyGraph;
pub use link::{Link, LinkAttributes, LinkEndpoints};
pub use node::{
    Adjacency, Category, Classification, IntermediateClass, LinkStats, Node, NodeLayout, NodeMeta,
};

/// Arena index of a node.
pub type NodeIdx = NodeIndex;
/// Arena index of a link; its `index()` is the link id.
pub type LinkIdx = EdgeIndex;
