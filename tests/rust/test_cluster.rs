use super::*;
use crate::dataset::{LinkRecord, NodeRecord};

fn build(ids: &[&str], pairs: &[(&str, &str)]) -> SupplyGraph {
    let nodes: Vec<NodeRecord> = ids.iter().map(|&id| NodeRecord::new(id)).collect();
    let links: Vec<LinkRecord> = pairs.iter().map(|&(a, b)| LinkRecord::new(a, b)).collect();
    SupplyGraph::build(&nodes, &links).unwrap()
}

fn ids(g: &SupplyGraph, group: &[NodeIdx]) -> Vec<String> {
    group.iter().map(|&n| g.node(n).id.clone()).collect()
}

#[test]
fn test_assign_groups_by_category() {
    let g = build(
        &["S", "A", "B", "C", "U1", "U2", "U3", "K", "X"],
        &[
            ("S", "A"),
            ("A", "B"),
            ("B", "C"),
            ("C", "K"),
            ("S", "U1"),
            ("U1", "K"),
            ("S", "U2"),
            ("U2", "K"),
            ("S", "U3"),
            ("U3", "K"),
        ],
    );
    let c = Clusters::assign(&g);
    assert_eq!(ids(&g, &c.source), vec!["S"]);
    assert_eq!(ids(&g, &c.sink), vec!["K"]);
    assert_eq!(ids(&g, &c.intermediate_source), vec!["A"]);
    assert_eq!(ids(&g, &c.inner), vec!["B"]);
    assert_eq!(ids(&g, &c.intermediate_sink), vec!["C"]);
    assert_eq!(ids(&g, &c.unconnected), vec!["U1", "U2", "U3"]);
    assert!(c.intermediate_edges.is_empty());
    // X has no links and stays out of every group.
    assert_eq!(c.placed(), 8);
    assert_eq!(c.group(Category::IntermediateInner), c.inner.as_slice());

    let (side_a, side_b) = c.unconnected_sides();
    assert_eq!(ids(&g, side_a), vec!["U1", "U2"]);
    assert_eq!(ids(&g, side_b), vec!["U3"]);
}

#[test]
fn test_assign_empty_graph() {
    let c = Clusters::assign(&SupplyGraph::default());
    assert_eq!(c, Clusters::default());
    assert_eq!(c.placed(), 0);
    let (a, b) = c.unconnected_sides();
    assert!(a.is_empty() && b.is_empty());
}
