use super::*;
use crate::dataset::{LinkRecord, NodeRecord};
use petgraph::graph::NodeIndex;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn dummies(n: usize, offset: usize) -> Vec<NodeIdx> {
    (offset..offset + n).map(NodeIndex::new).collect()
}

fn clusters(source: usize, sink: usize, unconnected: usize, inner: usize, edges: usize) -> Clusters {
    Clusters {
        source: dummies(source, 0),
        sink: dummies(sink, 100),
        unconnected: dummies(unconnected, 200),
        intermediate_source: dummies(edges, 300),
        intermediate_sink: Vec::new(),
        inner: dummies(inner, 400),
        intermediate_edges: dummies(edges, 300),
    }
}

fn all_finite(m: &LayoutMetrics) -> bool {
    [
        m.minor,
        m.major,
        m.source.size,
        m.source.length,
        m.sink.size,
        m.sink.length,
        m.intermediate.size,
        m.intermediate.padding,
        m.intermediate.inner_length,
        m.intermediate.edge_length,
        m.intermediate.unconnected.side_length,
    ]
    .iter()
    .all(|v| v.is_finite())
}

#[test]
fn test_metrics_outer_sizes() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&clusters(4, 1, 0, 3, 1), &policy);
    // Two sources per layer, each followed by one node-width of padding.
    assert!(close(m.source.size, 250.0));
    assert_eq!((m.source.outer, m.source.inner, m.source.layers), (2, 2, 2));
    assert_eq!(m.sink.layers, 1);
    assert!(close(m.sink.size, 250.0));
    assert!(close(m.sink.length, 250.0));
}

#[test]
fn test_metrics_intermediate_sizes() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&clusters(4, 1, 0, 3, 1), &policy);
    let s = 1000.0 / 9.0;
    assert!(close(m.intermediate.size, s));
    assert!(close(m.intermediate.padding, s));
    assert!(close(m.intermediate.inner_length, 5.0 * s));
    assert_eq!(m.intermediate.unconnected.layer_max, 1);
    assert!(!m.intermediate.double_spaced);
    assert!(close(m.intermediate.edge_length, s));
}

#[test]
fn test_few_edges_are_double_spaced() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&clusters(2, 2, 0, 6, 1), &policy);
    assert!(m.intermediate.double_spaced);
    assert!(close(m.intermediate.edge_length, 2.0 * m.intermediate.size));
}

#[test]
fn test_sink_layers_follow_source_count() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&clusters(2, 3, 0, 0, 0), &policy);
    assert_eq!(m.sink.layers, 2);
    assert_eq!((m.sink.outer, m.sink.inner), (2, 1));
}

#[test]
fn test_empty_clusters_stay_finite() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&Clusters::default(), &policy);
    assert!(all_finite(&m));
    assert_eq!(m.source.size, 0.0);
    assert_eq!(m.intermediate.inner_length, 0.0);
    assert_eq!(m.intermediate.edge_length, 0.0);
}

#[test]
fn test_sinks_only_take_size_from_sinks() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&clusters(0, 2, 0, 0, 0), &policy);
    assert!(all_finite(&m));
    assert!(close(m.sink.size, 1000.0));
    let p = m.sink(0, &policy);
    assert!(p.position.is_finite());
}

#[test]
fn test_source_and_sink_placement() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&clusters(4, 1, 0, 3, 1), &policy);

    let first = m.source(0, &policy);
    assert_eq!(first.layer, Some(0));
    assert!(close(first.position.x, 125.0));
    assert!(close(first.position.y, 500.0));
    assert_eq!(first.size, Size::new(250.0, 1000.0));

    let second = m.source(1, &policy);
    assert_eq!(second.layer, Some(1));
    assert!(close(second.position.x, 375.0));
    assert!(second.position.y > first.position.y);

    let sink = m.sink(0, &policy);
    assert_eq!(sink.layer, Some(0));
    // A lone sink is centred on the minor axis and ends at the chart edge.
    assert!(close(sink.position.x, 500.0));
    assert!(close(sink.position.y, 500.0));
}

#[test]
fn test_inner_placement_maps_tier_to_band() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&clusters(4, 1, 0, 3, 1), &policy);
    let s = 1000.0 / 9.0;

    let top = m.inner(0, 0.0, &policy);
    assert!(close(top.position.x, 500.0 - 2.0 * s));
    assert!(close(top.position.y, 300.0));
    assert_eq!(top.layer, None);

    let mid = m.inner(1, 2.5, &policy);
    assert!(close(mid.position.x, 500.0));
    assert!(close(mid.position.y, 550.0));

    let bottom = m.inner(2, 5.0, &policy);
    assert!(close(bottom.position.x, 500.0 + 2.0 * s));
    assert!(close(bottom.position.y, 800.0));
}

#[test]
fn test_intermediate_edge_rails() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&clusters(4, 1, 0, 3, 1), &policy);
    let s = 1000.0 / 9.0;

    let source = m.intermediate_edge(0, true, &policy);
    assert!(close(source.position.x, 500.0));
    assert!(close(source.position.y, 250.0 - s * 0.25));

    let sink = m.intermediate_edge(0, false, &policy);
    assert!(close(sink.position.y, 850.0));
}

#[test]
fn test_intermediate_source_lift_from_policy() {
    let mut policy = LayoutPolicy::default();
    policy.node.intermediate.source_lift = 0.5;
    let m = LayoutMetrics::compute(&clusters(4, 1, 0, 3, 1), &policy);
    let s = 1000.0 / 9.0;
    assert!(close(m.intermediate_edge(0, true, &policy).position.y, 250.0 - s * 0.5));

    policy.node.intermediate.source_lift = 0.0;
    assert!(close(m.intermediate_edge(0, true, &policy).position.y, 250.0));
}

#[test]
fn test_unconnected_sides() {
    let policy = LayoutPolicy::default();
    let m = LayoutMetrics::compute(&clusters(0, 0, 3, 0, 0), &policy);
    let u = &m.intermediate.unconnected;
    assert_eq!((u.side_a, u.side_b, u.layer_max), (2, 1, 2));
    let s = 1000.0 / 7.0;
    assert!(close(m.intermediate.size, s));

    let a0 = m.unconnected(0, &policy);
    assert_eq!(a0.layer, Some(0));
    assert!(close(a0.position.x, s));
    assert!(close(a0.position.y, 550.0 - 0.75 * s));

    let a1 = m.unconnected(1, &policy);
    assert_eq!(a1.layer, Some(1));
    assert!(close(a1.position.x, 2.0 * s));
    assert!(close(a1.position.y, 550.0 + 0.75 * s));

    let b0 = m.unconnected(2, &policy);
    assert_eq!(b0.layer, Some(0));
    assert!(close(b0.position.x, 1000.0 - 1.5 * s));
}

#[test]
fn test_radius_scales_split_responsible_entities() {
    let nodes = vec![
        NodeRecord::new("S"),
        NodeRecord::responsible("R"),
        NodeRecord::new("A"),
        NodeRecord::new("B"),
        NodeRecord::new("K"),
    ];
    let links: Vec<LinkRecord> = [
        ("S", "R"),
        ("R", "A"),
        ("A", "R"),
        ("R", "B"),
        ("A", "B"),
        ("B", "K"),
        ("A", "K"),
    ]
    .iter()
    .map(|&(a, b)| LinkRecord::new(a, b))
    .collect();
    let g = SupplyGraph::build(&nodes, &links).unwrap();
    let policy = LayoutPolicy::default();
    let c = Clusters::assign(&g);
    let m = LayoutMetrics::compute(&c, &policy);
    let intermediates: Vec<NodeIdx> = ["R", "A", "B"].iter().map(|id| g.find(id).unwrap()).collect();
    let scales = RadiusScales::new(&g, &intermediates, &m, &policy);

    let size = m.intermediate.size;
    let r = scales.radius(&g, g.find("R").unwrap());
    // The only responsible entity sits at the midpoint of its own scale.
    assert!(close(r, size * 0.45));
    // A has four connections, B three: the extremes of the other scale.
    assert!(close(scales.radius(&g, g.find("A").unwrap()), size * 0.75));
    assert!(close(scales.radius(&g, g.find("B").unwrap()), size * 0.15));
}
