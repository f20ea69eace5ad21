use super::*;
use crate::dataset::{LinkRecord, NodeRecord};
use crate::layout::Clusters;
use crate::layout::types::Heading;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn build(ids: &[&str], pairs: &[(&str, &str)]) -> SupplyGraph {
    let nodes: Vec<NodeRecord> = ids.iter().map(|&id| NodeRecord::new(id)).collect();
    let links: Vec<LinkRecord> = pairs.iter().map(|&(a, b)| LinkRecord::new(a, b)).collect();
    SupplyGraph::build(&nodes, &links).unwrap()
}

fn place(g: &mut SupplyGraph, id: &str, x: f64, y: f64) {
    let n = g.find(id).unwrap();
    g.node_mut(n).layout.position = Point::new(x, y);
}

// ── Taper ────────────────────────────────────────────────────────────────────

#[test]
fn test_taper_scale_by_repeats() {
    let taper = TaperScale::new(100.0, &TaperPolicy::default());
    assert!(close(taper.start(1), 10.0));
    assert!(close(taper.start(3), 23.75));
    assert!(close(taper.start(5), 37.5));
    assert!(close(taper.end(), 2.5));
}

#[test]
fn test_tapered_line_outline() {
    let path = tapered_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0, 0.5).unwrap();
    let LinkPath::TaperedLine { outline, .. } = &path else {
        panic!("expected a tapered line, got {:?}", path);
    };
    assert_eq!(
        outline,
        &[
            Point::new(0.0, 2.0),
            Point::new(10.0, 0.5),
            Point::new(10.0, -0.5),
            Point::new(0.0, -2.0),
        ]
    );
    assert_eq!(path.half_width_at(0.0), Some(2.0));
    assert_eq!(path.half_width_at(1.0), Some(0.5));
    assert_eq!(path.half_width_at(0.5), Some(1.25));
}

#[test]
fn test_zero_length_links_have_no_shape() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(tapered_line(p, p, 1.0, 0.5), None);
    assert_eq!(tapered_arc(p, p, 0.5, 1.0, 0.5, 10), None);
}

#[test]
fn test_tapered_arc_bows_off_chord() {
    let path = tapered_arc(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0.5, 1.0, 0.0, 4).unwrap();
    let LinkPath::TaperedArc {
        control,
        left,
        right,
        ..
    } = &path
    else {
        panic!("expected a tapered arc, got {:?}", path);
    };
    assert_eq!(*control, Point::new(5.0, 5.0));
    assert_eq!(left.len(), 5);
    assert_eq!(right.len(), 5);
    // Apex of the curve, half a unit either side.
    assert!(close(left[2].x, 5.0) && close(left[2].y, 3.0));
    assert!(close(right[2].x, 5.0) && close(right[2].y, 2.0));
    // Zero end half-width closes the shape at the target.
    assert_eq!(left[4], Point::new(10.0, 0.0));
    assert_eq!(right[4], Point::new(10.0, 0.0));
    assert_eq!(path.half_width_at(0.0), Some(1.0));
}

// ── Rails ────────────────────────────────────────────────────────────────────

#[test]
fn test_stem_rails_by_supplier_category() {
    let policy = LayoutPolicy::default();
    assert_eq!(
        stem_rails(Some(Category::Source), Some(Category::IntermediateInner), &policy),
        Some(&policy.link.source_stem)
    );
    assert_eq!(
        stem_rails(Some(Category::IntermediateInner), Some(Category::Sink), &policy),
        Some(&policy.link.intermediate_stem.inner)
    );
    assert_eq!(
        stem_rails(
            Some(Category::IntermediateInner),
            Some(Category::IntermediateSink),
            &policy
        ),
        None
    );
    assert_eq!(stem_rails(Some(Category::Sink), None, &policy), None);
    assert_eq!(stem_rails(None, Some(Category::Sink), &policy), None);
    assert_eq!(stem_rails(Some(Category::Source), None, &policy), None);
}

// ── Per-link dispatch ────────────────────────────────────────────────────────

#[test]
fn test_link_path_by_endpoint_kind() {
    let mut g = build(
        &["S", "A", "B", "C"],
        &[("S", "A"), ("A", "B"), ("B", "A"), ("A", "C"), ("C", "B"), ("A", "A")],
    );
    place(&mut g, "S", 100.0, 100.0);
    place(&mut g, "A", 100.0, 400.0);
    place(&mut g, "B", 300.0, 400.0);
    place(&mut g, "C", 200.0, 600.0);
    let policy = LayoutPolicy::default();
    let metrics = LayoutMetrics::compute(&Clusters::assign(&g), &policy);
    let taper = TaperScale::new(metrics.intermediate.size, &policy.link.taper);
    let links: Vec<LinkIdx> = g.links().collect();
    let path = |i: usize| link_path(&g, links[i], &metrics, &taper, &policy);

    // Source into the network: stems on the source rails.
    assert_eq!(
        path(0),
        Some(LinkPath::StemBezier {
            start: Point::new(100.0, 100.0),
            stem_start: Point::new(100.0, 75.0),
            stem_end: Point::new(100.0, 250.0),
            end: Point::new(100.0, 400.0),
        })
    );
    assert!(matches!(path(1), Some(LinkPath::TaperedArc { .. })));
    assert!(matches!(path(2), Some(LinkPath::TaperedArc { .. })));
    assert!(matches!(path(3), Some(LinkPath::TaperedLine { .. })));
    assert!(matches!(path(4), Some(LinkPath::TaperedLine { .. })));
    assert_eq!(path(5), None);
}

#[test]
fn test_link_direction() {
    let mut g = build(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
    place(&mut g, "A", 0.0, 0.0);
    place(&mut g, "B", 0.0, 10.0);
    place(&mut g, "C", -5.0, 5.0);
    let (a, b, c) = (g.find("A").unwrap(), g.find("B").unwrap(), g.find("C").unwrap());
    assert_eq!(
        link_direction(&g, a, b),
        LinkDirection {
            major: Heading::Forward,
            minor: Heading::Neutral
        }
    );
    assert_eq!(
        link_direction(&g, b, c),
        LinkDirection {
            major: Heading::Backward,
            minor: Heading::Backward
        }
    );
}
