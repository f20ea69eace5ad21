use super::*;
use crate::error::LayoutError;

#[test]
fn test_default_policy_validates() {
    let policy = LayoutPolicy::default();
    assert!(policy.validate().is_ok());
    assert_eq!(policy.extent.chart_width(), 1000.0);
    assert_eq!(policy.extent.chart_height(), 1000.0);
}

#[test]
fn test_unconnected_ratio_sits_mid_inner_band() {
    let c = ClusterPolicy::default();
    assert!((c.unconnected - 0.55).abs() < 1e-12);
}

#[test]
fn test_partial_json_keeps_defaults() {
    let policy = LayoutPolicy::from_json(r#"{"extent": {"width": 800}, "tier": {"neutral": 2}}"#)
        .unwrap();
    assert_eq!(policy.extent.width, 800.0);
    assert_eq!(policy.extent.height, 1100.0);
    assert_eq!(policy.extent.margin, Margin::default());
    assert_eq!(policy.tier.neutral, 2.0);
    assert_eq!(policy.tier.max, 5.0);
    assert_eq!(policy.link, LinkPolicy::default());
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(LayoutPolicy::from_json("{}").unwrap(), LayoutPolicy::default());
}

#[test]
fn test_source_order_parses_kebab_case() {
    let policy =
        LayoutPolicy::from_json(r#"{"sequence": {"source_order": "centre-multi-link-mountain"}}"#)
            .unwrap();
    assert_eq!(
        policy.sequence.source_order,
        SourceOrder::CentreMultiLinkMountain
    );
}

#[test]
fn test_ratio_out_of_range_rejected() {
    let mut policy = LayoutPolicy::default();
    policy.cluster.sink = 1.5;
    assert_eq!(
        policy.validate(),
        Err(ConfigError::RatioOutOfRange {
            field: "cluster.sink",
            value: 1.5
        })
    );
}

#[test]
fn test_margins_exceeding_extent_rejected() {
    let mut policy = LayoutPolicy::default();
    policy.extent.margin.left = 600.0;
    policy.extent.margin.right = 600.0;
    assert_eq!(
        policy.validate(),
        Err(ConfigError::MarginsExceedExtent { axis: "minor" })
    );
}

#[test]
fn test_inverted_inner_band_rejected() {
    let mut policy = LayoutPolicy::default();
    policy.cluster.inner_start = 0.9;
    assert!(matches!(
        policy.validate(),
        Err(ConfigError::InvertedRange {
            field: "cluster.inner",
            ..
        })
    ));
}

#[test]
fn test_zero_arc_segments_rejected() {
    let mut policy = LayoutPolicy::default();
    policy.link.arc_segments = 0;
    assert!(matches!(
        policy.validate(),
        Err(ConfigError::NonPositive {
            field: "link.arc_segments",
            ..
        })
    ));
}

#[test]
fn test_negative_source_lift_rejected() {
    let mut policy = LayoutPolicy::default();
    policy.node.intermediate.source_lift = -0.1;
    assert!(matches!(
        policy.validate(),
        Err(ConfigError::NonPositive {
            field: "node.intermediate.source_lift",
            ..
        })
    ));
}

#[test]
fn test_neutral_tier_above_max_rejected() {
    let mut policy = LayoutPolicy::default();
    policy.tier.neutral = 6.0;
    assert!(policy.validate().is_err());
}

#[test]
fn test_from_json_reports_validation_failure() {
    let err = LayoutPolicy::from_json(r#"{"node": {"sink": {"major_ratio": 0}}}"#).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::Config(ConfigError::NonPositive {
            field: "node.sink.major_ratio",
            ..
        })
    ));
}

#[test]
fn test_from_json_reports_syntax_error() {
    let err = LayoutPolicy::from_json("{not json").unwrap_err();
    assert!(matches!(err, LayoutError::Json(_)));
}
