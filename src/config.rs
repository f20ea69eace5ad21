//! Layout policy: every size, spacing and axis ratio the engine reads.
//!
//! The policy is built once (from defaults or a partial JSON document), checked
//! with [`LayoutPolicy::validate`], and then only borrowed by the layout stages.
//! Axis ratios are fractions of the chart length along that axis; node paddings
//! are multiples of the computed node size.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ─── Extent ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            bottom: 50.0,
            left: 50.0,
            right: 50.0,
        }
    }
}

/// Overall canvas size. The chart area is the canvas inset by the margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 1100.0,
            margin: Margin::default(),
        }
    }
}

impl Extent {
    /// Length of the minor (across-flow) axis of the chart area.
    pub fn chart_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Length of the major (flow) axis of the chart area.
    pub fn chart_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}

// ─── Node sizing ─────────────────────────────────────────────────────────────

/// Sizing of the outer (source or sink) node bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OuterNodePolicy {
    /// Gap between neighbouring nodes, as a multiple of the node size.
    pub padding: f64,
    /// Node length along the major axis, as a multiple of its width.
    pub major_ratio: f64,
}

impl Default for OuterNodePolicy {
    fn default() -> Self {
        Self {
            padding: 1.0,
            major_ratio: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntermediateNodePolicy {
    pub padding: f64,
    /// Lift of intermediate sources above their rail, as a fraction of the
    /// intermediate node size.
    pub source_lift: f64,
    /// Smallest radius, as a fraction of the intermediate node size.
    pub radius_min: f64,
    /// Largest radius, as a fraction of the intermediate node size.
    pub radius_max: f64,
}

impl Default for IntermediateNodePolicy {
    fn default() -> Self {
        Self {
            padding: 1.0,
            source_lift: 0.25,
            radius_min: 0.15,
            radius_max: 0.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodePolicy {
    pub source: OuterNodePolicy,
    pub sink: OuterNodePolicy,
    pub intermediate: IntermediateNodePolicy,
}

// ─── Cluster positions (major axis) ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterPolicy {
    pub source: f64,
    pub intermediate_source: f64,
    pub inner_start: f64,
    pub inner_end: f64,
    pub unconnected: f64,
    pub intermediate_sink: f64,
    pub sink: f64,
}

impl Default for ClusterPolicy {
    fn default() -> Self {
        Self {
            source: 0.0,
            intermediate_source: 0.25,
            inner_start: 0.3,
            inner_end: 0.8,
            unconnected: (0.8 + 0.3) * 0.5,
            intermediate_sink: 0.85,
            sink: 1.0,
        }
    }
}

// ─── Links ───────────────────────────────────────────────────────────────────

/// Major-axis ratios of the two rails a stemmed link bends between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StemPolicy {
    pub start: f64,
    pub end: f64,
}

impl StemPolicy {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl Default for StemPolicy {
    fn default() -> Self {
        Self::new(0.85, 0.95)
    }
}

/// Rails for links leaving each intermediate sub-group towards the sinks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntermediateStemPolicy {
    pub source: StemPolicy,
    pub sink: StemPolicy,
    pub inner: StemPolicy,
    pub unconnected: StemPolicy,
}

/// Half-width of tapered network links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaperPolicy {
    /// Repeat count mapped to `min`.
    pub repeat_low: f64,
    /// Repeat count mapped to `max`.
    pub repeat_high: f64,
    /// Start half-width at `repeat_low`, as a fraction of the intermediate node size.
    pub min: f64,
    /// Start half-width at `repeat_high`, as a fraction of the intermediate node size.
    pub max: f64,
    /// Half-width at the far end of every tapered link.
    pub end: f64,
}

impl Default for TaperPolicy {
    fn default() -> Self {
        Self {
            repeat_low: 1.0,
            repeat_high: 5.0,
            min: 0.1,
            max: 0.375,
            end: 0.025,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPolicy {
    /// Arc offset of return links, as a fraction of the chord length.
    pub return_arc_ratio: f64,
    /// Number of samples along a tapered arc outline.
    pub arc_segments: usize,
    pub taper: TaperPolicy,
    pub source_stem: StemPolicy,
    pub intermediate_stem: IntermediateStemPolicy,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            return_arc_ratio: 0.5,
            arc_segments: 50,
            taper: TaperPolicy::default(),
            source_stem: StemPolicy::new(0.075, 0.25),
            intermediate_stem: IntermediateStemPolicy::default(),
        }
    }
}

// ─── Tiers ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierPolicy {
    /// Level given to inner nodes before any rule applies.
    pub neutral: f64,
    /// Highest level; tiers are clamped to `[0, max]` and mapped onto
    /// `[inner_start, inner_end]` of the major axis. The tier rules step
    /// through [`TIER_STEPS`] equal steps of this range.
    pub max: f64,
}

/// Number of steps between level 0 and `TierPolicy::max`.
pub const TIER_STEPS: f64 = 5.0;

impl TierPolicy {
    /// Level `steps` steps up the grid, scaled so `TIER_STEPS` lands on `max`.
    pub fn step(&self, steps: f64) -> f64 {
        self.max * steps / TIER_STEPS
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            neutral: 2.5,
            max: 5.0,
        }
    }
}

// ─── Sequencing ──────────────────────────────────────────────────────────────

/// How outer sources are ordered along the minor axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceOrder {
    /// Every source by the mean x of its targets.
    ByTarget,
    /// Single-link sources by target x, multi-link sources (also by mean
    /// target x) spliced into the middle.
    CentreMultiLink,
    /// As `CentreMultiLink`, but the multi-link block is ranked by out-degree
    /// and mountain-sorted so the busiest source sits in the centre.
    CentreMultiLinkMountain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencePolicy {
    pub source_order: SourceOrder,
}

impl Default for SequencePolicy {
    fn default() -> Self {
        Self {
            source_order: SourceOrder::CentreMultiLink,
        }
    }
}

// ─── LayoutPolicy ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    pub extent: Extent,
    pub node: NodePolicy,
    pub cluster: ClusterPolicy,
    pub link: LinkPolicy,
    pub tier: TierPolicy,
    pub sequence: SequencePolicy,
}

impl LayoutPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON policy; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, crate::error::LayoutError> {
        let policy: Self = serde_json::from_str(text)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check that every field is usable by the layout formulas.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("extent.width", self.extent.width)?;
        positive("extent.height", self.extent.height)?;
        if self.extent.chart_width() <= 0.0 {
            return Err(ConfigError::MarginsExceedExtent { axis: "minor" });
        }
        if self.extent.chart_height() <= 0.0 {
            return Err(ConfigError::MarginsExceedExtent { axis: "major" });
        }

        non_negative("node.source.padding", self.node.source.padding)?;
        non_negative("node.sink.padding", self.node.sink.padding)?;
        non_negative("node.intermediate.padding", self.node.intermediate.padding)?;
        non_negative("node.intermediate.source_lift", self.node.intermediate.source_lift)?;
        positive("node.source.major_ratio", self.node.source.major_ratio)?;
        positive("node.sink.major_ratio", self.node.sink.major_ratio)?;
        ordered(
            "node.intermediate.radius",
            self.node.intermediate.radius_min,
            self.node.intermediate.radius_max,
        )?;

        let c = &self.cluster;
        for (field, value) in [
            ("cluster.source", c.source),
            ("cluster.intermediate_source", c.intermediate_source),
            ("cluster.inner_start", c.inner_start),
            ("cluster.inner_end", c.inner_end),
            ("cluster.unconnected", c.unconnected),
            ("cluster.intermediate_sink", c.intermediate_sink),
            ("cluster.sink", c.sink),
        ] {
            ratio(field, value)?;
        }
        ordered("cluster.inner", c.inner_start, c.inner_end)?;

        let l = &self.link;
        non_negative("link.return_arc_ratio", l.return_arc_ratio)?;
        if l.arc_segments == 0 {
            return Err(ConfigError::NonPositive {
                field: "link.arc_segments",
                value: 0.0,
            });
        }
        ordered("link.taper.repeat", l.taper.repeat_low, l.taper.repeat_high)?;
        non_negative("link.taper.min", l.taper.min)?;
        non_negative("link.taper.max", l.taper.max)?;
        non_negative("link.taper.end", l.taper.end)?;
        for (field, stem) in [
            ("link.source_stem", &l.source_stem),
            ("link.intermediate_stem.source", &l.intermediate_stem.source),
            ("link.intermediate_stem.sink", &l.intermediate_stem.sink),
            ("link.intermediate_stem.inner", &l.intermediate_stem.inner),
            (
                "link.intermediate_stem.unconnected",
                &l.intermediate_stem.unconnected,
            ),
        ] {
            ratio(field, stem.start)?;
            ratio(field, stem.end)?;
        }

        positive("tier.max", self.tier.max)?;
        if !(0.0..=self.tier.max).contains(&self.tier.neutral) {
            return Err(ConfigError::InvertedRange {
                field: "tier.neutral",
                start: self.tier.neutral,
                end: self.tier.max,
            });
        }
        Ok(())
    }
}

// ─── Validation helpers ──────────────────────────────────────────────────────

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { field, value })
    }
}

fn ordered(field: &'static str, start: f64, end: f64) -> Result<(), ConfigError> {
    if start.is_finite() && end.is_finite() && start <= end {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, start, end })
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
