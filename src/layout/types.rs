//! Layout output types: Point, Size, LinkPath, LinkDirection.

use serde::Serialize;

// ─── Point / Size ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

// ─── LinkPath ────────────────────────────────────────────────────────────────

/// Geometry descriptor of one link. Renderers turn it into a path string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LinkPath {
    /// Straight link drawn as a quadrilateral narrowing from `from` to `to`.
    ///
    /// `outline` runs start-left, end-left, end-right, start-right.
    TaperedLine {
        from: Point,
        to: Point,
        start_half_width: f64,
        end_half_width: f64,
        outline: [Point; 4],
    },
    /// Quadratic curve bowed away from the chord, with tapered outlines.
    TaperedArc {
        from: Point,
        to: Point,
        control: Point,
        start_half_width: f64,
        end_half_width: f64,
        left: Vec<Point>,
        right: Vec<Point>,
    },
    /// Stem from the node to a rail, vertical cubic between the rails, stem
    /// into the target.
    StemBezier {
        start: Point,
        stem_start: Point,
        stem_end: Point,
        end: Point,
    },
}

impl LinkPath {
    /// Half-width at parameter `t` along a tapered link; `None` for stems.
    pub fn half_width_at(&self, t: f64) -> Option<f64> {
        match self {
            LinkPath::TaperedLine {
                start_half_width,
                end_half_width,
                ..
            }
            | LinkPath::TaperedArc {
                start_half_width,
                end_half_width,
                ..
            } => {
                let t = t.clamp(0.0, 1.0);
                Some(start_half_width + (end_half_width - start_half_width) * t)
            }
            LinkPath::StemBezier { .. } => None,
        }
    }

    /// Both control points of the vertical cubic between the stem rails.
    pub fn bezier_controls(&self) -> Option<(Point, Point)> {
        match self {
            LinkPath::StemBezier {
                stem_start,
                stem_end,
                ..
            } => {
                let ym = (stem_start.y + stem_end.y) * 0.5;
                Some((Point::new(stem_start.x, ym), Point::new(stem_end.x, ym)))
            }
            _ => None,
        }
    }

    /// Every point the descriptor carries.
    pub fn points(&self) -> Vec<Point> {
        match self {
            LinkPath::TaperedLine { outline, .. } => outline.to_vec(),
            LinkPath::TaperedArc { left, right, .. } => {
                left.iter().chain(right.iter()).copied().collect()
            }
            LinkPath::StemBezier {
                start,
                stem_start,
                stem_end,
                end,
            } => vec![*start, *stem_start, *stem_end, *end],
        }
    }
}

// ─── Direction ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    Forward,
    Backward,
    Neutral,
}

impl Heading {
    /// Equal coordinates are neutral; increasing coordinates are forward.
    pub fn between(from: f64, to: f64) -> Self {
        if from == to {
            Heading::Neutral
        } else if from < to {
            Heading::Forward
        } else {
            Heading::Backward
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkDirection {
    /// Along the flow (y).
    pub major: Heading,
    /// Across the flow (x).
    pub minor: Heading,
}

impl LinkDirection {
    pub fn between(from: &Point, to: &Point) -> Self {
        Self {
            major: Heading::between(from.y, to.y),
            minor: Heading::between(from.x, to.x),
        }
    }
}
