//! SVG path data for link geometry.

use std::fmt::Write;

use crate::layout::types::{LinkPath, Point};

/// Serialize a geometry descriptor as the `d` attribute of an SVG path.
///
/// Tapered shapes become closed polygons; stemmed links become a stem, a
/// vertical cubic between the rails, and a second stem.
pub fn path_data(path: &LinkPath) -> String {
    let mut d = String::new();
    match path {
        LinkPath::TaperedLine { outline, .. } => polygon(&mut d, outline.iter()),
        LinkPath::TaperedArc { left, right, .. } => {
            polygon(&mut d, left.iter().chain(right.iter().rev()));
        }
        LinkPath::StemBezier {
            start,
            stem_start,
            stem_end,
            end,
        } => {
            let (c1, c2) = path.bezier_controls().unwrap_or((*stem_start, *stem_end));
            let _ = write!(
                d,
                "M{} L{} C{} {} {} L{}",
                pt(start),
                pt(stem_start),
                pt(&c1),
                pt(&c2),
                pt(stem_end),
                pt(end)
            );
        }
    }
    d
}

fn polygon<'a>(d: &mut String, mut points: impl Iterator<Item = &'a Point>) {
    if let Some(first) = points.next() {
        let _ = write!(d, "M{}", pt(first));
        for p in points {
            let _ = write!(d, " L{}", pt(p));
        }
        d.push_str(" Z");
    }
}

/// `x,y` rounded to two decimals, trailing zeros trimmed.
fn pt(p: &Point) -> String {
    format!("{},{}", num(p.x), num(p.y))
}

fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    // Avoid "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

#[cfg(test)]
#[path = "../tests/rust/test_svg.rs"]
mod tests;
