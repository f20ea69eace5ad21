//! Continuous scales mapping a numeric domain onto a range.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map `value`. A zero-width domain maps everything to the range midpoint.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) * 0.5;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }
}

/// Linear scale applied to the square roots of domain and value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((root(domain.0), root(domain.1)), range),
        }
    }

    /// Domain spanning the smallest and largest of `values`; `(0, 0)` when empty.
    pub fn from_values(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let (lo, hi) = extent(values).unwrap_or((0.0, 0.0));
        Self::new((lo, hi), range)
    }

    pub fn apply(&self, value: f64) -> f64 {
        self.inner.apply(root(value))
    }
}

fn root(value: f64) -> f64 {
    value.max(0.0).sqrt()
}

/// Smallest and largest value, or `None` for an empty input.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + (b - a) * t
}

/// Arithmetic mean, or `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Round half up: 2.5 → 3, -2.5 → -2.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
#[path = "../../tests/rust/test_scale.rs"]
mod tests;
