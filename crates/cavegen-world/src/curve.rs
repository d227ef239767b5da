//! Piecewise-linear spread curve.

use serde::{Deserialize, Serialize};

/// A curve mapping radial distance from the map centre to the probability
/// that a freshly seeded cell is solid.
///
/// Keys are `(time, value)` pairs kept sorted by time. Between keys the curve
/// interpolates linearly; before the first and after the last key it holds
/// the end value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveKeys")]
pub struct SpreadCurve {
    keys: Vec<(f32, f32)>,
}

/// Serialized form of a [`SpreadCurve`], checked and sorted on load.
#[derive(Deserialize)]
struct CurveKeys {
    keys: Vec<(f32, f32)>,
}

impl TryFrom<CurveKeys> for SpreadCurve {
    type Error = String;

    fn try_from(raw: CurveKeys) -> Result<Self, Self::Error> {
        if let Some(&(t, _)) = raw.keys.iter().find(|(t, _)| !t.is_finite()) {
            return Err(format!("spread curve key time must be finite, got {t}"));
        }
        Ok(Self::new(raw.keys))
    }
}

impl SpreadCurve {
    /// Creates a curve from keys in any order.
    #[must_use]
    pub fn new(mut keys: Vec<(f32, f32)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    /// A curve with the same value everywhere.
    #[must_use]
    pub fn flat(value: f32) -> Self {
        Self {
            keys: vec![(0.0, value)],
        }
    }

    /// Returns the keys sorted by time.
    #[must_use]
    pub fn keys(&self) -> &[(f32, f32)] {
        &self.keys
    }

    /// Evaluates the curve at `t`. An empty curve is 0 everywhere.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(&(t0, v0)), Some(&(tn, vn))) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t <= t0 {
            return v0;
        }
        if t >= tn {
            return vn;
        }
        // t0 < t < tn, so some window brackets t.
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.0 {
                let span = b.0 - a.0;
                if span <= f32::EPSILON {
                    return b.1;
                }
                return a.1 + (b.1 - a.1) * (t - a.0) / span;
            }
        }
        vn
    }
}

impl Default for SpreadCurve {
    /// Denser towards the rim, so the map border tends to close up.
    fn default() -> Self {
        Self::new(vec![(0.0, 0.4), (0.75, 0.45), (1.06, 0.8)])
    }
}
