//! Closed uniform Catmull-Rom curve through a loop of knots.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Closed curve passing through every knot, wrapping from the last knot back
/// to the first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClosedCurve {
    knots: Vec<Vec3>,
}

impl ClosedCurve {
    pub fn new(knots: Vec<Vec3>) -> Self {
        Self { knots }
    }

    pub fn knots(&self) -> &[Vec3] {
        &self.knots
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Evaluate at `t` in [0, 1); values outside wrap around the loop.
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let n = self.knots.len();
        if n == 0 {
            return Vec3::ZERO;
        }
        let s = t.rem_euclid(1.0) * n as f32;
        let segment = (s.floor() as usize).min(n - 1);
        self.segment_point(segment, s - segment as f32)
    }

    /// Sample `resolution` points at `t = i / resolution`.
    ///
    /// The parameter is split into segment and fraction with integer
    /// arithmetic, so whenever `i / resolution` lands on a knot the sample is
    /// that knot bit-for-bit.
    pub fn sample(&self, resolution: usize) -> Vec<Vec3> {
        let n = self.knots.len();
        if n == 0 || resolution == 0 {
            return Vec::new();
        }
        (0..resolution)
            .map(|i| {
                let scaled = i * n;
                let segment = scaled / resolution;
                let frac = (scaled % resolution) as f32 / resolution as f32;
                self.segment_point(segment, frac)
            })
            .collect()
    }

    fn segment_point(&self, segment: usize, u: f32) -> Vec3 {
        let n = self.knots.len();
        let p0 = self.knots[(segment + n - 1) % n];
        let p1 = self.knots[segment % n];
        let p2 = self.knots[(segment + 1) % n];
        let p3 = self.knots[(segment + 2) % n];
        if u == 0.0 {
            return p1;
        }

        let u2 = u * u;
        let u3 = u2 * u;
        0.5 * ((2.0 * p1)
            + (p2 - p0) * u
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
    }
}
