use serde::{Deserialize, Serialize};

use crate::geom::Point;

use super::{sample_positions, splice_extremes};

/// Options for [`monotone_cubic`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonotoneCubicConfig {
    /// Number of evenly spaced output samples.
    pub samples: usize,
    /// Splice the raw Y extremes into the output.
    pub include_extremes: bool,
    /// Drop the sampled neighbours of each spliced extreme.
    pub remove_points_surrounding_extremes: bool,
}

impl Default for MonotoneCubicConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            include_extremes: false,
            remove_points_surrounding_extremes: true,
        }
    }
}

/// Fritsch–Carlson monotone cubic Hermite spline.
///
/// Between two knots the curve stays within their Y values, so a densified
/// chart never shows peaks or dips that are not in the data.
#[derive(Debug, Clone)]
pub struct MonotoneCubic {
    xs: Vec<f64>,
    ys: Vec<f64>,
    tangents: Vec<f64>,
}

impl MonotoneCubic {
    /// Fit the spline. Needs at least two knots.
    pub fn new(points: &[Point]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let xs: Vec<f64> = points.iter().map(|point| point.x).collect();
        let ys: Vec<f64> = points.iter().map(|point| point.y).collect();
        let n = xs.len();

        let secants: Vec<f64> = (0..n - 1)
            .map(|k| {
                let h = xs[k + 1] - xs[k];
                if h == 0.0 { 0.0 } else { (ys[k + 1] - ys[k]) / h }
            })
            .collect();

        let mut tangents = vec![0.0; n];
        tangents[0] = secants[0];
        tangents[n - 1] = secants[n - 2];
        for k in 1..n - 1 {
            let (before, after) = (secants[k - 1], secants[k]);
            tangents[k] = if before * after <= 0.0 {
                0.0
            } else {
                (before + after) * 0.5
            };
        }

        for (k, &secant) in secants.iter().enumerate() {
            if secant == 0.0 {
                tangents[k] = 0.0;
                tangents[k + 1] = 0.0;
                continue;
            }
            let alpha = tangents[k] / secant;
            let beta = tangents[k + 1] / secant;
            let magnitude = alpha * alpha + beta * beta;
            if magnitude > 9.0 {
                let tau = 3.0 / magnitude.sqrt();
                tangents[k] = tau * alpha * secant;
                tangents[k + 1] = tau * beta * secant;
            }
        }

        Some(Self { xs, ys, tangents })
    }

    /// Evaluate at `x`, clamping to the knot range.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let k = self
            .xs
            .partition_point(|&knot| knot <= x)
            .saturating_sub(1)
            .min(n - 2);
        let (x0, x1) = (self.xs[k], self.xs[k + 1]);
        let h = x1 - x0;
        if h == 0.0 {
            return self.ys[k + 1];
        }
        let t = ((x - x0) / h).clamp(0.0, 1.0);
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        h00 * self.ys[k]
            + h10 * h * self.tangents[k]
            + h01 * self.ys[k + 1]
            + h11 * h * self.tangents[k + 1]
    }

    /// Tangents after limiting, one per knot.
    pub fn tangents(&self) -> &[f64] {
        &self.tangents
    }
}

/// Densify samples along a monotone cubic spline.
///
/// Inputs with fewer than two samples, or a sample count below two, are
/// returned unchanged.
pub fn monotone_cubic(points: &[Point], config: &MonotoneCubicConfig) -> Vec<Point> {
    let (Some(spline), true) = (MonotoneCubic::new(points), config.samples >= 2) else {
        return points.to_vec();
    };
    let (start, end) = (points[0].x, points[points.len() - 1].x);
    let mut out: Vec<Point> = sample_positions(start, end, config.samples)
        .map(|x| Point::new(x, spline.evaluate(x)))
        .collect();
    if config.include_extremes {
        splice_extremes(&mut out, points, config.remove_points_surrounding_extremes);
    }
    out
}
