use serde::{Deserialize, Serialize};

use crate::geom::{PlanarPoint, Point};

use super::{sample_positions, splice_extremes};

/// Uniform cubic B-spline basis point at `index`, as a Bezier end point.
///
/// Uses `(p[i-2] + 4 p[i-1] + p[i]) / 6`, reusing the nearest available
/// sample where the neighbours run off the start. Index 0 is passed through,
/// since the path starts there. Out-of-range indices clamp to the last sample.
///
/// # Panics
///
/// Panics if `points` is empty.
pub fn b_spline_control_point<P: PlanarPoint>(points: &[P], index: usize) -> Point {
    let index = index.min(points.len() - 1);
    let at = |i: usize| Point::new(points[i].x(), points[i].y());
    if index == 0 {
        return at(0);
    }
    let p1 = index - 1;
    let p0 = index.saturating_sub(2);
    let (x0, y0) = (points[p0].x(), points[p0].y());
    let (x1, y1) = (points[p1].x(), points[p1].y());
    let (x, y) = (points[index].x(), points[index].y());
    Point::new((x0 + 4.0 * x1 + x) / 6.0, (y0 + 4.0 * y1 + y) / 6.0)
}

/// Options for [`b_spline`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BSplineConfig {
    /// Number of evenly spaced parameter samples.
    pub samples: usize,
    /// Spline degree, reduced to `len - 1` for short inputs.
    pub degree: usize,
    /// Splice the raw Y extremes into the output.
    pub include_extremes: bool,
}

impl Default for BSplineConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            degree: 3,
            include_extremes: false,
        }
    }
}

/// Densify along a clamped uniform B-spline with the samples as control points.
///
/// The curve starts at the first sample and ends at the last one; interior
/// samples pull the curve without it passing through them.
pub fn b_spline(points: &[Point], config: &BSplineConfig) -> Vec<Point> {
    if points.len() < 2 || config.samples < 2 {
        return points.to_vec();
    }
    let degree = config.degree.clamp(1, points.len() - 1);
    let knots = clamped_knots(points.len(), degree);
    let mut scratch = Vec::with_capacity(degree + 1);
    let mut out: Vec<Point> = sample_positions(0.0, 1.0, config.samples)
        .map(|u| de_boor(points, &knots, degree, u, &mut scratch))
        .collect();
    if config.include_extremes {
        splice_extremes(&mut out, points, true);
    }
    out
}

fn clamped_knots(count: usize, degree: usize) -> Vec<f64> {
    let interior = count - degree;
    let mut knots = Vec::with_capacity(count + degree + 1);
    knots.extend(std::iter::repeat_n(0.0, degree + 1));
    knots.extend((1..interior).map(|j| j as f64 / interior as f64));
    knots.extend(std::iter::repeat_n(1.0, degree + 1));
    knots
}

fn de_boor(
    points: &[Point],
    knots: &[f64],
    degree: usize,
    u: f64,
    scratch: &mut Vec<Point>,
) -> Point {
    let last = points.len() - 1;
    let span = if u >= 1.0 {
        last
    } else {
        (degree..=last)
            .rev()
            .find(|&k| knots[k] <= u)
            .unwrap_or(degree)
    };

    scratch.clear();
    scratch.extend_from_slice(&points[span - degree..=span]);
    for r in 1..=degree {
        for j in (r..=degree).rev() {
            let left = knots[j + span - degree];
            let right = knots[j + 1 + span - r];
            let denom = right - left;
            let alpha = if denom == 0.0 { 0.0 } else { (u - left) / denom };
            let (a, b) = (scratch[j - 1], scratch[j]);
            scratch[j] = Point::new(
                (1.0 - alpha) * a.x + alpha * b.x,
                (1.0 - alpha) * a.y + alpha * b.y,
            );
        }
    }
    scratch[degree]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_point_reuses_boundary_neighbours() {
        let points = [Point::new(0.0, 0.0), Point::new(6.0, 6.0), Point::new(12.0, 0.0)];
        assert_eq!(b_spline_control_point(&points, 0), Point::new(0.0, 0.0));
        // i = 1: p0 = p1 = points[0]
        assert_eq!(b_spline_control_point(&points, 1), Point::new(1.0, 1.0));
        // i = 2: (0 + 24 + 12) / 6, (0 + 24 + 0) / 6
        assert_eq!(b_spline_control_point(&points, 2), Point::new(6.0, 4.0));
    }

    #[test]
    fn clamped_spline_hits_endpoints() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 3.0),
            Point::new(2.0, -1.0),
            Point::new(3.0, 2.0),
            Point::new(4.0, 0.5),
        ];
        let dense = b_spline(&points, &BSplineConfig::default());
        assert_eq!(dense.len(), 100);
        let first = dense[0];
        let last = dense[dense.len() - 1];
        assert!((first.x - 0.0).abs() < 1e-12 && (first.y - 0.0).abs() < 1e-12);
        assert!((last.x - 4.0).abs() < 1e-12 && (last.y - 0.5).abs() < 1e-12);
        assert!(dense.windows(2).all(|pair| pair[0].x <= pair[1].x + 1e-12));
    }

    #[test]
    fn degree_one_is_the_polyline() {
        let points = [Point::new(0.0, 0.0), Point::new(2.0, 4.0)];
        let dense = b_spline(
            &points,
            &BSplineConfig {
                samples: 3,
                ..BSplineConfig::default()
            },
        );
        assert_eq!(dense[1], Point::new(1.0, 2.0));
    }

    #[test]
    fn knot_vector_is_clamped() {
        assert_eq!(
            clamped_knots(5, 3),
            vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0]
        );
    }
}
