//! Douglas–Peucker line simplification.
//!
//! Keeps the first and last samples, then recursively keeps the sample that
//! lies farthest from the segment between the retained ends while that
//! distance exceeds the tolerance. Re-simplifying a result with the same
//! tolerance returns it unchanged.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geom::{PlanarPoint, Point};
use crate::normalize::find_y_extremes;

/// Options for [`simplify_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimplifyConfig {
    /// Maximum distance a dropped sample may lie from the simplified line.
    pub tolerance: f64,
    /// Always keep the samples with the smallest and greatest Y.
    pub include_extremes: bool,
}

/// Simplify with the given tolerance.
pub fn simplify<P: PlanarPoint>(points: &[P], tolerance: f64) -> Vec<P> {
    simplify_with(
        points,
        &SimplifyConfig {
            tolerance,
            ..SimplifyConfig::default()
        },
    )
}

/// Simplify with full options.
///
/// Short inputs and negative or non-finite tolerances return the input.
pub fn simplify_with<P: PlanarPoint>(points: &[P], config: &SimplifyConfig) -> Vec<P> {
    let tolerance = config.tolerance;
    if points.len() < 3 || !tolerance.is_finite() || tolerance < 0.0 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0, points.len() - 1)];
    while let Some((first, last)) = stack.pop() {
        let mut farthest = None;
        let mut max_distance = tolerance;
        for index in first + 1..last {
            let distance = segment_distance(points[index], points[first], points[last]);
            if distance > max_distance {
                max_distance = distance;
                farthest = Some(index);
            }
        }
        if let Some(index) = farthest {
            keep[index] = true;
            stack.push((first, index));
            stack.push((index, last));
        }
    }

    if config.include_extremes {
        let raw: Vec<Point> = points.iter().map(|p| Point::new(p.x(), p.y())).collect();
        if let Some((smallest, greatest)) = find_y_extremes(&raw) {
            for (index, point) in raw.iter().enumerate() {
                if *point == smallest || *point == greatest {
                    keep[index] = true;
                }
            }
        }
    }

    let out: Vec<P> = points
        .iter()
        .zip(&keep)
        .filter_map(|(point, keep)| keep.then_some(*point))
        .collect();
    trace!(input = points.len(), output = out.len(), tolerance, "simplified");
    out
}

/// Distance from `point` to the segment `start..end`.
fn segment_distance<P: PlanarPoint>(point: P, start: P, end: P) -> f64 {
    let (mut x, mut y) = (start.x(), start.y());
    let dx = end.x() - x;
    let dy = end.y() - y;
    if dx != 0.0 || dy != 0.0 {
        let t = ((point.x() - x) * dx + (point.y() - y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            x = end.x();
            y = end.y();
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }
    ((point.x() - x).powi(2) + (point.y() - y).powi(2)).sqrt()
}
