//! Interpolation strategies that turn sparse samples into drawable sequences.
//!
//! Every strategy is a pure function over an ordered slice:
//!
//! - [`monotone_cubic`] densifies along a Fritsch–Carlson Hermite spline that
//!   never overshoots between neighbouring samples.
//! - [`b_spline_control_point`] converts a uniform cubic B-spline basis point
//!   into the Bezier end point used while drawing.
//! - [`b_spline`] densifies along a clamped uniform B-spline.
//! - [`step`] produces a staircase.

mod bspline;
mod monotone;
mod step;

pub use bspline::{BSplineConfig, b_spline, b_spline_control_point};
pub use monotone::{MonotoneCubic, MonotoneCubicConfig, monotone_cubic};
pub use step::step;

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::normalize::find_y_extremes;

/// Strategy selector for [`interpolate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Interpolation {
    /// Monotone cubic Hermite densification.
    MonotoneCubic(MonotoneCubicConfig),
    /// Per-index uniform B-spline to Bezier conversion.
    UniformBSpline,
    /// Clamped B-spline densification.
    BSpline(BSplineConfig),
    /// Staircase with horizontal runs and vertical jumps.
    Step,
}

/// Apply an interpolation strategy.
pub fn interpolate(points: &[Point], interpolation: &Interpolation) -> Vec<Point> {
    match interpolation {
        Interpolation::MonotoneCubic(config) => monotone_cubic(points, config),
        Interpolation::UniformBSpline => (0..points.len())
            .map(|index| b_spline_control_point(points, index))
            .collect(),
        Interpolation::BSpline(config) => b_spline(points, config),
        Interpolation::Step => step(points),
    }
}

/// Evenly spaced sample positions covering `[start, end]`.
pub(crate) fn sample_positions(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| if i + 1 == count { end } else { start + step * i as f64 })
}

/// Splice the raw Y extremes into a densified sequence.
///
/// Each extreme lands at its X order. A sample at exactly the same X is
/// replaced. With `remove_surrounding`, the sampled neighbours on both sides
/// are dropped so the curve runs straight into the extreme; the first and
/// last samples are always kept.
pub(crate) fn splice_extremes(out: &mut Vec<Point>, raw: &[Point], remove_surrounding: bool) {
    let Some((smallest, greatest)) = find_y_extremes(raw) else {
        return;
    };
    let mut extremes = vec![smallest];
    if greatest != smallest {
        extremes.push(greatest);
    }

    for extreme in &extremes {
        let at = out.partition_point(|point| point.x < extreme.x);
        if out.get(at).is_some_and(|point| point.x == extreme.x) {
            out[at] = *extreme;
        } else {
            out.insert(at, *extreme);
        }
        if !remove_surrounding {
            continue;
        }
        let removable = |out: &[Point], index: usize| {
            index > 0 && index + 1 < out.len() && !extremes.contains(&out[index])
        };
        if removable(&out[..], at + 1) {
            out.remove(at + 1);
        }
        if at > 0 && removable(&out[..], at - 1) {
            out.remove(at - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_positions_hit_both_ends() {
        let positions: Vec<_> = sample_positions(0.0, 1.0, 5).collect();
        assert_eq!(positions, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(sample_positions(2.0, 3.0, 1).collect::<Vec<_>>(), vec![3.0]);
    }

    #[test]
    fn splice_inserts_extremes_in_order() {
        let raw = [Point::new(0.0, 0.0), Point::new(0.3, 9.0), Point::new(1.0, 1.0)];
        let mut out = vec![
            Point::new(0.0, 0.0),
            Point::new(0.25, 7.0),
            Point::new(0.5, 6.0),
            Point::new(0.75, 3.0),
            Point::new(1.0, 1.0),
        ];
        splice_extremes(&mut out, &raw, false);
        assert_eq!(out.len(), 6);
        assert_eq!(out[2], Point::new(0.3, 9.0));

        let mut trimmed = out.clone();
        trimmed.remove(2);
        splice_extremes(&mut trimmed, &raw, true);
        assert!(trimmed.contains(&Point::new(0.3, 9.0)));
        assert!(!trimmed.contains(&Point::new(0.25, 7.0)));
        assert!(!trimmed.contains(&Point::new(0.5, 6.0)));
        assert_eq!(trimmed.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(trimmed.last(), Some(&Point::new(1.0, 1.0)));
    }

    #[test]
    fn dispatch_uniform_b_spline_keeps_first_point() {
        let points = [Point::new(0.0, 0.0), Point::new(6.0, 6.0), Point::new(12.0, 0.0)];
        let converted = interpolate(&points, &Interpolation::UniformBSpline);
        assert_eq!(converted.len(), 3);
        assert_eq!(converted[0], points[0]);
    }

    #[test]
    fn dispatch_step() {
        let points = [Point::new(0.0, 1.0), Point::new(1.0, 2.0)];
        assert_eq!(interpolate(&points, &Interpolation::Step).len(), 3);
    }
}
