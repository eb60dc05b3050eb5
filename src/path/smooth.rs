//! Control point placement for smoothed paths.

use crate::dataset::SmoothingStrategy;
use crate::geom::ScreenPoint;
use crate::interpolation::b_spline_control_point;

use super::{Path, PathCommand};

/// Emit a moveto followed by one curveto per remaining point.
pub(super) fn smooth_path(
    points: &[ScreenPoint],
    strategy: SmoothingStrategy,
    factor: f64,
) -> Path {
    let mut path = Path::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.push(PathCommand::MoveTo(first));
    for index in 1..points.len() {
        let command = if strategy.is_bezier() {
            b_spline_segment(points, index)
        } else {
            let previous = points[index - 1];
            let current = points[index];
            PathCommand::CurveTo {
                control_a: control_point(
                    previous,
                    index.checked_sub(2).map(|i| points[i]),
                    Some(current),
                    Side::Leading,
                    factor,
                    strategy,
                ),
                control_b: control_point(
                    current,
                    Some(previous),
                    points.get(index + 1).copied(),
                    Side::Trailing,
                    factor,
                    strategy,
                ),
                to: current,
            }
        };
        path.push(command);
    }
    path
}

/// Bezier form of the uniform B-spline span ending at `index`.
fn b_spline_segment(points: &[ScreenPoint], index: usize) -> PathCommand {
    let p0 = points[index.saturating_sub(2)];
    let p1 = points[index - 1];
    let to = b_spline_control_point(points, index);
    PathCommand::CurveTo {
        control_a: ScreenPoint::new((2.0 * p0.x + p1.x) / 3.0, (2.0 * p0.y + p1.y) / 3.0),
        control_b: ScreenPoint::new((p0.x + 2.0 * p1.x) / 3.0, (p0.y + 2.0 * p1.y) / 3.0),
        to: to.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// Control point leaving `current` towards the next point.
    Leading,
    /// Control point arriving at `current` from the previous point.
    Trailing,
}

/// Control point for `current`, along the chord between its neighbours.
///
/// Missing neighbours fall back to `current`. The arm is the neighbour
/// chord scaled by `factor`. For [`SmoothingStrategy::Complex`] the arm is
/// flattened at local extrema and never reaches past the adjacent point
/// horizontally.
fn control_point(
    current: ScreenPoint,
    previous: Option<ScreenPoint>,
    next: Option<ScreenPoint>,
    side: Side,
    factor: f64,
    strategy: SmoothingStrategy,
) -> ScreenPoint {
    let previous = previous.unwrap_or(current);
    let next = next.unwrap_or(current);
    let mut arm_x = (next.x - previous.x) * factor;
    let mut arm_y = (next.y - previous.y) * factor;

    if strategy == SmoothingStrategy::Complex {
        let is_extremum = (current.y - previous.y) * (current.y - next.y) >= 0.0;
        if is_extremum {
            arm_y = 0.0;
        }
        let reach = match side {
            Side::Leading => (next.x - current.x).abs(),
            Side::Trailing => (current.x - previous.x).abs(),
        };
        if arm_x.abs() > reach && arm_x != 0.0 {
            let scale = reach / arm_x.abs();
            arm_x *= scale;
            arm_y *= scale;
        }
    }

    match side {
        Side::Leading => ScreenPoint::new(current.x + arm_x, current.y + arm_y),
        Side::Trailing => ScreenPoint::new(current.x - arm_x, current.y - arm_y),
    }
}
