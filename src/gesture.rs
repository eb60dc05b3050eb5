//! Pointer position to data point resolution.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dataset::SmoothingStrategy;
use crate::geom::{NormalizedPoint, PlanarPoint, ScreenPoint, ScreenSize};
use crate::interpolation::b_spline_control_point;

/// Bezier curves longer than this use the straight tail for the marker.
pub const BEZIER_TAIL_THRESHOLD: usize = 30;

/// Compress positions near either edge outward.
///
/// Within `margin` of the left edge the position moves three times as fast
/// towards 0; within `margin` of the right edge it moves twice as fast towards
/// `width`. Both are clamped to `[0, width]`, so edge points stay reachable
/// without touching the edge itself.
pub fn position_with_margin(x: f64, margin: f64, width: f64) -> f64 {
    if x < margin {
        (3.0 * x - 2.0 * margin).max(0.0)
    } else if width - x < margin {
        (margin + 2.0 * x - width).min(width)
    } else {
        x
    }
}

/// Index of the point nearest to `position` along X.
///
/// Finds the first point at or past `position` and keeps it only when
/// `position` is strictly past the midpoint with its predecessor, so ties go
/// to the predecessor. Positions past every point resolve to the last one.
/// When the resolved point and its successor share an X (a vertical step),
/// the successor wins.
pub fn find_nearest<P: PlanarPoint>(position: f64, points: &[P]) -> Option<usize> {
    if points.is_empty() {
        warn!(position, "no points to resolve gesture against");
        return None;
    }
    let last = points.len() - 1;
    let index = match points.iter().position(|point| point.x() >= position) {
        Some(0) => 0,
        Some(i) => {
            let midpoint = (points[i - 1].x() + points[i].x()) / 2.0;
            if position > midpoint { i } else { i - 1 }
        }
        None => last,
    };
    match points.get(index + 1) {
        Some(next) if next.x() == points[index].x() => Some(index + 1),
        _ => Some(index),
    }
}

/// Data point resolved from a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestPoint {
    /// Index into the searched sequence.
    pub index: usize,
    /// X of the source sample.
    pub original_x: f64,
    /// Y of the source sample.
    pub original_y: f64,
    /// Normalized X, for marker placement.
    pub normalized_x: f64,
    /// Normalized Y, for marker placement.
    pub normalized_y: f64,
}

impl NearestPoint {
    fn at(points: &[NormalizedPoint], index: usize) -> Self {
        let point = points[index];
        Self {
            index,
            original_x: point.original_x,
            original_y: point.original_y,
            normalized_x: point.x,
            normalized_y: point.y,
        }
    }
}

/// Resolve a device-space pointer X to the nearest point.
pub fn resolve_nearest(
    position_px: f64,
    points: &[NormalizedPoint],
    margin: f64,
    width: f64,
) -> Option<NearestPoint> {
    let position = normalized_position(position_px, margin, width);
    find_nearest(position, points).map(|index| NearestPoint::at(points, index))
}

fn normalized_position(position_px: f64, margin: f64, width: f64) -> f64 {
    if width > 0.0 {
        position_with_margin(position_px, margin, width) / width
    } else {
        0.0
    }
}

/// Readout for one pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureReading {
    /// Nearest data point.
    pub nearest: NearestPoint,
    /// Where to draw the marker, in device space.
    pub marker: ScreenPoint,
}

/// Maps pointer positions for one chart surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureMapper {
    /// Edge distance within which positions are compressed.
    pub margin: f64,
    /// Surface size.
    pub size: ScreenSize,
    /// Strategy of the rendered curve.
    pub strategy: SmoothingStrategy,
}

impl GestureMapper {
    /// Create a mapper.
    pub fn new(margin: f64, size: ScreenSize, strategy: SmoothingStrategy) -> Self {
        Self {
            margin,
            size,
            strategy,
        }
    }

    /// Resolve a pointer X against the rendered curve and the lookup samples.
    ///
    /// `rendered` is what the path was built from; `lookup` holds the samples
    /// reported back to the caller. Pass `rendered` twice when they are the
    /// same.
    pub fn resolve(
        &self,
        position_px: f64,
        rendered: &[NormalizedPoint],
        lookup: &[NormalizedPoint],
    ) -> Option<GestureReading> {
        let position = normalized_position(position_px, self.margin, self.size.width);
        let lookup = if lookup.is_empty() { rendered } else { lookup };
        let index = find_nearest(position, lookup)?;
        let nearest = NearestPoint::at(lookup, index);

        let marker_y = self
            .tail_y(position, rendered)
            .or_else(|| self.head_y(position, rendered))
            .unwrap_or(nearest.normalized_y);

        Some(GestureReading {
            nearest,
            marker: ScreenPoint::new(
                nearest.normalized_x * self.size.width,
                marker_y * self.size.height,
            ),
        })
    }

    /// Straight interpolation across the last rendered segment of a long
    /// bezier curve, whose smoothed tail stops short of the final sample.
    fn tail_y(&self, position: f64, rendered: &[NormalizedPoint]) -> Option<f64> {
        if !self.strategy.is_bezier() || rendered.len() <= BEZIER_TAIL_THRESHOLD {
            return None;
        }
        let [.., before, last] = rendered else {
            return None;
        };
        if position < before.x {
            return None;
        }
        let dx = last.x - before.x;
        let t = if dx == 0.0 { 1.0 } else { (position - before.x) / dx };
        Some(before.y + t * (last.y - before.y))
    }

    /// Y of the curve start when the query lies before it.
    fn head_y(&self, position: f64, rendered: &[NormalizedPoint]) -> Option<f64> {
        if rendered.is_empty() {
            return None;
        }
        let head = if self.strategy.is_bezier() {
            b_spline_control_point(rendered, 0)
        } else {
            rendered[0].position()
        };
        (head.x > position).then_some(head.y)
    }
}
