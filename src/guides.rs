//! Vertical guide marks at fixed horizontal fractions of the chart.
//!
//! Each guide reports the height of the rendered curve at its X so the host
//! can draw a rule from the curve to the bottom edge. Labelled guides also
//! report the X value of the nearest sample.

use serde::{Deserialize, Serialize};

use crate::dataset::SmoothingStrategy;
use crate::geom::{NormalizedPoint, Point, ScreenSize};
use crate::gesture::find_nearest;
use crate::interpolation::b_spline_control_point;

/// One configured guide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// Horizontal position as a fraction of the width.
    pub fraction: f64,
    /// Report the X value under this guide.
    #[serde(default)]
    pub labelled: bool,
}

impl Guide {
    /// Create a guide.
    pub const fn new(fraction: f64, labelled: bool) -> Self {
        Self { fraction, labelled }
    }
}

/// Guide placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Guides from left to right.
    pub guides: Vec<Guide>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            guides: vec![
                Guide::new(0.0948, true),
                Guide::new(0.2974, false),
                Guide::new(0.5, true),
                Guide::new(0.7025, false),
                Guide::new(0.9051, false),
            ],
        }
    }
}

/// A guide resolved against the current curve, in device space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideMark {
    /// Guide X.
    pub x: f64,
    /// Curve height at `x`.
    pub y: f64,
    /// Original X of the nearest sample, for labelled guides.
    pub label_x: Option<f64>,
}

fn curve_point(points: &[NormalizedPoint], strategy: SmoothingStrategy, index: usize) -> Point {
    if strategy.is_bezier() {
        b_spline_control_point(points, index)
    } else {
        points[index].position()
    }
}

/// Normalized curve height at `x_fraction`.
///
/// Interpolates linearly between the curve points around `x_fraction`, using
/// the Bezier end points for the bezier strategy. Queries outside the curve
/// report the height of the nearest end.
pub fn curve_y_at(
    points: &[NormalizedPoint],
    strategy: SmoothingStrategy,
    x_fraction: f64,
) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let index = (0..points.len())
        .find(|&i| curve_point(points, strategy, i).x > x_fraction)
        .unwrap_or(points.len() - 1);
    let end = curve_point(points, strategy, index);
    if index == 0 {
        return Some(end.y);
    }
    let start = curve_point(points, strategy, index - 1);
    let dx = end.x - start.x;
    if dx == 0.0 {
        return Some(end.y);
    }
    let t = ((x_fraction - start.x) / dx).clamp(0.0, 1.0);
    Some(start.y + (end.y - start.y) * t)
}

/// Resolve every configured guide.
///
/// `rendered` is the curve being drawn; labels come from `lookup`. Nothing is
/// returned for an empty curve.
pub fn guide_marks(
    rendered: &[NormalizedPoint],
    lookup: &[NormalizedPoint],
    strategy: SmoothingStrategy,
    size: ScreenSize,
    config: &GuideConfig,
) -> Vec<GuideMark> {
    let lookup = if lookup.is_empty() { rendered } else { lookup };
    config
        .guides
        .iter()
        .filter_map(|guide| {
            let y = curve_y_at(rendered, strategy, guide.fraction)?;
            let label_x = if guide.labelled {
                find_nearest(guide.fraction, lookup).map(|index| lookup[index].original_x)
            } else {
                None
            };
            Some(GuideMark {
                x: guide.fraction * size.width,
                y: y * size.height,
                label_x,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn ramp() -> Vec<NormalizedPoint> {
        let points: Vec<_> = (0..=4).map(|i| Point::new(i as f64 * 10.0, i as f64)).collect();
        normalize(&points, None).points
    }

    #[test]
    fn interpolates_between_points() {
        let points = ramp();
        let y = curve_y_at(&points, SmoothingStrategy::None, 0.375).expect("non-empty");
        assert!((y - 0.625).abs() < 1e-12);
        assert_eq!(curve_y_at(&points, SmoothingStrategy::None, 2.0), Some(0.0));
        assert_eq!(curve_y_at(&[], SmoothingStrategy::None, 0.5), None);
    }

    #[test]
    fn bezier_reads_from_control_points() {
        let peak: Vec<_> = [0.0, 0.0, 10.0, 0.0, 0.0]
            .iter()
            .enumerate()
            .map(|(i, &y)| Point::new(i as f64, y))
            .collect();
        let points = normalize(&peak, None).points;
        let straight = curve_y_at(&points, SmoothingStrategy::None, 0.5).expect("non-empty");
        let bezier = curve_y_at(&points, SmoothingStrategy::Bezier, 0.5).expect("non-empty");
        assert_eq!(straight, 0.0);
        // the spline never reaches the peak sample
        assert!(bezier > 0.2);
    }

    #[test]
    fn default_guides_label_first_and_middle() {
        let points = ramp();
        let marks = guide_marks(
            &points,
            &points,
            SmoothingStrategy::None,
            ScreenSize::new(1000.0, 100.0),
            &GuideConfig::default(),
        );
        assert_eq!(marks.len(), 5);
        assert!((marks[0].x - 94.8).abs() < 1e-9);
        assert_eq!(marks[0].label_x, Some(0.0));
        assert_eq!(marks[1].label_x, None);
        assert_eq!(marks[2].label_x, Some(20.0));
        assert!((marks[2].y - 50.0).abs() < 1e-9);
        assert!(marks.iter().skip(3).all(|mark| mark.label_x.is_none()));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: GuideConfig =
            serde_json::from_str(r#"{"guides": [{"fraction": 0.25}]}"#).expect("valid json");
        assert_eq!(config.guides, vec![Guide::new(0.25, false)]);
        let config: GuideConfig = serde_json::from_str("{}").expect("valid json");
        assert_eq!(config, GuideConfig::default());
    }
}
