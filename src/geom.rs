//! Geometric primitives used by the chart pipeline.
//!
//! [`Point`] is a raw sample in caller units, [`NormalizedPoint`] lives in the
//! unit square with its source values attached, and [`ScreenPoint`] is a
//! device-space coordinate ready for path serialization.

use serde::{Deserialize, Serialize};

/// A raw sample in data space.
///
/// Samples are expected in ascending X order; the engine never sorts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X value in data coordinates.
    pub x: f64,
    /// Y value in data coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new data point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in the unit square, carrying the sample it was derived from.
///
/// `x = 0` is the first sample and `x = 1` the last. `y` grows downward, so
/// the greatest sample maps to the smallest `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Normalized X in `[0, 1]`.
    pub x: f64,
    /// Normalized, inverted Y in `[0, 1]`.
    pub y: f64,
    /// X of the source sample.
    pub original_x: f64,
    /// Y of the source sample.
    pub original_y: f64,
}

impl NormalizedPoint {
    /// Create a normalized point from its unit coordinates and source sample.
    pub const fn new(x: f64, y: f64, original: Point) -> Self {
        Self {
            x,
            y,
            original_x: original.x,
            original_y: original.y,
        }
    }

    /// Unit-space position without the source values.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The source sample.
    pub fn original(&self) -> Point {
        Point::new(self.original_x, self.original_y)
    }

    /// Scale the unit position into device space.
    pub fn to_screen(&self, size: ScreenSize) -> ScreenPoint {
        ScreenPoint::new(self.x * size.width, self.y * size.height)
    }
}

/// A point in device space (pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// X in device units.
    pub x: f64,
    /// Y in device units.
    pub y: f64,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Device dimensions of the drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    /// Width in device units.
    pub width: f64,
    /// Height in device units.
    pub height: f64,
}

impl ScreenSize {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check whether the size has positive, finite area.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Read access to planar coordinates.
///
/// Lets the simplifier and nearest-point search work on raw, normalized, and
/// device points alike.
pub trait PlanarPoint: Copy {
    /// Horizontal coordinate.
    fn x(&self) -> f64;
    /// Vertical coordinate.
    fn y(&self) -> f64;
}

impl PlanarPoint for Point {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl PlanarPoint for NormalizedPoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl PlanarPoint for ScreenPoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl From<ScreenPoint> for Point {
    fn from(point: ScreenPoint) -> Self {
        Point::new(point.x, point.y)
    }
}

impl From<Point> for ScreenPoint {
    fn from(point: Point) -> Self {
        ScreenPoint::new(point.x, point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_point_scales_into_screen_space() {
        let point = NormalizedPoint::new(0.25, 0.5, Point::new(10.0, 3.0));
        let screen = point.to_screen(ScreenSize::new(200.0, 100.0));
        assert_eq!(screen, ScreenPoint::new(50.0, 50.0));
        assert_eq!(point.original(), Point::new(10.0, 3.0));
    }

    #[test]
    fn size_rejects_empty_area() {
        assert!(ScreenSize::new(10.0, 10.0).is_valid());
        assert!(!ScreenSize::new(0.0, 10.0).is_valid());
        assert!(!ScreenSize::new(10.0, f64::NAN).is_valid());
    }
}
