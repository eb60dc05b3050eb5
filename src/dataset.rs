//! Datasets and smoothing configuration.
//!
//! A [`Dataset`] is the caller-facing snapshot of one chart state: the ordered
//! samples plus how they should be scaled and smoothed. The serde shape
//! accepts camelCase keys and a `[min, max]` pair for `yRange`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::Point;
use crate::view::Range;

/// How the rendered path is smoothed between samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingStrategy {
    /// Straight segments.
    #[default]
    None,
    /// Control points along the neighbour chord, scaled by the smoothing factor.
    Simple,
    /// Like [`SmoothingStrategy::Simple`], flattened at local extrema.
    Complex,
    /// Uniform cubic B-spline, always fully smoothed.
    Bezier,
}

impl SmoothingStrategy {
    /// Whether this is the always-smoothed B-spline strategy.
    pub fn is_bezier(self) -> bool {
        self == Self::Bezier
    }

    /// Whether the smoothing factor controls the curve for this strategy.
    pub fn uses_factor(self) -> bool {
        matches!(self, Self::Simple | Self::Complex)
    }
}

/// Degenerate conditions reported by strict validation.
///
/// The rendering pipeline never fails on these; it falls back to a flat or
/// centered layout. Callers that need to reject such data check up front.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DatasetError {
    /// No samples.
    #[error("dataset has no points")]
    Empty,
    /// A sample has a non-finite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinite {
        /// Index of the offending sample.
        index: usize,
    },
    /// First and last X are equal, so X cannot be normalized.
    #[error("x range has zero width (x = {x})")]
    ZeroWidthX {
        /// The shared X value.
        x: f64,
    },
    /// Every Y (or the explicit range) collapses to one value.
    #[error("y range has zero height (y = {y})")]
    ZeroHeightY {
        /// The shared Y value.
        y: f64,
    },
}

/// One chart state: samples and rendering options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    /// Samples in ascending X order.
    pub points: Vec<Point>,
    /// Fixed Y scale overriding the computed extremes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<Range>,
    /// Smoothing applied when building the path.
    pub smoothing_strategy: SmoothingStrategy,
    /// Smoothing strength; 0 draws straight segments.
    pub smoothing_factor: f64,
    /// Untransformed samples used for gesture lookup and extremes.
    ///
    /// Set this when `points` were densified or simplified so readouts still
    /// report real samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_points: Option<Vec<Point>>,
}

impl Dataset {
    /// Create a dataset with straight segments and computed Y scale.
    pub fn new(points: impl Into<Vec<Point>>) -> Self {
        Self {
            points: points.into(),
            ..Self::default()
        }
    }

    /// Build a dataset from `(x, y)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(x, y)| Point::new(x, y))
                .collect::<Vec<_>>(),
        )
    }

    /// Pin the Y scale.
    pub fn with_y_range(mut self, range: Range) -> Self {
        self.y_range = Some(range);
        self
    }

    /// Set smoothing strategy and factor.
    pub fn with_smoothing(mut self, strategy: SmoothingStrategy, factor: f64) -> Self {
        self.smoothing_strategy = strategy;
        self.smoothing_factor = factor;
        self
    }

    /// Attach the untransformed samples.
    pub fn with_native_points(mut self, points: impl Into<Vec<Point>>) -> Self {
        self.native_points = Some(points.into());
        self
    }

    /// Samples used for gesture lookup.
    pub fn lookup_points(&self) -> &[Point] {
        self.native_points.as_deref().unwrap_or(&self.points)
    }

    /// Number of rendered samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Report the first degenerate condition, if any.
    pub fn validate(&self) -> Result<(), DatasetError> {
        validate_points(&self.points, self.y_range)
    }
}

/// Check samples for conditions the normalizer would have to absorb.
pub fn validate_points(points: &[Point], y_range: Option<Range>) -> Result<(), DatasetError> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(DatasetError::Empty);
    };
    if let Some(index) = points.iter().position(|point| !point.is_finite()) {
        return Err(DatasetError::NonFinite { index });
    }
    if last.x - first.x == 0.0 {
        return Err(DatasetError::ZeroWidthX { x: first.x });
    }
    let y = match y_range {
        Some(range) => range,
        None => Range::from_values(points.iter().map(|point| point.y))
            .ok_or(DatasetError::Empty)?,
    };
    if y.span() == 0.0 {
        return Err(DatasetError::ZeroHeightY { y: y.min });
    }
    Ok(())
}
