//! Mapping raw samples into the unit square.
//!
//! X is scaled so the first sample sits at 0 and the last at 1. Y is scaled
//! against the dataset's Y extremes (or its fixed `y_range`) and inverted, so
//! larger values are drawn higher on a top-left-origin surface.
//!
//! Degenerate inputs never produce NaN: a zero-width X range centers every
//! sample at `x = 0.5`, and a zero-height Y range draws a flat line at
//! `y = 0.5`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dataset::{Dataset, DatasetError, validate_points};
use crate::geom::{NormalizedPoint, Point};
use crate::view::Range;

const DEGENERATE_POSITION: f64 = 0.5;

/// Samples achieving the X and Y extremes, for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    /// First sample.
    pub smallest_x: Point,
    /// Last sample.
    pub greatest_x: Point,
    /// First sample with the minimum Y.
    pub smallest_y: Point,
    /// First sample with the maximum Y.
    pub greatest_y: Point,
}

/// Output of the normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Normalized samples in input order.
    pub points: Vec<NormalizedPoint>,
    /// Extremes of the input, `None` when it was empty.
    pub extremes: Option<Extremes>,
}

impl Normalized {
    /// Split into the point sequence and extremes.
    pub fn into_parts(self) -> (Vec<NormalizedPoint>, Option<Extremes>) {
        (self.points, self.extremes)
    }
}

/// Find the samples with the smallest and greatest Y, in that order.
///
/// Non-finite samples are skipped and the first occurrence wins ties.
pub fn find_y_extremes(points: &[Point]) -> Option<(Point, Point)> {
    let mut finite = points.iter().copied().filter(|point| point.y.is_finite());
    let first = finite.next()?;
    let extremes = finite.fold((first, first), |(smallest, greatest), point| {
        (
            if point.y < smallest.y { point } else { smallest },
            if point.y > greatest.y { point } else { greatest },
        )
    });
    Some(extremes)
}

/// Compute the [`Extremes`] of a sample sequence.
pub fn find_extremes(points: &[Point]) -> Option<Extremes> {
    let smallest_x = *points.first()?;
    let greatest_x = *points.last()?;
    let (smallest_y, greatest_y) =
        find_y_extremes(points).unwrap_or((smallest_x, smallest_x));
    Some(Extremes {
        smallest_x,
        greatest_x,
        smallest_y,
        greatest_y,
    })
}

/// Normalize samples, optionally against a fixed Y range.
pub fn normalize(points: &[Point], y_range: Option<Range>) -> Normalized {
    let Some(extremes) = find_extremes(points) else {
        return Normalized::default();
    };

    let first_x = extremes.smallest_x.x;
    let x_span = extremes.greatest_x.x - first_x;
    let x_degenerate = !(x_span.is_finite() && x_span != 0.0);

    let y_scale = y_range.unwrap_or_else(|| {
        Range::new(extremes.smallest_y.y, extremes.greatest_y.y)
    });
    let y_degenerate = !y_scale.is_valid();

    if x_degenerate || y_degenerate {
        debug!(
            count = points.len(),
            x_degenerate, y_degenerate, "normalizing degenerate dataset"
        );
    }

    let points = points
        .iter()
        .map(|point| {
            let x = if x_degenerate {
                DEGENERATE_POSITION
            } else {
                (point.x - first_x) / x_span
            };
            let y = if y_degenerate {
                DEGENERATE_POSITION
            } else {
                1.0 - (point.y - y_scale.min) / y_scale.span()
            };
            NormalizedPoint::new(x, y, *point)
        })
        .collect::<Vec<_>>();
    trace!(count = points.len(), "normalized points");

    Normalized {
        points,
        extremes: Some(extremes),
    }
}

/// Normalize a dataset's rendered samples.
///
/// Extremes are taken from the lookup samples so labels report real data
/// even when the rendered samples were densified.
pub fn normalize_dataset(dataset: &Dataset) -> Normalized {
    let mut normalized = normalize(&dataset.points, dataset.y_range);
    if dataset.native_points.is_some() {
        normalized.extremes = find_extremes(dataset.lookup_points());
    }
    normalized
}

/// Normalize, rejecting degenerate input instead of absorbing it.
pub fn try_normalize(points: &[Point], y_range: Option<Range>) -> Result<Normalized, DatasetError> {
    validate_points(points, y_range)?;
    Ok(normalize(points, y_range))
}
