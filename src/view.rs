//! Value ranges.

use serde::{Deserialize, Serialize};

/// Numeric range with inclusive bounds.
///
/// Serialized as a `[min, max]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Smallest range covering every finite value, if there is one.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut range: Option<Self> = None;
        for value in values {
            if !value.is_finite() {
                continue;
            }
            match range.as_mut() {
                Some(range) => range.expand_to_include(value),
                None => range = Some(Self::new(value, value)),
            }
        }
        range
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }
}

impl From<(f64, f64)> for Range {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

impl From<Range> for (f64, f64) {
    fn from(range: Range) -> Self {
        (range.min, range.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_from_values_skips_non_finite() {
        let range = Range::from_values([3.0, f64::NAN, -1.0, 7.5]).expect("finite values");
        assert_eq!(range, Range::new(-1.0, 7.5));
        assert!(Range::from_values([f64::NAN]).is_none());
    }

    #[test]
    fn empty_span_is_not_valid() {
        assert!(!Range::new(2.0, 2.0).is_valid());
        assert!(!Range::new(0.0, f64::INFINITY).is_valid());
        let swapped = Range::new(4.0, 0.0);
        assert_eq!((swapped.min, swapped.max), (0.0, 4.0));
        assert!(swapped.is_valid());
    }
}
