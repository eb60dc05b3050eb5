//! Transition morphing between two normalized point sequences.
//!
//! Both sequences are resampled to a shared cardinality and blended per
//! index by the transition progress. The cardinality ramps from the previous
//! count to the current one over the first half of the transition and then
//! holds, so points appear or disappear while the shapes are still far apart.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geom::{NormalizedPoint, Point, ScreenPoint, ScreenSize};

/// How sequences are brought to a common length before blending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resampling {
    /// Snap each output index to the nearest source index.
    #[default]
    NearestIndex,
    /// Sample both sequences on an evenly spaced X grid with linear
    /// interpolation between neighbouring points.
    LinearX,
}

/// Morph with the default nearest-index resampling.
pub fn morph(
    previous: &[NormalizedPoint],
    current: &[NormalizedPoint],
    progress: f64,
    size: ScreenSize,
) -> Vec<ScreenPoint> {
    Morpher::default().morph(previous, current, progress, size)
}

/// Transition morpher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Morpher {
    resampling: Resampling,
}

impl Morpher {
    /// Create a morpher using the given resampling.
    pub fn with_resampling(resampling: Resampling) -> Self {
        Self { resampling }
    }

    /// Resampling used by this morpher.
    pub fn resampling(&self) -> Resampling {
        self.resampling
    }

    /// Blend `previous` into `current` and scale into device space.
    ///
    /// `progress` is clamped to `[0, 1]`. At 1 the current sequence is
    /// scaled directly. An empty `previous` morphs from `current` itself.
    pub fn morph(
        &self,
        previous: &[NormalizedPoint],
        current: &[NormalizedPoint],
        progress: f64,
        size: ScreenSize,
    ) -> Vec<ScreenPoint> {
        let progress = clamp_progress(progress);
        if current.is_empty() {
            return Vec::new();
        }
        if progress >= 1.0 {
            return current.iter().map(|point| point.to_screen(size)).collect();
        }
        let previous = if previous.is_empty() { current } else { previous };

        let target = target_count(previous.len(), current.len(), progress);
        let (from, to) = match self.resampling {
            Resampling::NearestIndex => (
                positions(&resample_nearest(previous, target)),
                positions(&resample_nearest(current, target)),
            ),
            Resampling::LinearX => (regrid(previous, target), regrid(current, target)),
        };
        trace!(
            previous = previous.len(),
            current = current.len(),
            target,
            progress,
            "morphing"
        );

        from.iter()
            .zip(&to)
            .map(|(a, b)| {
                ScreenPoint::new(
                    (a.x + (b.x - a.x) * progress) * size.width,
                    (a.y + (b.y - a.y) * progress) * size.height,
                )
            })
            .collect()
    }
}

fn positions(points: &[NormalizedPoint]) -> Vec<Point> {
    points.iter().map(NormalizedPoint::position).collect()
}

/// Linear regridding that leaves a sequence already at `target` untouched.
fn regrid(points: &[NormalizedPoint], target: usize) -> Vec<Point> {
    if points.len() == target {
        positions(points)
    } else {
        resample_linear_x(points, target)
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        1.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Number of points drawn at `progress`.
pub fn target_count(previous: usize, current: usize, progress: f64) -> usize {
    let ramp = progress.clamp(0.0, 0.5) * 2.0;
    let count = previous as f64 + (current as f64 - previous as f64) * ramp;
    count.round().max(1.0) as usize
}

/// Pick `target` samples by snapping to the nearest source index.
pub fn resample_nearest<P: Copy>(points: &[P], target: usize) -> Vec<P> {
    if points.is_empty() || target == 0 {
        return Vec::new();
    }
    if target == 1 {
        return vec![points[0]];
    }
    let ratio = (points.len() - 1) as f64 / (target - 1) as f64;
    (0..target)
        .map(|i| {
            let mapped = (i as f64 * ratio).round() as usize;
            points[mapped.min(points.len() - 1)]
        })
        .collect()
}

/// Sample `target` evenly spaced X positions across the sequence's X range.
///
/// Between samples the Y value is interpolated linearly. The result is in
/// the same unit space as the input.
pub fn resample_linear_x(points: &[NormalizedPoint], target: usize) -> Vec<Point> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if target == 0 {
        return Vec::new();
    }
    if target == 1 || points.len() == 1 {
        return vec![first.position(); target];
    }

    let span = last.x - first.x;
    let mut segment = 0;
    (0..target)
        .map(|i| {
            let x = first.x + span * i as f64 / (target - 1) as f64;
            while segment + 2 < points.len() && points[segment + 1].x < x {
                segment += 1;
            }
            let (a, b) = (points[segment], points[segment + 1]);
            let dx = b.x - a.x;
            let t = if dx == 0.0 { 1.0 } else { ((x - a.x) / dx).clamp(0.0, 1.0) };
            Point::new(x, a.y + (b.y - a.y) * t)
        })
        .collect()
}

/// Ease the smoothing factor across a transition.
///
/// A decreasing factor drops during the first fifth of the transition; an
/// increasing one rises during the last 30%.
pub fn transition_smoothing(previous: f64, current: f64, progress: f64) -> f64 {
    let weight = if current < previous {
        (progress * 5.0).min(1.0)
    } else {
        ((progress - 0.7) * 4.0).clamp(0.0, 1.0)
    };
    previous + weight * (current - previous)
}

/// Previous/current pair with progress and smoothing factors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    previous: Vec<NormalizedPoint>,
    current: Vec<NormalizedPoint>,
    progress: f64,
    previous_smoothing: f64,
    current_smoothing: f64,
}

impl Transition {
    /// Start settled on the first sequence, used as both previous and current.
    pub fn new(points: Vec<NormalizedPoint>, smoothing: f64) -> Self {
        Self {
            previous: points.clone(),
            current: points,
            progress: 1.0,
            previous_smoothing: smoothing,
            current_smoothing: smoothing,
        }
    }

    /// Adopt a new sequence; the old current becomes previous.
    pub fn adopt(&mut self, points: Vec<NormalizedPoint>, smoothing: f64) {
        self.previous = std::mem::replace(&mut self.current, points);
        self.previous_smoothing = self.current_smoothing;
        self.current_smoothing = smoothing;
        self.progress = 0.0;
    }

    /// Set the progress, clamped to `[0, 1]`.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = clamp_progress(progress);
    }

    /// Current progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether the current sequence is authoritative.
    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }

    /// Finish the transition and drop the previous sequence.
    pub fn settle(&mut self) {
        self.progress = 1.0;
        self.previous.clear();
        self.previous_smoothing = self.current_smoothing;
    }

    /// Sequence being morphed away from.
    pub fn previous(&self) -> &[NormalizedPoint] {
        &self.previous
    }

    /// Sequence being morphed towards.
    pub fn current(&self) -> &[NormalizedPoint] {
        &self.current
    }

    /// Eased smoothing factor at the current progress.
    pub fn smoothing(&self) -> f64 {
        transition_smoothing(self.previous_smoothing, self.current_smoothing, self.progress)
    }

    /// Device-space points at the current progress.
    pub fn points(&self, morpher: &Morpher, size: ScreenSize) -> Vec<ScreenPoint> {
        morpher.morph(&self.previous, &self.current, self.progress, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(count: usize, y: impl Fn(f64) -> f64) -> Vec<NormalizedPoint> {
        (0..count)
            .map(|i| {
                let x = if count == 1 { 0.0 } else { i as f64 / (count - 1) as f64 };
                NormalizedPoint::new(x, y(x), Point::new(i as f64, 0.0))
            })
            .collect()
    }

    fn scaled(points: &[NormalizedPoint], size: ScreenSize) -> Vec<ScreenPoint> {
        points.iter().map(|point| point.to_screen(size)).collect()
    }

    #[test]
    fn endpoints_match_scaled_inputs() {
        let size = ScreenSize::new(200.0, 100.0);
        let a = line(5, |x| x);
        let b = line(9, |x| 1.0 - x * x);
        assert_eq!(morph(&a, &b, 0.0, size), scaled(&a, size));
        assert_eq!(morph(&a, &b, 1.0, size), scaled(&b, size));
    }

    #[test]
    fn cardinality_ramps_over_first_half() {
        assert_eq!(target_count(4, 10, 0.0), 4);
        assert_eq!(target_count(4, 10, 0.25), 7);
        assert_eq!(target_count(4, 10, 0.5), 10);
        assert_eq!(target_count(4, 10, 0.9), 10);
        assert_eq!(target_count(10, 4, 0.5), 4);

        let size = ScreenSize::new(1.0, 1.0);
        assert_eq!(morph(&line(4, |x| x), &line(10, |x| x), 0.25, size).len(), 7);
    }

    #[test]
    fn nearest_index_snaps() {
        let source = [0, 1, 2, 3, 4];
        assert_eq!(resample_nearest(&source, 3), vec![0, 2, 4]);
        assert_eq!(resample_nearest(&source, 1), vec![0]);
        assert_eq!(resample_nearest(&[7, 8], 4), vec![7, 7, 8, 8]);
    }

    #[test]
    fn linear_x_interpolates_between_samples() {
        let points = line(3, |x| if x == 0.5 { 1.0 } else { 0.0 });
        let out = resample_linear_x(&points, 5);
        assert_eq!(out.len(), 5);
        assert_eq!(out[1], Point::new(0.25, 0.5));
        assert_eq!(out[2], Point::new(0.5, 1.0));
        assert_eq!(out[4], Point::new(1.0, 0.0));
    }

    #[test]
    fn linear_x_morpher_keeps_endpoints() {
        let size = ScreenSize::new(10.0, 10.0);
        let morpher = Morpher::with_resampling(Resampling::LinearX);
        let a = line(3, |_| 0.2);
        let b = line(6, |_| 0.8);
        let half = morpher.morph(&a, &b, 0.5, size);
        assert_eq!(half.len(), 6);
        assert!(half.iter().all(|p| (p.y - 5.0).abs() < 1e-9));
    }

    #[test]
    fn linear_x_starts_from_exact_previous_curve() {
        let size = ScreenSize::new(100.0, 100.0);
        let morpher = Morpher::with_resampling(Resampling::LinearX);
        let a = [
            NormalizedPoint::new(0.0, 1.0, Point::new(0.0, 0.0)),
            NormalizedPoint::new(0.1, 0.0, Point::new(1.0, 10.0)),
            NormalizedPoint::new(1.0, 0.5, Point::new(10.0, 5.0)),
        ];
        let b = line(5, |x| x);
        assert_eq!(morpher.morph(&a, &b, 0.0, size), scaled(&a, size));
        assert_eq!(morpher.morph(&a, &b, 1.0, size), scaled(&b, size));

        // past the ramp only the previous sequence is regridded
        let late = morpher.morph(&a, &b, 0.75, size);
        assert_eq!(late.len(), 5);
        assert!((late[2].x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs() {
        let size = ScreenSize::new(10.0, 10.0);
        assert!(morph(&line(3, |x| x), &[], 0.5, size).is_empty());
        let b = line(3, |x| x);
        assert_eq!(morph(&[], &b, 0.3, size), scaled(&b, size));
    }

    #[test]
    fn smoothing_eases_asymmetrically() {
        // decreasing: done after 20%
        assert_eq!(transition_smoothing(1.0, 0.0, 0.1), 0.5);
        assert_eq!(transition_smoothing(1.0, 0.0, 0.2), 0.0);
        // increasing: waits until 70%
        assert_eq!(transition_smoothing(0.0, 0.4, 0.5), 0.0);
        assert!((transition_smoothing(0.0, 0.4, 0.8) - 0.16).abs() < 1e-12);
        assert_eq!(transition_smoothing(0.0, 0.4, 1.0), 0.4);
    }

    #[test]
    fn transition_lifecycle() {
        let mut transition = Transition::new(line(3, |x| x), 0.2);
        assert!(transition.is_settled());
        assert_eq!(transition.previous(), transition.current());

        transition.adopt(line(5, |x| 1.0 - x), 0.0);
        assert_eq!(transition.progress(), 0.0);
        assert_eq!(transition.previous().len(), 3);
        assert_eq!(transition.current().len(), 5);
        assert_eq!(transition.smoothing(), 0.2);

        transition.set_progress(4.0);
        assert!(transition.is_settled());
        assert_eq!(transition.smoothing(), 0.0);

        transition.settle();
        assert!(transition.previous().is_empty());
        let size = ScreenSize::new(2.0, 2.0);
        assert_eq!(
            transition.points(&Morpher::default(), size),
            scaled(transition.current(), size)
        );
    }
}
