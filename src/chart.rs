//! Chart state: the current inputs and the frames computed from them.
//!
//! [`ChartState`] owns the dataset snapshot, the transition between the last
//! two datasets, and the active pointer position. Hosts mutate it through
//! `&mut self` (behind a lock when shared) and read whole [`ChartFrame`]s, so
//! a frame never mixes a new dataset with a stale progress value.

use tracing::{debug, trace};

use crate::config::ChartConfig;
use crate::dataset::{Dataset, SmoothingStrategy};
use crate::geom::{NormalizedPoint, ScreenSize};
use crate::gesture::{GestureMapper, GestureReading};
use crate::guides::{GuideMark, guide_marks};
use crate::morph::{Morpher, Transition};
use crate::normalize::{Extremes, normalize, normalize_dataset};
use crate::path::{Path, PathBuilder, fill_path};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartFrame {
    /// Stroke path.
    pub path: Path,
    /// Stroke closed against the bottom edge.
    pub fill_path: Path,
    /// Pointer readout, when a gesture is active and resolvable.
    pub reading: Option<GestureReading>,
    /// Vertical guide marks.
    pub guides: Vec<GuideMark>,
}

/// Current chart inputs.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    config: ChartConfig,
    dataset: Option<Dataset>,
    transition: Transition,
    lookup: Vec<NormalizedPoint>,
    extremes: Option<Extremes>,
    gesture: Option<f64>,
}

impl ChartState {
    /// Create an empty chart.
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start building a chart with an initial dataset.
    pub fn builder() -> ChartStateBuilder {
        ChartStateBuilder::default()
    }

    /// Access the configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: ChartConfig) {
        self.config = config;
    }

    /// Access the current dataset.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Extremes of the current dataset.
    pub fn extremes(&self) -> Option<Extremes> {
        self.extremes
    }

    /// Access the transition state.
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Smoothing strategy of the current dataset.
    pub fn strategy(&self) -> SmoothingStrategy {
        self.dataset
            .as_ref()
            .map(|dataset| dataset.smoothing_strategy)
            .unwrap_or_default()
    }

    /// Adopt a new dataset.
    ///
    /// The first dataset is shown settled. Later ones start a transition from
    /// the current curve. Returns `false` when `dataset` has no points or
    /// equals the current one, which leaves the chart untouched.
    pub fn set_dataset(&mut self, dataset: Dataset) -> bool {
        if dataset.is_empty() {
            debug!("ignoring empty dataset");
            return false;
        }
        if self.dataset.as_ref() == Some(&dataset) {
            trace!("dataset unchanged");
            return false;
        }

        let (points, extremes) = normalize_dataset(&dataset).into_parts();
        self.lookup = match &dataset.native_points {
            Some(native) => normalize(native, dataset.y_range).points,
            None => points.clone(),
        };
        self.extremes = extremes;

        let smoothing = dataset.smoothing_factor;
        if self.dataset.is_none() {
            self.transition = Transition::new(points, smoothing);
        } else {
            self.transition.adopt(points, smoothing);
        }
        debug!(
            points = dataset.points.len(),
            lookup = self.lookup.len(),
            strategy = ?dataset.smoothing_strategy,
            "adopted dataset"
        );
        self.dataset = Some(dataset);
        true
    }

    /// Advance the transition; reaching 1 retires the previous curve.
    pub fn set_progress(&mut self, progress: f64) {
        self.transition.set_progress(progress);
        if self.transition.is_settled() {
            self.transition.settle();
        }
    }

    /// Current transition progress.
    pub fn progress(&self) -> f64 {
        self.transition.progress()
    }

    /// Set or clear the pointer X, in device units.
    pub fn set_gesture(&mut self, position: Option<f64>) {
        self.gesture = position.filter(|x| x.is_finite());
    }

    /// Active pointer X.
    pub fn gesture(&self) -> Option<f64> {
        self.gesture
    }

    /// Compute the frame for a surface of `size`.
    pub fn frame(&self, size: ScreenSize) -> ChartFrame {
        if !size.is_valid() {
            debug!(width = size.width, height = size.height, "skipping frame for empty surface");
            return ChartFrame::default();
        }
        let strategy = self.strategy();
        let morpher = Morpher::with_resampling(self.config.resampling);
        let points = self.transition.points(&morpher, size);

        let path = PathBuilder::new(strategy, size)
            .smoothing_while_transitioning(self.config.smoothing_while_transitioning)
            .build_screen(points, self.transition.smoothing(), self.transition.is_settled());
        let fill_path = fill_path(&path, size);

        let rendered = self.transition.current();
        let reading = self.gesture.and_then(|position| {
            GestureMapper::new(self.config.hit_slop, size, strategy).resolve(
                position,
                rendered,
                &self.lookup,
            )
        });
        let guides = guide_marks(rendered, &self.lookup, strategy, size, &self.config.guides);

        ChartFrame {
            path,
            fill_path,
            reading,
            guides,
        }
    }
}

/// Builder for a chart with initial configuration and data.
#[derive(Debug, Default)]
pub struct ChartStateBuilder {
    config: ChartConfig,
    dataset: Option<Dataset>,
}

impl ChartStateBuilder {
    /// Set the configuration.
    pub fn config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial dataset.
    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Build the chart.
    pub fn build(self) -> ChartState {
        let mut state = ChartState::new(self.config);
        if let Some(dataset) = self.dataset {
            state.set_dataset(dataset);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::path::PathCommand;

    fn first() -> Dataset {
        Dataset::from_pairs([(0.0, 0.0), (1.0, 10.0), (2.0, 5.0)])
    }

    fn second() -> Dataset {
        Dataset::from_pairs([(0.0, 5.0), (1.0, 0.0), (2.0, 10.0), (3.0, 2.0)])
    }

    #[test]
    fn first_dataset_is_settled() {
        let state = ChartState::builder().dataset(first()).build();
        assert!(state.transition().is_settled());
        assert_eq!(state.extremes().map(|e| e.greatest_y), Some(Point::new(1.0, 10.0)));
        let frame = state.frame(ScreenSize::new(100.0, 10.0));
        assert!(frame.path.to_string().starts_with('M'));
        assert!(frame.reading.is_none());
    }

    #[test]
    fn new_dataset_starts_transition() {
        let mut state = ChartState::builder().dataset(first()).build();
        assert!(state.set_dataset(second()));
        assert_eq!(state.progress(), 0.0);
        assert_eq!(state.transition().previous().len(), 3);

        // at progress 0 the frame still draws the old curve, plus the
        // mirrored head point and the two tail copies
        let size = ScreenSize::new(100.0, 10.0);
        assert_eq!(state.frame(size).path.len(), 6);

        state.set_progress(1.0);
        assert!(state.transition().previous().is_empty());
        assert_eq!(state.frame(size).path.len(), 7);
    }

    #[test]
    fn identical_dataset_is_ignored() {
        let mut state = ChartState::builder().dataset(first()).build();
        assert!(!state.set_dataset(first()));
        assert!(state.transition().is_settled());
    }

    #[test]
    fn empty_dataset_keeps_current_curve() {
        let mut state = ChartState::builder().dataset(first()).build();
        let size = ScreenSize::new(100.0, 10.0);
        let before = state.frame(size);

        assert!(!state.set_dataset(Dataset::default()));
        assert!(state.transition().is_settled());
        assert_eq!(state.dataset(), Some(&first()));
        assert_eq!(state.frame(size), before);

        // the next real dataset still morphs from the kept curve
        assert!(state.set_dataset(second()));
        assert_eq!(state.transition().previous().len(), 3);

        let mut blank = ChartState::default();
        assert!(!blank.set_dataset(Dataset::default()));
        assert!(blank.dataset().is_none());
    }

    #[test]
    fn gesture_reading_reports_original_values() {
        let mut state = ChartState::builder().dataset(first()).build();
        state.set_gesture(Some(50.0));
        let frame = state.frame(ScreenSize::new(100.0, 10.0));
        let reading = frame.reading.expect("gesture resolves");
        assert_eq!(reading.nearest.original_x, 1.0);
        assert_eq!(reading.nearest.original_y, 10.0);

        state.set_gesture(None);
        assert!(state.frame(ScreenSize::new(100.0, 10.0)).reading.is_none());
    }

    #[test]
    fn native_points_drive_lookup() {
        let dense = Dataset::from_pairs((0..=20).map(|i| (i as f64 / 10.0, (i % 4) as f64)))
            .with_native_points(vec![Point::new(0.0, 0.0), Point::new(2.0, 3.0)]);
        let mut state = ChartState::builder().dataset(dense).build();
        state.set_gesture(Some(95.0));
        let reading = state
            .frame(ScreenSize::new(100.0, 10.0))
            .reading
            .expect("gesture resolves");
        assert_eq!(reading.nearest.original_x, 2.0);
        assert_eq!(state.extremes().map(|e| e.greatest_y.y), Some(3.0));
    }

    #[test]
    fn bezier_frame_is_curved_and_filled() {
        let dataset = second().with_smoothing(SmoothingStrategy::Bezier, 0.0);
        let state = ChartState::builder().dataset(dataset).build();
        let size = ScreenSize::new(300.0, 100.0);
        let frame = state.frame(size);
        assert!(matches!(frame.path.commands()[1], PathCommand::CurveTo { .. }));
        let fill = frame.fill_path.to_string();
        assert!(fill.starts_with("M 0 100"));
        assert!(fill.ends_with("L 300 100 L 0 100"));
        assert_eq!(frame.guides.len(), 5);
    }

    #[test]
    fn empty_surface_yields_empty_frame() {
        let state = ChartState::builder().dataset(first()).build();
        assert_eq!(state.frame(ScreenSize::new(0.0, 10.0)), ChartFrame::default());
        assert_eq!(ChartState::default().frame(ScreenSize::new(10.0, 10.0)).path, Path::new());
    }
}
