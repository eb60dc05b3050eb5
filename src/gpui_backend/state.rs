use std::time::{Duration, Instant};

use crate::geom::{ScreenPoint, ScreenSize};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TransitionClock {
    pub(crate) started: Instant,
    pub(crate) duration: Duration,
}

impl TransitionClock {
    pub(crate) fn start(duration: Duration) -> Self {
        Self {
            started: Instant::now(),
            duration,
        }
    }

    /// Elapsed fraction of the transition, reaching 1 at the end.
    pub(crate) fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.started.elapsed().as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ChartUiState {
    /// Top-left corner of the chart in window coordinates.
    pub(crate) origin: Option<ScreenPoint>,
    pub(crate) size: Option<ScreenSize>,
    pub(crate) pressed: bool,
    pub(crate) clock: Option<TransitionClock>,
}

impl ChartUiState {
    /// Convert a window X into a chart-local X, if the chart was laid out.
    pub(crate) fn local_x(&self, window_x: f64) -> Option<f64> {
        let origin = self.origin?;
        Some(window_x - origin.x)
    }

    pub(crate) fn contains(&self, window: ScreenPoint) -> bool {
        let (Some(origin), Some(size)) = (self.origin, self.size) else {
            return false;
        };
        window.x >= origin.x
            && window.x <= origin.x + size.width
            && window.y >= origin.y
            && window.y <= origin.y + size.height
    }
}
