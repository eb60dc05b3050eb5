use gpui::{Bounds, Pixels};
use tracing::trace;

use crate::chart::{ChartFrame, ChartState};
use crate::geom::{ScreenPoint, ScreenSize};

use super::state::ChartUiState;

#[derive(Debug, Clone)]
pub(crate) struct ChartViewFrame {
    pub(crate) origin: ScreenPoint,
    pub(crate) size: ScreenSize,
    pub(crate) chart: ChartFrame,
    /// The transition is still running and needs another frame.
    pub(crate) animating: bool,
}

pub(crate) fn build_frame(
    chart: &mut ChartState,
    state: &mut ChartUiState,
    bounds: Bounds<Pixels>,
) -> ChartViewFrame {
    let origin = ScreenPoint::new(
        f32::from(bounds.origin.x) as f64,
        f32::from(bounds.origin.y) as f64,
    );
    let size = ScreenSize::new(
        f32::from(bounds.size.width) as f64,
        f32::from(bounds.size.height) as f64,
    );
    state.origin = Some(origin);
    state.size = Some(size);

    let mut animating = false;
    if let Some(clock) = state.clock {
        let progress = clock.progress();
        chart.set_progress(progress);
        if progress >= 1.0 {
            state.clock = None;
        } else {
            animating = true;
        }
        trace!(progress, "advanced transition");
    }

    ChartViewFrame {
        origin,
        size,
        chart: chart.frame(size),
        animating,
    }
}
