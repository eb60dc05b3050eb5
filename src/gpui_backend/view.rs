use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{
    MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, Window, canvas, div,
};

use crate::chart::ChartState;
use crate::dataset::Dataset;
use crate::geom::ScreenPoint;

use super::config::ChartViewConfig;
use super::frame::build_frame;
use super::paint::{paint_frame, to_hsla};
use super::state::{ChartUiState, TransitionClock};

/// A GPUI view that renders a [`ChartState`] and resolves pointer readouts.
///
/// Pressing inside the chart starts a readout that follows the pointer until
/// release. Dataset changes made through a [`ChartHandle`] animate over the
/// chart's configured transition duration.
#[derive(Clone)]
pub struct GpuiChartView {
    chart: Arc<RwLock<ChartState>>,
    state: Arc<RwLock<ChartUiState>>,
    config: ChartViewConfig,
}

impl GpuiChartView {
    /// Create a new GPUI chart view.
    ///
    /// Uses the default [`ChartViewConfig`].
    pub fn new(chart: ChartState) -> Self {
        Self::with_config(chart, ChartViewConfig::default())
    }

    /// Create a new GPUI chart view with a custom configuration.
    pub fn with_config(chart: ChartState, config: ChartViewConfig) -> Self {
        Self {
            chart: Arc::new(RwLock::new(chart)),
            state: Arc::new(RwLock::new(ChartUiState::default())),
            config,
        }
    }

    /// Get a handle for updating the chart from elsewhere.
    pub fn chart_handle(&self) -> ChartHandle {
        ChartHandle {
            chart: Arc::clone(&self.chart),
            state: Arc::clone(&self.state),
        }
    }

    fn update_gesture(&self, window_x: f64) {
        let local = self.state.read().expect("chart state lock").local_x(window_x);
        if let Some(x) = local {
            self.chart.write().expect("chart lock").set_gesture(Some(x));
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        {
            let mut state = self.state.write().expect("chart state lock");
            if !state.contains(pos) {
                return;
            }
            state.pressed = true;
        }
        self.update_gesture(pos.x);
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let (pressed, inside) = {
            let state = self.state.read().expect("chart state lock");
            (state.pressed, state.contains(pos))
        };
        if pressed || (self.config.track_hover && inside) {
            self.update_gesture(pos.x);
        } else if self.config.track_hover {
            self.chart.write().expect("chart lock").set_gesture(None);
        } else {
            return;
        }
        cx.notify();
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        self.state.write().expect("chart state lock").pressed = false;
        if !self.config.track_hover {
            self.chart.write().expect("chart lock").set_gesture(None);
        }
        cx.notify();
    }
}

impl Render for GpuiChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let chart = Arc::clone(&self.chart);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();

        div()
            .size_full()
            .bg(to_hsla(self.config.background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let mut chart = chart.write().expect("chart lock");
                        let mut state = state.write().expect("chart state lock");
                        let frame = build_frame(&mut chart, &mut state, bounds);
                        if frame.animating {
                            window.request_animation_frame();
                        }
                        frame
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, &config, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
    }
}

/// A handle for updating a [`ChartState`] held inside a `GpuiChartView`.
///
/// The handle clones cheaply and can be moved into async tasks. Notify the
/// view after writing so it repaints.
#[derive(Clone)]
pub struct ChartHandle {
    chart: Arc<RwLock<ChartState>>,
    state: Arc<RwLock<ChartUiState>>,
}

impl ChartHandle {
    /// Read the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&ChartState) -> R) -> R {
        let chart = self.chart.read().expect("chart lock");
        f(&chart)
    }

    /// Mutate the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut ChartState) -> R) -> R {
        let mut chart = self.chart.write().expect("chart lock");
        f(&mut chart)
    }

    /// Adopt a dataset and start the transition clock if it changed.
    pub fn set_dataset(&self, dataset: Dataset) -> bool {
        let mut chart = self.chart.write().expect("chart lock");
        let changed = chart.set_dataset(dataset);
        if changed && !chart.transition().is_settled() {
            let duration = chart.config().animation.transition_duration;
            self.state.write().expect("chart state lock").clock =
                Some(TransitionClock::start(duration));
        }
        changed
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x) as f64, f32::from(point.y) as f64)
}
