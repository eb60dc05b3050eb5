#[cfg(feature = "gpui")]
use std::time::Duration;

#[cfg(feature = "gpui")]
use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};

#[cfg(feature = "gpui")]
use gpui_chartpath::{ChartState, ChartViewConfig, Dataset, GpuiChartView, SmoothingStrategy};

#[cfg(feature = "gpui")]
fn dataset(phase: f64) -> Dataset {
    let count = 24 + (phase.sin().abs() * 16.0) as usize;
    Dataset::from_pairs((0..count).map(|i| {
        let x = i as f64;
        (x, (x * 0.3 + phase).sin() * 40.0 + (x * 0.05).cos() * 10.0)
    }))
    .with_smoothing(SmoothingStrategy::Bezier, 0.0)
}

#[cfg(feature = "gpui")]
fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(900.0), px(400.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let chart = ChartState::builder().dataset(dataset(0.0)).build();
            let config = ChartViewConfig {
                show_guides: true,
                track_hover: true,
                ..Default::default()
            };

            let view = GpuiChartView::with_config(chart, config);
            let chart_handle = view.chart_handle();
            let view_handle = cx.new(|_| view);

            let view_for_task = view_handle.clone();
            window
                .spawn(cx, move |cx: &mut AsyncWindowContext| {
                    let mut cx = cx.clone();
                    async move {
                        let mut phase = 0.0_f64;
                        loop {
                            Timer::after(Duration::from_millis(1500)).await;
                            phase += 0.9;
                            cx.update(|_, cx| {
                                view_for_task.update(cx, |_view, view_cx| {
                                    chart_handle.set_dataset(dataset(phase));
                                    view_cx.notify();
                                });
                            })
                            .ok();
                        }
                    }
                })
                .detach();

            view_handle
        })
        .unwrap();
    });
}

#[cfg(not(feature = "gpui"))]
fn main() {
    eprintln!("Enable the gpui feature to run this example.");
}
