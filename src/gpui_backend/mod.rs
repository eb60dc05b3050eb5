//! GPUI integration for gpui_chartpath.
//!
//! This module provides a GPUI view that paints a
//! [`ChartState`](crate::chart::ChartState) frame, animates dataset
//! transitions, and feeds pointer positions into the gesture readout.

mod config;
mod frame;
mod paint;
mod state;
mod view;

pub use config::{ChartViewConfig, Color};
pub use view::{ChartHandle, GpuiChartView};
