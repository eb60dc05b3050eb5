//! gpui_chartpath turns ordered samples into animated line-chart paths.
//! The core is pure geometry: normalization, interpolation, simplification,
//! path building, transition morphing, and pointer readouts. A GPUI view is
//! available behind the `gpui` feature.

#![forbid(unsafe_code)]

pub mod chart;
pub mod config;
pub mod dataset;
pub mod geom;
pub mod gesture;
pub mod guides;
pub mod interpolation;
pub mod morph;
pub mod normalize;
pub mod path;
pub mod simplify;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use chart::{ChartFrame, ChartState, ChartStateBuilder};
pub use config::{
    AnimationConfig, ChartConfig, ChartConfigOverrides, SpringConfig, SpringOverrides,
};
pub use dataset::{Dataset, DatasetError, SmoothingStrategy};
pub use geom::{NormalizedPoint, PlanarPoint, Point, ScreenPoint, ScreenSize};
pub use gesture::{
    GestureMapper, GestureReading, NearestPoint, find_nearest, position_with_margin,
    resolve_nearest,
};
pub use guides::{Guide, GuideConfig, GuideMark, curve_y_at, guide_marks};
pub use interpolation::{Interpolation, interpolate};
pub use morph::{Morpher, Resampling, Transition, morph, transition_smoothing};
pub use normalize::{Extremes, Normalized, normalize, normalize_dataset, try_normalize};
pub use path::{Path, PathBuilder, PathCommand, build_path, fill_path};
pub use simplify::{SimplifyConfig, simplify, simplify_with};
pub use view::Range;

#[cfg(feature = "gpui")]
pub use gpui_backend::{ChartHandle, ChartViewConfig, Color, GpuiChartView};
