/// RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Configuration for the GPUI chart view.
#[derive(Debug, Clone)]
pub struct ChartViewConfig {
    /// Stroke width in pixels.
    pub stroke_width: f32,
    /// Stroke color.
    pub stroke: Color,
    /// Area fill under the stroke; `None` disables the fill.
    pub fill: Option<Color>,
    /// Marker radius in pixels.
    pub marker_radius: f32,
    /// Marker color.
    pub marker: Color,
    /// Draw vertical guides.
    pub show_guides: bool,
    /// Guide rule color.
    pub guide: Color,
    /// Guide label size in pixels.
    pub label_size: f32,
    /// Background color.
    pub background: Color,
    /// Resolve the pointer while hovering, not only while pressed.
    pub track_hover: bool,
}

impl Default for ChartViewConfig {
    fn default() -> Self {
        let accent = Color::new(0.2, 0.8, 0.95, 1.0);
        Self {
            stroke_width: 2.0,
            stroke: accent,
            fill: Some(accent.with_alpha(0.15)),
            marker_radius: 5.0,
            marker: accent,
            show_guides: false,
            guide: Color::new(0.5, 0.5, 0.55, 0.4),
            label_size: 11.0,
            background: Color::new(0.08, 0.08, 0.1, 1.0),
            track_hover: false,
        }
    }
}
