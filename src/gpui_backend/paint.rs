use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, PathBuilder, Pixels, Point, TextRun, Window, font,
    point, px, quad,
};

use crate::geom::ScreenPoint;
use crate::gesture::GestureReading;
use crate::guides::GuideMark;
use crate::path::{Path, PathCommand};

use super::config::{ChartViewConfig, Color};
use super::frame::ChartViewFrame;

pub(crate) fn paint_frame(
    frame: &ChartViewFrame,
    config: &ChartViewConfig,
    window: &mut Window,
    cx: &mut App,
) {
    let origin = frame.origin;
    if let Some(fill) = config.fill {
        paint_fill(window, &frame.chart.fill_path, origin, fill);
    }
    if config.show_guides {
        paint_guides(window, cx, &frame.chart.guides, frame, config);
    }
    paint_stroke(window, &frame.chart.path, origin, config);
    if let Some(reading) = &frame.chart.reading {
        paint_marker(window, reading, origin, config);
    }
}

fn replay(builder: &mut PathBuilder, path: &Path, origin: ScreenPoint) {
    let at = |p: ScreenPoint| to_point(origin, p);
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => builder.move_to(at(p)),
            PathCommand::LineTo(p) => builder.line_to(at(p)),
            PathCommand::CurveTo {
                control_a,
                control_b,
                to,
            } => builder.cubic_bezier_to(at(to), at(control_a), at(control_b)),
        }
    }
}

fn paint_stroke(window: &mut Window, path: &Path, origin: ScreenPoint, config: &ChartViewConfig) {
    if path.is_empty() {
        return;
    }
    let mut builder = PathBuilder::stroke(px(config.stroke_width.max(0.5)));
    replay(&mut builder, path, origin);
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(config.stroke));
    }
}

fn paint_fill(window: &mut Window, path: &Path, origin: ScreenPoint, color: Color) {
    if path.is_empty() {
        return;
    }
    let mut builder = PathBuilder::fill();
    replay(&mut builder, path, origin);
    builder.close();
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(color));
    }
}

fn paint_guides(
    window: &mut Window,
    cx: &mut App,
    guides: &[GuideMark],
    frame: &ChartViewFrame,
    config: &ChartViewConfig,
) {
    let origin = frame.origin;
    let bottom = frame.size.height;
    let mut builder = PathBuilder::stroke(px(1.0));
    for guide in guides {
        builder.move_to(to_point(origin, ScreenPoint::new(guide.x, guide.y)));
        builder.line_to(to_point(origin, ScreenPoint::new(guide.x, bottom)));
    }
    if !guides.is_empty()
        && let Ok(path) = builder.build()
    {
        window.paint_path(path, to_rgba(config.guide));
    }
    for guide in guides {
        if let Some(label) = guide.label_x {
            let position = ScreenPoint::new(
                origin.x + guide.x + 3.0,
                origin.y + bottom - config.label_size as f64 - 2.0,
            );
            paint_text(window, cx, position, &format_label(label), config);
        }
    }
}

fn paint_marker(
    window: &mut Window,
    reading: &GestureReading,
    origin: ScreenPoint,
    config: &ChartViewConfig,
) {
    let radius = config.marker_radius.max(1.0);
    let center = to_point(origin, reading.marker);
    let bounds = Bounds::from_corners(
        point(center.x - px(radius), center.y - px(radius)),
        point(center.x + px(radius), center.y + px(radius)),
    );
    window.paint_quad(quad(
        bounds,
        Corners::all(px(radius)),
        to_rgba(config.marker),
        Edges::all(px(0.0)),
        to_rgba(config.marker),
        BorderStyle::default(),
    ));
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    config: &ChartViewConfig,
) {
    if text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(config.guide.with_alpha(1.0)),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(config.label_size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let origin = point(px(position.x as f32), px(position.y as f32));
    let _ = shaped.paint(origin, line_height, window, cx);
}

pub(crate) fn format_label(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn to_point(origin: ScreenPoint, p: ScreenPoint) -> Point<Pixels> {
    point(px((origin.x + p.x) as f32), px((origin.y + p.y) as f32))
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}
