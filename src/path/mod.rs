//! Path construction and serialization.
//!
//! A [`Path`] is a typed list of moveto/lineto/curveto commands that
//! serializes to the vector-path mini-language accepted by SVG-style
//! renderers: `M x y`, `L x y`, `C x1 y1 x2 y2 x y`, separated by spaces.
//!
//! [`PathBuilder`] turns normalized (or already morphed, device-space) points
//! into a path:
//!
//! 1. scale into device space,
//! 2. drop points with non-finite coordinates,
//! 3. apply the boundary extrapolation policy ([`extrapolate_boundaries`]),
//! 4. emit a smoothed or straight path depending on the strategy.

mod smooth;

use std::fmt;

use tracing::trace;

use crate::dataset::SmoothingStrategy;
use crate::geom::{NormalizedPoint, ScreenPoint, ScreenSize};

/// Horizontal distance the last point is pushed past the right edge.
pub const TAIL_EXTENSION: f64 = 20.0;
/// Horizontal nudge applied to the second-to-last point at the right edge.
pub const TAIL_NUDGE: f64 = 10.0;
/// Index of the point mirrored to the left of a path starting at `x = 0`.
pub const HEAD_MIRROR_INDEX: usize = 4;

/// One path command in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath.
    MoveTo(ScreenPoint),
    /// Straight segment.
    LineTo(ScreenPoint),
    /// Cubic Bezier segment.
    CurveTo {
        /// First control point.
        control_a: ScreenPoint,
        /// Second control point.
        control_b: ScreenPoint,
        /// End point.
        to: ScreenPoint,
    },
}

impl PathCommand {
    /// End point of the command.
    pub fn end(&self) -> ScreenPoint {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => *point,
            Self::CurveTo { to, .. } => *to,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            Self::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            Self::CurveTo {
                control_a,
                control_b,
                to,
            } => write!(
                f,
                "C {} {} {} {} {} {}",
                control_a.x, control_a.y, control_b.x, control_b.y, to.x, to.y
            ),
        }
    }
}

/// A serializable vector path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Access the commands.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Straight segments through every point.
    pub fn polyline(points: &[ScreenPoint]) -> Self {
        let commands = points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                if index == 0 {
                    PathCommand::MoveTo(*point)
                } else {
                    PathCommand::LineTo(*point)
                }
            })
            .collect();
        Self { commands }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

/// Apply the boundary extrapolation policy to device-space points.
///
/// For every strategy except bezier:
/// - a path ending exactly at `x = width` gets two copies of its last point
///   appended; the final copy is pushed [`TAIL_EXTENSION`] past the edge and
///   the middle copy [`TAIL_NUDGE`], so the stroke is not clipped at the edge
///   while every real sample stays in place;
/// - a path starting exactly at `x = 0` gets a leading point mirrored to the
///   left, at `-p[4].x` (or the last point for shorter paths, tail copies
///   included) and the first point's Y, so the first curve segment has a
///   neighbour to bend against.
///
/// For bezier the last point is repeated twice, which makes the B-spline
/// reach the final sample instead of stopping short of it.
pub fn extrapolate_boundaries(
    mut points: Vec<ScreenPoint>,
    strategy: SmoothingStrategy,
    width: f64,
) -> Vec<ScreenPoint> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return points;
    };

    if strategy.is_bezier() {
        points.extend([last, last]);
        return points;
    }

    let extend_tail = last.x == width;
    if extend_tail {
        points.extend([last, last]);
    }
    if first.x == 0.0 {
        let mirrored = points[HEAD_MIRROR_INDEX.min(points.len() - 1)];
        points.insert(0, ScreenPoint::new(-mirrored.x, first.y));
    }
    if extend_tail {
        let len = points.len();
        points[len - 1].x += TAIL_EXTENSION;
        points[len - 2].x += TAIL_NUDGE;
    }
    points
}

/// Builds paths for one chart surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathBuilder {
    strategy: SmoothingStrategy,
    size: ScreenSize,
    smoothing_while_transitioning: bool,
}

impl PathBuilder {
    /// Create a builder for the given strategy and surface size.
    pub fn new(strategy: SmoothingStrategy, size: ScreenSize) -> Self {
        Self {
            strategy,
            size,
            smoothing_while_transitioning: true,
        }
    }

    /// Keep bezier smoothing on while a transition is running.
    ///
    /// When disabled, bezier paths use straight segments until the
    /// transition settles.
    pub fn smoothing_while_transitioning(mut self, enabled: bool) -> Self {
        self.smoothing_while_transitioning = enabled;
        self
    }

    /// Strategy used by this builder.
    pub fn strategy(&self) -> SmoothingStrategy {
        self.strategy
    }

    /// Surface size used by this builder.
    pub fn size(&self) -> ScreenSize {
        self.size
    }

    /// Build a settled path from normalized points.
    pub fn build(&self, points: &[NormalizedPoint], smoothing: f64) -> Path {
        let scaled = points.iter().map(|point| point.to_screen(self.size)).collect();
        self.build_screen(scaled, smoothing, true)
    }

    /// Build a path from device-space points, e.g. the output of a morph.
    pub fn build_screen(&self, points: Vec<ScreenPoint>, smoothing: f64, settled: bool) -> Path {
        let mut points = points;
        points.retain(ScreenPoint::is_finite);
        let points = extrapolate_boundaries(points, self.strategy, self.size.width);
        if points.is_empty() {
            return Path::new();
        }

        let path = if self.should_smooth(smoothing, settled) {
            smooth::smooth_path(&points, self.strategy, smoothing)
        } else {
            Path::polyline(&points)
        };
        trace!(
            points = points.len(),
            commands = path.len(),
            strategy = ?self.strategy,
            "built path"
        );
        path
    }

    fn should_smooth(&self, smoothing: f64, settled: bool) -> bool {
        match self.strategy {
            SmoothingStrategy::Simple | SmoothingStrategy::Complex => smoothing != 0.0,
            SmoothingStrategy::Bezier => self.smoothing_while_transitioning || settled,
            SmoothingStrategy::None => false,
        }
    }
}

/// Build a settled path string from normalized points.
pub fn build_path(
    points: &[NormalizedPoint],
    strategy: SmoothingStrategy,
    smoothing: f64,
    width: f64,
    height: f64,
) -> String {
    PathBuilder::new(strategy, ScreenSize::new(width, height))
        .build(points, smoothing)
        .to_string()
}

/// Close a stroke path into a fill region against the bottom edge.
///
/// The region starts at the bottom-left corner, follows the stroke, and
/// returns along the bottom edge. An empty stroke yields an empty fill.
pub fn fill_path(stroke: &Path, size: ScreenSize) -> Path {
    if stroke.is_empty() {
        return Path::new();
    }
    let bottom_left = ScreenPoint::new(0.0, size.height);
    let mut commands = Vec::with_capacity(stroke.len() + 3);
    commands.push(PathCommand::MoveTo(bottom_left));
    commands.extend(stroke.commands().iter().map(|command| match command {
        PathCommand::MoveTo(point) => PathCommand::LineTo(*point),
        other => *other,
    }));
    commands.push(PathCommand::LineTo(ScreenPoint::new(size.width, size.height)));
    commands.push(PathCommand::LineTo(bottom_left));
    Path { commands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::normalize::normalize;

    fn assert_path_syntax(path: &str) {
        assert!(path.starts_with('M'), "{path}");
        for token in path.split(' ') {
            let is_command = matches!(token, "M" | "L" | "C");
            assert!(is_command || token.parse::<f64>().is_ok_and(f64::is_finite), "{token}");
        }
    }

    fn normalized() -> Vec<NormalizedPoint> {
        let points: Vec<_> = (0..8)
            .map(|i| Point::new(i as f64, ((i * 37) % 11) as f64))
            .collect();
        normalize(&points, None).points
    }

    #[test]
    fn straight_path_serializes_moveto_then_linetos() {
        let points = [
            NormalizedPoint::new(0.25, 0.5, Point::new(0.0, 0.0)),
            NormalizedPoint::new(0.5, 0.0, Point::new(0.0, 0.0)),
        ];
        let path = build_path(&points, SmoothingStrategy::None, 0.0, 100.0, 10.0);
        assert_eq!(path, "M 25 5 L 50 0");
    }

    #[test]
    fn every_strategy_emits_valid_syntax() {
        for strategy in [
            SmoothingStrategy::None,
            SmoothingStrategy::Simple,
            SmoothingStrategy::Complex,
            SmoothingStrategy::Bezier,
        ] {
            for smoothing in [0.0, 0.2, 1.0] {
                let path = build_path(&normalized(), strategy, smoothing, 320.0, 120.0);
                assert_path_syntax(&path);
            }
        }
    }

    #[test]
    fn drops_non_finite_points() {
        let mut points = normalized();
        points[3].y = f64::NAN;
        let builder = PathBuilder::new(SmoothingStrategy::Simple, ScreenSize::new(100.0, 50.0));
        let path = builder.build(&points, 0.3);
        assert_path_syntax(&path.to_string());
        assert!(!path.to_string().contains("NaN"));
    }

    #[test]
    fn mirrors_head_at_left_edge() {
        let points: Vec<_> = (0..6)
            .map(|i| ScreenPoint::new(i as f64 * 10.0, i as f64))
            .collect();
        let out = extrapolate_boundaries(points, SmoothingStrategy::Simple, 1000.0);
        assert_eq!(out.len(), 7);
        assert_eq!(out[0], ScreenPoint::new(-40.0, 0.0));
        assert_eq!(out[1], ScreenPoint::new(0.0, 0.0));
    }

    #[test]
    fn short_head_mirrors_last_point() {
        let points = vec![ScreenPoint::new(0.0, 3.0), ScreenPoint::new(5.0, 1.0)];
        let out = extrapolate_boundaries(points, SmoothingStrategy::None, 100.0);
        assert_eq!(out[0], ScreenPoint::new(-5.0, 3.0));
    }

    #[test]
    fn extends_tail_at_right_edge() {
        let points = vec![
            ScreenPoint::new(10.0, 1.0),
            ScreenPoint::new(50.0, 2.0),
            ScreenPoint::new(100.0, 3.0),
        ];
        let out = extrapolate_boundaries(points, SmoothingStrategy::Complex, 100.0);
        assert_eq!(
            out,
            vec![
                ScreenPoint::new(10.0, 1.0),
                ScreenPoint::new(50.0, 2.0),
                ScreenPoint::new(100.0, 3.0),
                ScreenPoint::new(110.0, 3.0),
                ScreenPoint::new(120.0, 3.0),
            ]
        );
    }

    #[test]
    fn tail_extension_keeps_samples_in_place() {
        let points = normalize(
            &[Point::new(0.0, 0.0), Point::new(1.0, 10.0), Point::new(2.0, 5.0)],
            None,
        )
        .points;
        let path = build_path(&points, SmoothingStrategy::None, 0.0, 100.0, 100.0);
        assert_eq!(path, "M -100 100 L 0 100 L 50 0 L 100 50 L 110 50 L 120 50");
    }

    #[test]
    fn interior_tail_is_left_alone() {
        let points = vec![ScreenPoint::new(10.0, 1.0), ScreenPoint::new(40.0, 2.0)];
        let out = extrapolate_boundaries(points.clone(), SmoothingStrategy::Simple, 100.0);
        assert_eq!(out, points);
    }

    #[test]
    fn bezier_skips_edges_and_clamps_tail() {
        let points = vec![ScreenPoint::new(0.0, 1.0), ScreenPoint::new(100.0, 3.0)];
        let out = extrapolate_boundaries(points, SmoothingStrategy::Bezier, 100.0);
        assert_eq!(
            out,
            vec![
                ScreenPoint::new(0.0, 1.0),
                ScreenPoint::new(100.0, 3.0),
                ScreenPoint::new(100.0, 3.0),
                ScreenPoint::new(100.0, 3.0),
            ]
        );
    }

    #[test]
    fn bezier_path_ends_on_last_sample() {
        let builder = PathBuilder::new(SmoothingStrategy::Bezier, ScreenSize::new(100.0, 100.0));
        let path = builder.build(&normalized(), 0.0);
        let end = path.commands().last().expect("non-empty").end();
        assert!((end.x - 100.0).abs() < 1e-9);
        assert!(path.commands().iter().skip(1).all(|c| matches!(c, PathCommand::CurveTo { .. })));
    }

    #[test]
    fn bezier_waits_for_settle_when_transition_smoothing_is_off() {
        let builder = PathBuilder::new(SmoothingStrategy::Bezier, ScreenSize::new(100.0, 100.0))
            .smoothing_while_transitioning(false);
        let points: Vec<_> = normalized().iter().map(|p| p.to_screen(builder.size())).collect();
        let moving = builder.build_screen(points.clone(), 0.0, false);
        assert!(!moving.to_string().contains('C'));
        let settled = builder.build_screen(points, 0.0, true);
        assert!(settled.to_string().contains('C'));
    }

    #[test]
    fn zero_factor_keeps_simple_straight() {
        let path = build_path(&normalized(), SmoothingStrategy::Simple, 0.0, 100.0, 100.0);
        assert!(!path.contains('C'));
        let curved = build_path(&normalized(), SmoothingStrategy::Simple, 0.2, 100.0, 100.0);
        assert!(curved.contains('C'));
    }

    #[test]
    fn fill_path_closes_against_bottom_edge() {
        let size = ScreenSize::new(200.0, 80.0);
        let stroke = Path::polyline(&[ScreenPoint::new(0.0, 10.0), ScreenPoint::new(200.0, 40.0)]);
        let fill = fill_path(&stroke, size).to_string();
        assert_eq!(fill, "M 0 80 L 0 10 L 200 40 L 200 80 L 0 80");
        assert!(fill_path(&Path::new(), size).is_empty());
    }

    #[test]
    fn empty_input_builds_empty_path() {
        assert_eq!(build_path(&[], SmoothingStrategy::Bezier, 0.5, 10.0, 10.0), "");
    }
}
