use crate::geom::Point;

/// Staircase through the samples.
///
/// Each sample is held horizontally until the next sample's X, then jumps
/// vertically: `[p0, (p1.x, p0.y), p1, (p2.x, p1.y), p2, ...]`. `n` samples
/// produce `2n - 1` points.
pub fn step(points: &[Point]) -> Vec<Point> {
    let mut out = Vec::with_capacity((points.len() * 2).saturating_sub(1));
    for (index, point) in points.iter().enumerate() {
        out.push(*point);
        if let Some(next) = points.get(index + 1) {
            out.push(Point::new(next.x, point.y));
        }
    }
    out
}
