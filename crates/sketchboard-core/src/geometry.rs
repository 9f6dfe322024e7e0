//! Point-set helpers shared by the shape recognizer and the eraser.

use kurbo::{Point, Rect};

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Axis-aligned bounding box of a point sequence.
///
/// Returns `None` for an empty sequence.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;

    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;

    for point in &points[1..] {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Some(Rect::new(min_x, min_y, max_x, max_y))
}

/// Arithmetic mean of a point sequence.
///
/// The recognizer centres shapes on the bounding box, not on this.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Mean absolute deviation of each point's distance to `center` from `radius`.
///
/// This is the "variance" the recognizer compares against its circle
/// tolerance. Empty input yields 0.
pub fn radial_deviation(points: &[Point], center: Point, radius: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let total: f64 = points
        .iter()
        .map(|p| (distance(*p, center) - radius).abs())
        .sum();
    total / points.len() as f64
}

/// True if any point lies strictly closer than `radius` to `target`.
pub fn any_within(points: &[Point], target: Point, radius: f64) -> bool {
    points.iter().any(|p| distance(*p, target) < radius)
}
