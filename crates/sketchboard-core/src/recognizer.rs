//! Shape inference for the magic tool.
//!
//! A finished gesture is classified by two cheap heuristics:
//!
//! - **Closure**: gestures whose endpoints are far apart, or whose bounding
//!   box is thin in either axis, become a straight line from first to last
//!   point.
//! - **Roundness**: closed gestures are compared against a circle inscribed
//!   in their bounding box. A low mean radial deviation yields a circle,
//!   anything else yields the bounding rectangle.
//!
//! There is no "uncertain" outcome; every input of two or more points maps
//! to exactly one class.

use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Tunables for [`recognize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Endpoint distance at or above which a gesture is treated as open.
    pub closure_threshold: f64,
    /// Bounding box extent at or below which a gesture is treated as a line.
    pub min_extent: f64,
    /// Deviation limit, relative to the ideal radius, for circles.
    pub circle_tolerance: f64,
    /// Number of segments in the synthesized circle (points = segments + 1).
    pub circle_segments: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            closure_threshold: 100.0,
            min_extent: 20.0,
            circle_tolerance: 0.15,
            circle_segments: 60,
        }
    }
}

/// Result class of a recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeClass {
    Line,
    Circle,
    Rectangle,
}

impl ShapeClass {
    pub fn name(self) -> &'static str {
        match self {
            ShapeClass::Line => "line",
            ShapeClass::Circle => "circle",
            ShapeClass::Rectangle => "rectangle",
        }
    }
}

/// A classified gesture with its idealized geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognized {
    pub class: ShapeClass,
    pub points: Vec<Point>,
}

/// Classify a raw gesture and synthesize its idealized point sequence.
///
/// Returns `None` for fewer than two points.
pub fn recognize(points: &[Point], config: &RecognizerConfig) -> Option<Recognized> {
    if points.len() < 2 {
        return None;
    }

    let start = points[0];
    let end = points[points.len() - 1];
    let bounds = geometry::bounding_box(points)?;
    let width = bounds.width();
    let height = bounds.height();
    let closure = geometry::distance(start, end);

    if closure >= config.closure_threshold || width <= config.min_extent || height <= config.min_extent {
        log::trace!("recognized line (closure {closure:.1}, {width:.1}x{height:.1})");
        return Some(Recognized {
            class: ShapeClass::Line,
            points: vec![start, end],
        });
    }

    let center = bounds.center();
    let ideal_radius = (width + height) / 4.0;
    let deviation = geometry::radial_deviation(points, center, ideal_radius);

    if deviation < ideal_radius * config.circle_tolerance {
        log::trace!("recognized circle (r {ideal_radius:.1}, deviation {deviation:.2})");
        Some(Recognized {
            class: ShapeClass::Circle,
            points: circle_points(center, ideal_radius, config.circle_segments),
        })
    } else {
        log::trace!("recognized rectangle (r {ideal_radius:.1}, deviation {deviation:.2})");
        Some(Recognized {
            class: ShapeClass::Rectangle,
            points: vec![
                Point::new(bounds.x0, bounds.y0),
                Point::new(bounds.x1, bounds.y0),
                Point::new(bounds.x1, bounds.y1),
                Point::new(bounds.x0, bounds.y1),
                Point::new(bounds.x0, bounds.y0),
            ],
        })
    }
}

/// Closed polygon of `segments + 1` points around `center`; the last point
/// repeats the first.
fn circle_points(center: Point, radius: f64, segments: usize) -> Vec<Point> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let angle = (i as f64 / segments as f64) * TAU;
            Point::new(center.x + angle.cos() * radius, center.y + angle.sin() * radius)
        })
        .collect()
}
