//! Polyline strokes drawn with the pen or magic tool.

use super::ItemId;
use crate::geometry;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a stroke was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    /// Raw pointer path.
    Freehand,
    /// Path replaced by a recognized line, circle or rectangle.
    Shape,
}

/// A committed stroke. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ItemId,
    /// Points in paint order.
    pub points: Vec<Point>,
    pub tool: StrokeTool,
    pub brush_size: f64,
}

impl Stroke {
    /// Minimum number of points a stroke needs to be kept.
    pub const MIN_POINTS: usize = 2;

    pub fn new(points: Vec<Point>, tool: StrokeTool, brush_size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            tool,
            brush_size,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Eraser hit: any recorded point strictly inside `radius`.
    ///
    /// Only the vertices are tested, not the segments between them.
    pub fn hit_test(&self, point: Point, radius: f64) -> bool {
        geometry::any_within(&self.points, point, radius)
    }
}

/// Open polyline through `points` (empty path for no points).
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();

    let Some((first, rest)) = points.split_first() else {
        return path;
    };

    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_stroke_creation() {
        let stroke = Stroke::new(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            StrokeTool::Freehand,
            4.0,
        );
        assert_eq!(stroke.len(), 2);
        assert!(!stroke.is_empty());
        assert_eq!(stroke.tool, StrokeTool::Freehand);
    }

    #[test]
    fn test_hit_test_uses_vertices() {
        let stroke = Stroke::new(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            StrokeTool::Freehand,
            4.0,
        );

        assert!(stroke.hit_test(Point::new(5.0, 5.0), 20.0));
        // Midway along the segment but far from both vertices.
        assert!(!stroke.hit_test(Point::new(50.0, 0.0), 20.0));
    }

    #[test]
    fn test_polyline_path() {
        let path = polyline_path(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ]);
        let elements = path.elements();
        assert_eq!(elements.len(), 3);
        assert!(matches!(elements[0], PathEl::MoveTo(_)));
        assert!(matches!(elements[2], PathEl::LineTo(_)));
        assert!(polyline_path(&[]).elements().is_empty());
    }
}
