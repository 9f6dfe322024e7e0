//! Items that make up a sketch scene.

mod stroke;
mod text;

pub use stroke::{polyline_path, Stroke, StrokeTool};
pub use text::TextAnnotation;

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for items.
pub type ItemId = Uuid;

/// Anything that can sit on the board. Paint order is scene order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    #[serde(rename = "path")]
    Stroke(Stroke),
    Text(TextAnnotation),
}

impl Item {
    pub fn id(&self) -> ItemId {
        match self {
            Item::Stroke(s) => s.id(),
            Item::Text(t) => t.id(),
        }
    }

    pub fn brush_size(&self) -> f64 {
        match self {
            Item::Stroke(s) => s.brush_size,
            Item::Text(t) => t.brush_size,
        }
    }

    /// Whether an eraser at `point` removes this item.
    ///
    /// Strokes use `stroke_radius` (scaled from the eraser's brush size),
    /// text anchors use the fixed `text_radius`.
    pub fn hit_by_eraser(&self, point: Point, stroke_radius: f64, text_radius: f64) -> bool {
        match self {
            Item::Stroke(s) => s.hit_test(point, stroke_radius),
            Item::Text(t) => t.hit_test(point, text_radius),
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Item::Stroke(s) => Some(s),
            Item::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextAnnotation> {
        match self {
            Item::Text(t) => Some(t),
            Item::Stroke(_) => None,
        }
    }
}

impl From<Stroke> for Item {
    fn from(stroke: Stroke) -> Self {
        Item::Stroke(stroke)
    }
}

impl From<TextAnnotation> for Item {
    fn from(text: TextAnnotation) -> Self {
        Item::Text(text)
    }
}
