//! Text annotations placed with the text tool.

use super::ItemId;
use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A committed text label anchored at its baseline origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub(crate) id: ItemId,
    pub position: Point,
    /// Never empty after trimming.
    pub value: String,
    /// Brush size at commit time; the renderer scales the font from it.
    pub brush_size: f64,
}

impl TextAnnotation {
    /// Build an annotation, rejecting blank text.
    pub fn new(position: Point, value: impl Into<String>, brush_size: f64) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            position,
            value,
            brush_size,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Eraser hit on the anchor only; text has no width in this model.
    pub fn hit_test(&self, point: Point, radius: f64) -> bool {
        geometry::distance(self.position, point) <= radius
    }
}
