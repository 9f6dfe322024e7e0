//! Tool system for the sketch board.

use crate::config::SketchConfig;
use crate::items::{Item, StrokeTool};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Freehand pen.
    #[default]
    Pen,
    /// Freehand gesture snapped to a line, circle or rectangle.
    Magic,
    Text,
    Eraser,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 4] = [ToolKind::Pen, ToolKind::Magic, ToolKind::Text, ToolKind::Eraser];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Magic => "Magic",
            ToolKind::Text => "Text",
            ToolKind::Eraser => "Eraser",
        }
    }
}

/// Toolbar state passed with every pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub tool: ToolKind,
    brush_size: f64,
    min_brush_size: f64,
    max_brush_size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&SketchConfig::default())
    }
}

impl ToolSettings {
    /// Default tool with the configured default brush and brush range.
    pub fn from_config(config: &SketchConfig) -> Self {
        Self {
            tool: ToolKind::default(),
            brush_size: config.default_brush_size,
            min_brush_size: config.min_brush_size,
            max_brush_size: config.max_brush_size,
        }
    }

    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_brush_size(mut self, size: f64) -> Self {
        self.set_brush_size(size);
        self
    }

    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    /// Set the brush size, clamped to the configured range.
    pub fn set_brush_size(&mut self, size: f64) {
        self.brush_size = if size.is_nan() {
            self.min_brush_size
        } else {
            size.clamp(self.min_brush_size, self.max_brush_size)
        };
    }

    pub fn brush_range(&self) -> std::ops::RangeInclusive<f64> {
        self.min_brush_size..=self.max_brush_size
    }
}

/// Inline text field opened by the text tool.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraft {
    /// Where the annotation will be anchored.
    pub anchor: Point,
    pub value: String,
    /// Brush size when the field was opened.
    pub brush_size: f64,
}

impl TextDraft {
    pub fn new(anchor: Point, brush_size: f64) -> Self {
        Self {
            anchor,
            value: String::new(),
            brush_size,
        }
    }
}

/// State of the pointer interaction.
#[derive(Debug, Clone, Default)]
pub enum Interaction {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// Pen or magic tool held down; points recorded in arrival order.
    Drawing {
        tool: StrokeTool,
        brush_size: f64,
        points: Vec<Point>,
    },
    /// Eraser held down.
    Erasing {
        /// Scene at pointer-down.
        base: Vec<Item>,
        /// Something was removed during this drag.
        removed: bool,
        /// A history entry was already recorded for this drag.
        committed: bool,
    },
    /// Text field open, waiting for Enter or Escape.
    TextPending(TextDraft),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::Drawing { .. } => "drawing",
            Interaction::Erasing { .. } => "erasing",
            Interaction::TextPending(_) => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolbar_order() {
        let labels: Vec<_> = ToolKind::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["Pen", "Magic", "Text", "Eraser"]);
    }

    #[test]
    fn test_default_settings() {
        let settings = ToolSettings::default();
        assert_eq!(settings.tool, ToolKind::Pen);
        assert!((settings.brush_size() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_brush_clamped() {
        let mut settings = ToolSettings::default();
        settings.set_brush_size(50.0);
        assert!((settings.brush_size() - 20.0).abs() < f64::EPSILON);
        settings.set_brush_size(0.0);
        assert!((settings.brush_size() - 1.0).abs() < f64::EPSILON);
        settings.set_brush_size(f64::NAN);
        assert!((settings.brush_size() - 1.0).abs() < f64::EPSILON);
        settings.set_brush_size(12.0);
        assert!((settings.brush_size() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder() {
        let settings = ToolSettings::default().with_tool(ToolKind::Eraser).with_brush_size(8.0);
        assert_eq!(settings.tool, ToolKind::Eraser);
        assert!((settings.brush_size() - 8.0).abs() < f64::EPSILON);
    }
}
