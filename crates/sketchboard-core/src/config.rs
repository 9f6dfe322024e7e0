//! Engine configuration.

use crate::error::{SketchError, SketchResult};
use crate::recognizer::RecognizerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When an eraser drag lands in undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErasePolicy {
    /// One history entry per drag, recorded at pointer-up if anything was
    /// removed. A single undo restores the whole drag.
    #[default]
    Gesture,
    /// The first removal of a drag is committed; later removals in the same
    /// drag only touch the live scene.
    FirstHit,
}

/// Tunable constants for the sketch engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub default_brush_size: f64,
    pub min_brush_size: f64,
    pub max_brush_size: f64,
    /// Stroke eraser radius = brush size x this factor.
    pub eraser_radius_factor: f64,
    /// Fixed eraser radius around text anchors.
    pub text_hit_radius: f64,
    /// Text font size = brush size x this factor.
    pub text_font_factor: f64,
    pub erase_policy: ErasePolicy,
    pub recognizer: RecognizerConfig,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            default_brush_size: 4.0,
            min_brush_size: 1.0,
            max_brush_size: 20.0,
            eraser_radius_factor: 5.0,
            text_hit_radius: 50.0,
            text_font_factor: 6.0,
            erase_policy: ErasePolicy::default(),
            recognizer: RecognizerConfig::default(),
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SketchResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded sketch config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> SketchResult<()> {
        if !(self.min_brush_size > 0.0) {
            return Err(SketchError::InvalidConfig(format!(
                "min_brush_size must be positive, got {}",
                self.min_brush_size
            )));
        }
        if self.min_brush_size > self.max_brush_size {
            return Err(SketchError::InvalidConfig(format!(
                "brush range {}..={} is inverted",
                self.min_brush_size, self.max_brush_size
            )));
        }
        if !(self.min_brush_size..=self.max_brush_size).contains(&self.default_brush_size) {
            return Err(SketchError::InvalidConfig(format!(
                "default_brush_size {} outside {}..={}",
                self.default_brush_size, self.min_brush_size, self.max_brush_size
            )));
        }
        let positive = [
            ("eraser_radius_factor", self.eraser_radius_factor),
            ("text_hit_radius", self.text_hit_radius),
            ("text_font_factor", self.text_font_factor),
            ("recognizer.closure_threshold", self.recognizer.closure_threshold),
            ("recognizer.circle_tolerance", self.recognizer.circle_tolerance),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SketchError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        if self.recognizer.min_extent < 0.0 {
            return Err(SketchError::InvalidConfig("recognizer.min_extent must not be negative".into()));
        }
        if self.recognizer.circle_segments < 3 {
            return Err(SketchError::InvalidConfig(format!(
                "recognizer.circle_segments must be at least 3, got {}",
                self.recognizer.circle_segments
            )));
        }
        Ok(())
    }

    /// Eraser radius for strokes at the given brush size.
    pub fn stroke_erase_radius(&self, brush_size: f64) -> f64 {
        brush_size * self.eraser_radius_factor
    }
}
