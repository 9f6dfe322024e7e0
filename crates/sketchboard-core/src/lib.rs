//! Sketchboard Core Library
//!
//! Platform-agnostic scene model, shape recognition, undo history and the
//! pointer state machine for the sketch board.

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod items;
pub mod recognizer;
pub mod theme;
pub mod tools;

pub use canvas::{Preview, SketchDocument, Sketchboard};
pub use config::{ErasePolicy, SketchConfig};
pub use error::{SketchError, SketchResult};
pub use input::{KeyEvent, PointerEvent};
pub use items::{Item, ItemId, Stroke, StrokeTool, TextAnnotation};
pub use recognizer::{recognize, Recognized, RecognizerConfig, ShapeClass};
pub use theme::{Rgba, Theme};
pub use tools::{Interaction, TextDraft, ToolKind, ToolSettings};
