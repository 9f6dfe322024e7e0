//! Sketchboard Application
//!
//! The application shell providing windowing, input handling,
//! and integration of the engine, renderer and toolbar.

mod app;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{render_ui, UiAction, UiState};
