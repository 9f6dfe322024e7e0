//! Error types for the fallible edges of the engine.
//!
//! Interaction paths (pointer, keyboard, undo/redo) are total and never
//! return errors; only configuration loading can fail.

use thiserror::Error;

/// Engine errors.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for engine operations.
pub type SketchResult<T> = Result<T, SketchError>;
