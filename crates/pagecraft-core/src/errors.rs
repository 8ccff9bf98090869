//! Error types for pagecraft.

use thiserror::Error;

/// Errors raised while reading or addressing a layout document.
///
/// The editor never surfaces these to the user: the lenient loading path
/// recovers from them and host handlers short-circuit on them.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },

    #[error("Unknown block type: {tag}")]
    UnknownBlockType { tag: String },

    #[error("Block not found: {id}")]
    BlockNotFound { id: String },
}

/// Errors during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatting error during export")]
    Fmt(#[from] std::fmt::Error),

    #[error("Cannot export an empty surface ({width}x{height})")]
    EmptySurface { width: f64, height: f64 },
}
