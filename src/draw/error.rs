//! Error types for shape persistence and raster output.

use thiserror::Error;

/// Errors raised while encoding or decoding a persisted shape.
#[derive(Debug, Error)]
pub enum ShapeCodecError {
    /// The payload declares a different shape type than the one requested.
    #[error("wrong shape type: expected `{expected}`, found `{found}`")]
    WrongShapeType {
        expected: &'static str,
        found: String,
    },

    /// The payload declares a type tag no shape kind claims.
    #[error("unknown shape type `{0}`")]
    UnknownShapeType(String),

    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The payload is not a JSON object.
    #[error("shape payload must be an object")]
    NotAnObject,

    /// Field-level parse failure (missing field, wrong value type, ...).
    #[error("malformed shape payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised while allocating surfaces or producing raster output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("failed to write png: {0}")]
    Png(#[from] cairo::IoError),

    #[error("failed to open output: {0}")]
    Io(#[from] std::io::Error),
}
