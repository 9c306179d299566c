//! Drawing persistence.
//!
//! Serialises a [`Drawing`](crate::draw::Drawing) into a versioned JSON
//! document, writes it to disk with locking, optional compression, and backup
//! rotation, and reads it back with size and shape-count limits applied.

mod options;
mod snapshot;
mod storage;

pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, SessionOptions, backup_file_path,
    lock_file_path,
};
pub use snapshot::{CURRENT_VERSION, LoadedDrawing, SaveOutcome, load_drawing, save_drawing};
pub use storage::{ClearOutcome, DrawingInspection, inspect_drawing, remove_drawing};
