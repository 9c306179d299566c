use super::options::{backup_file_path, lock_file_path};
use super::snapshot::{self, CURRENT_VERSION};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Result of removing a saved drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    pub removed_file: bool,
    pub removed_backup: bool,
    pub removed_lock: bool,
}

/// Summary information about a saved drawing for CLI reporting.
#[derive(Debug, Clone)]
pub struct DrawingInspection {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<SystemTime>,
    pub backup_path: PathBuf,
    pub backup_exists: bool,
    pub compressed: bool,
    pub version: u32,
    pub supported: bool,
    pub last_modified: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Shape count per type tag; entries without a string tag count as `?`
    pub shape_counts: BTreeMap<String, usize>,
}

impl DrawingInspection {
    pub fn total_shapes(&self) -> usize {
        self.shape_counts.values().sum()
    }
}

/// Reads the document header and tallies shape tags without decoding shapes,
/// so files with unknown shape kinds can still be inspected.
pub fn inspect_drawing(path: &Path) -> Result<DrawingInspection> {
    let metadata =
        fs::metadata(path).with_context(|| format!("failed to stat {}", path.display()))?;
    let (file, compressed) =
        snapshot::with_lock(path, false, || snapshot::read_drawing_file(path))?;

    let mut shape_counts = BTreeMap::new();
    for shape in &file.shapes {
        let tag = shape
            .get(crate::draw::shape::TYPE_KEY)
            .and_then(Value::as_str)
            .unwrap_or("?");
        *shape_counts.entry(tag.to_string()).or_insert(0) += 1;
    }

    let backup_path = backup_file_path(path);
    Ok(DrawingInspection {
        path: path.to_path_buf(),
        size_bytes: metadata.len(),
        modified: metadata.modified().ok(),
        backup_exists: backup_path.exists(),
        backup_path,
        compressed,
        version: file.version,
        supported: file.version <= CURRENT_VERSION,
        last_modified: file.last_modified,
        canvas_width: file.size.width,
        canvas_height: file.size.height,
        shape_counts,
    })
}

/// Removes a saved drawing together with its backup and lock file.
pub fn remove_drawing(path: &Path) -> Result<ClearOutcome> {
    Ok(ClearOutcome {
        removed_file: remove_file_if_exists(path)?,
        removed_backup: remove_file_if_exists(&backup_file_path(path))?,
        removed_lock: remove_file_if_exists(&lock_file_path(path))?,
    })
}

fn remove_file_if_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
        Ok(true)
    } else {
        Ok(false)
    }
}
