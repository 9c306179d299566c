use super::options::{CompressionMode, SessionOptions, backup_file_path, lock_file_path};
use crate::draw::{Drawing, Shape};
use crate::util::Size;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const CURRENT_VERSION: u32 = 1;

/// On-disk document. Shapes stay as raw JSON until decoded one by one so a
/// bad entry can be reported by index.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DrawingFile {
    pub(crate) version: u32,
    pub(crate) last_modified: String,
    pub(crate) size: Size,
    #[serde(default)]
    pub(crate) shapes: Vec<Value>,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub bytes_written: u64,
    pub compressed: bool,
    pub backed_up: bool,
}

/// A drawing read back from disk.
#[derive(Debug)]
pub struct LoadedDrawing {
    pub drawing: Drawing,
    pub version: u32,
    pub last_modified: Option<DateTime<Utc>>,
    pub compressed: bool,
    /// Shapes dropped because the file exceeded `max_shapes`
    pub truncated: usize,
}

/// Writes `drawing` to `path`.
///
/// The payload goes to a temporary file first and is renamed into place; an
/// existing file is rotated to `<path>.bak` when backups are enabled. Writers
/// and readers of the same path serialize on `<path>.lock`.
pub fn save_drawing(drawing: &Drawing, path: &Path, options: &SessionOptions) -> Result<SaveOutcome> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    with_lock(path, true, || save_drawing_inner(drawing, path, options))
}

fn save_drawing_inner(drawing: &Drawing, path: &Path, options: &SessionOptions) -> Result<SaveOutcome> {
    let shapes = drawing
        .shapes()
        .iter()
        .map(Shape::encode)
        .collect::<Result<Vec<_>, _>>()
        .context("failed to encode shapes")?;

    let file_payload = DrawingFile {
        version: CURRENT_VERSION,
        last_modified: Utc::now().to_rfc3339(),
        size: drawing.size(),
        shapes,
    };

    let mut bytes =
        serde_json::to_vec_pretty(&file_payload).context("failed to serialise drawing")?;

    if bytes.len() as u64 > options.max_file_size_bytes {
        bail!(
            "drawing data size {} bytes exceeds the configured limit of {} bytes",
            bytes.len(),
            options.max_file_size_bytes
        );
    }

    let compressed = match options.compression {
        CompressionMode::Off => false,
        CompressionMode::On => true,
        CompressionMode::Auto => (bytes.len() as u64) >= options.auto_compress_threshold_bytes,
    };

    if compressed {
        bytes = compress_bytes(&bytes)?;
    }

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| format!("failed to open temporary file {}", tmp_path.display()))?;
        tmp_file
            .write_all(&bytes)
            .context("failed to write drawing payload")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary file")?;
    }

    let mut backed_up = false;
    if path.exists() {
        let backup_path = backup_file_path(path);
        if options.backup_retention > 0 {
            if backup_path.exists() {
                fs::remove_file(&backup_path).ok();
            }
            fs::rename(path, &backup_path).with_context(|| {
                format!(
                    "failed to rotate previous file {} -> {}",
                    path.display(),
                    backup_path.display()
                )
            })?;
            backed_up = true;
        } else {
            fs::remove_file(path).ok();
        }
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to move temporary file {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    info!(
        "Drawing saved to {} ({} shapes, {} bytes, compression={})",
        path.display(),
        drawing.len(),
        bytes.len(),
        compressed
    );

    Ok(SaveOutcome {
        bytes_written: bytes.len() as u64,
        compressed,
        backed_up,
    })
}

/// Reads a drawing saved by [`save_drawing`].
///
/// Fails on files over the size limit, unsupported versions, and any shape
/// whose payload does not decode. Shapes beyond `max_shapes` are dropped
/// with a warning.
pub fn load_drawing(path: &Path, options: &SessionOptions) -> Result<LoadedDrawing> {
    let metadata =
        fs::metadata(path).with_context(|| format!("failed to stat {}", path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        bail!(
            "{} is {} bytes which exceeds the configured limit ({} bytes)",
            path.display(),
            metadata.len(),
            options.max_file_size_bytes
        );
    }

    let (file, compressed) = with_lock(path, false, || read_drawing_file(path))?;
    if file.version > CURRENT_VERSION {
        bail!(
            "{} uses format version {} (newest supported is {})",
            path.display(),
            file.version,
            CURRENT_VERSION
        );
    }

    let last_modified = DateTime::parse_from_rfc3339(&file.last_modified)
        .map(|time| time.with_timezone(&Utc))
        .inspect_err(|err| warn!("Ignoring invalid last_modified in {}: {}", path.display(), err))
        .ok();

    let mut values = file.shapes;
    let truncated = values.len().saturating_sub(options.max_shapes);
    if truncated > 0 {
        warn!(
            "{} contains {} shapes which exceeds the limit of {}; truncating",
            path.display(),
            values.len(),
            options.max_shapes
        );
        values.truncate(options.max_shapes);
    }

    let shapes = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            Shape::decode(value).with_context(|| format!("failed to decode shape {index}"))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Loaded {} shapes from {} (compressed={})",
        shapes.len(),
        path.display(),
        compressed
    );

    Ok(LoadedDrawing {
        drawing: Drawing::with_shapes(file.size, shapes),
        version: file.version,
        last_modified,
        compressed,
        truncated,
    })
}

/// Reads and parses the document without decoding its shapes.
pub(crate) fn read_drawing_file(path: &Path) -> Result<(DrawingFile, bool)> {
    let mut file_bytes = Vec::new();
    {
        let mut file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        file.read_to_end(&mut file_bytes)
            .context("failed to read drawing file")?;
    }

    let compressed = is_gzip(&file_bytes);
    let decompressed = if compressed {
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("failed to decompress drawing file")?;
        out
    } else {
        file_bytes
    };

    let drawing_file: DrawingFile =
        serde_json::from_slice(&decompressed).context("failed to parse drawing json")?;
    Ok((drawing_file, compressed))
}

/// Runs `f` while holding the advisory lock for `path`.
pub(crate) fn with_lock<T>(path: &Path, exclusive: bool, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let lock_path = lock_file_path(path);
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open lock file {}", lock_path.display()))?;

    let locked = if exclusive {
        lock_file.lock_exclusive()
    } else {
        lock_file.lock_shared()
    };
    locked.with_context(|| format!("failed to lock {}", lock_path.display()))?;

    let result = f();

    lock_file.unlock().unwrap_or_else(|err| {
        warn!("failed to unlock {}: {}", lock_path.display(), err)
    });

    result
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress drawing payload")?;
    encoder
        .finish()
        .context("failed to finalise compressed drawing payload")
}

pub(crate) fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = super::options::sibling_with_suffix(target, ".tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = super::options::sibling_with_suffix(target, &format!(".tmp{counter}"));
    }
    candidate
}
