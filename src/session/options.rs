use crate::config::{SessionCompression, SessionConfig};
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB

/// Compression preference for saved drawings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

impl From<SessionCompression> for CompressionMode {
    fn from(value: SessionCompression) -> Self {
        match value {
            SessionCompression::Auto => CompressionMode::Auto,
            SessionCompression::On => CompressionMode::On,
            SessionCompression::Off => CompressionMode::Off,
        }
    }
}

/// Runtime limits and format choices for saving and loading drawings.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub max_shapes: usize,
    pub max_file_size_bytes: u64,
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    /// Whether the previous file is kept as `<name>.bak` (0 removes it)
    pub backup_retention: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_shapes: 10_000,
            max_file_size_bytes: 10 * 1024 * 1024,
            compression: CompressionMode::Auto,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            backup_retention: 1,
        }
    }
}

impl SessionOptions {
    /// Build runtime options from configuration values.
    pub fn from_config(session_cfg: &SessionConfig) -> Self {
        Self {
            max_shapes: session_cfg.max_shapes,
            max_file_size_bytes: session_cfg
                .max_file_size_mb
                .saturating_mul(1024 * 1024)
                .max(1),
            compression: session_cfg.compress.into(),
            auto_compress_threshold_bytes: session_cfg
                .auto_compress_threshold_kb
                .saturating_mul(1024)
                .max(1),
            backup_retention: session_cfg.backup_retention,
        }
    }
}

/// `<file>.bak` beside the drawing file.
pub fn backup_file_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, ".bak")
}

/// `<file>.lock` beside the drawing file.
pub fn lock_file_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, ".lock")
}

pub(crate) fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
