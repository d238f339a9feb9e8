//! Builds the in-memory image matrix for a dataset directory.
//!
//! Every image is decoded and normalized up front and held in memory for
//! the whole scan. That bounds dataset size to available memory and is a
//! known ceiling of this tool, not something to work around here.

use crate::core::preprocess::{self, PreprocessConfig};
use crate::error::LoadError;
use image::GrayImage;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// A decoded, normalized dataset image.
///
/// Created during loading and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub filename: String,
    pub path: PathBuf,
    pub pixels: GrayImage,
    /// On-disk size; the quality resolver compares these
    pub byte_size: u64,
}

/// The image matrix plus how long it took to build.
#[derive(Debug)]
pub struct LoadResult {
    pub records: Vec<ImageRecord>,
    pub elapsed: Duration,
}

/// Load every image in `directory`, in filename order.
///
/// Subdirectories are skipped. Files are sniffed by content, not
/// extension; anything that does not sniff as an image is skipped
/// silently. A file that sniffs as an image but fails to decode aborts the
/// run, as does any OS-level read error.
pub fn load_directory(
    directory: &Path,
    config: &PreprocessConfig,
) -> Result<LoadResult, LoadError> {
    let start = Instant::now();

    if !directory.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }

    let read_dir_error = |source| LoadError::ReadDirectory {
        path: directory.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(directory)
        .map_err(read_dir_error)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_dir_error)?;
    // read_dir order is platform-arbitrary; pin it so scan order, report
    // keys, and the search/compare roles are deterministic
    entries.sort_by_key(|entry| entry.file_name());

    let mut records = Vec::new();
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        let bytes = fs::read(&path).map_err(|source| LoadError::ReadFile {
            path: path.clone(),
            source,
        })?;

        let Ok(format) = image::guess_format(&bytes) else {
            continue; // not an image
        };

        let decoded =
            image::load_from_memory_with_format(&bytes, format).map_err(|error| {
                LoadError::Decode {
                    path: path.clone(),
                    reason: error.to_string(),
                }
            })?;

        records.push(ImageRecord {
            filename: entry.file_name().to_string_lossy().into_owned(),
            path,
            pixels: preprocess::normalize(&decoded, config),
            byte_size: bytes.len() as u64,
        });
    }

    let elapsed = start.elapsed();
    info!(
        images = records.len(),
        elapsed_s = elapsed.as_secs_f64(),
        "image matrix built"
    );

    Ok(LoadResult { records, elapsed })
}
