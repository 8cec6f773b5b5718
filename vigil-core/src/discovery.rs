//! File discovery module for finding video files to process.
//!
//! Scans the top level of the provided directory for video files with a
//! supported container extension (case-insensitive). Subdirectories are not
//! searched. Results are sorted by file name so discovery order, and
//! therefore the order of the persisted results mapping, is deterministic
//! regardless of filesystem iteration order.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Container extensions eligible for processing.
const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "avi", "mov"];

/// Finds video files eligible for processing in the specified directory.
///
/// # Arguments
///
/// * `input_dir` - The directory to search for video files
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths to the discovered video files, sorted by name
/// * `Err(CoreError::Io)` - If the directory cannot be read
/// * `Err(CoreError::NoFilesFound)` - If no matching files are found
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext_str| {
                    VIDEO_EXTENSIONS
                        .iter()
                        .any(|candidate| ext_str.eq_ignore_ascii_case(candidate))
                })
                .map(|_| path.clone())
        })
        .collect();

    // Filesystem iteration order is not guaranteed; sort by file name so
    // repeated runs over the same directory process videos identically.
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}
