use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::InputConfig;
use crate::error::ReportError;

/// List report files directly inside `dir` whose names match the configured
/// prefix and extension, sorted by file name.
pub fn list_reports(dir: &Path, input: &InputConfig) -> Result<Vec<PathBuf>, ReportError> {
    if !dir.is_dir() {
        return Err(ReportError::MissingDirectory(dir.to_path_buf()));
    }

    let mut reports: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.file_name().to_str().is_some_and(|name| {
                name.starts_with(&input.file_prefix) && name.ends_with(&input.file_extension)
            })
        })
        .map(|e| e.into_path())
        .collect();

    // Timestamps in the names share a fixed width, so name order is time order.
    reports.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(reports)
}

/// Pick the most recent report in `dir`.
pub fn find_latest(dir: &Path, input: &InputConfig) -> Result<PathBuf, ReportError> {
    list_reports(dir, input)?
        .pop()
        .ok_or_else(|| ReportError::NoMatchingFiles(dir.to_path_buf()))
}
