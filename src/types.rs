use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// The report handed to renderers once a scan has finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResults {
    pub scanned_path: String,
    pub totals: Totals,
    pub filters: Filters,
    pub top_dirs: Vec<DirEntry>,
    pub top_types: Vec<TypeEntry>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub largest_files: Option<Vec<FileEntry>>,
    pub skipped: Vec<SkippedPath>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_bytes: u64,
    pub file_count: u64,
    pub dir_count: u64,
    pub skipped_paths: u64,
    /// Files that were visited but did not pass the active filters.
    pub filtered_files: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_age_days: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub path: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub type_key: String,
    pub bytes: u64,
    pub file_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPath {
    pub path: String,
    pub reason: String,
}

/// A counted regular file, produced by the walker and consumed straight away by the collector.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub type_key: String,
}
