//! diskwhy: find out what is consuming disk space under a path.
//!
//! A scan walks the tree once and rolls every counted file up into per-directory totals,
//! per-type totals and an optional list of the largest files:
//!
//! ```no_run
//! use diskwhy::{scan, ReportLimits, ScanOptions};
//! use std::path::Path;
//!
//! let results = scan(Path::new("."), &ScanOptions::default(), &ReportLimits::default())?;
//! println!("{} bytes in {} files", results.totals.total_bytes, results.totals.file_count);
//! # Ok::<(), diskwhy::ScanError>(())
//! ```

mod bounded_heap;
pub mod classify;
pub mod collector;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;
mod path_pool;
pub mod progress;
pub mod scanner;
pub mod size;
pub mod types;

pub use classify::{classify, classify_path, NO_EXTENSION};
pub use collector::{Collector, ReportLimits, ScanSnapshot, TypeTotals};
pub use error::{ScanError, SizeParseError, SkipReason};
pub use scanner::{ScanOptions, Visit, Walk, Walker};
pub use size::parse_size;
pub use types::ScanResults;

use std::path::Path;

/// Walk `root` and return the frozen rollups.
pub fn scan_snapshot(
    root: &Path,
    options: &ScanOptions,
    largest_files: usize,
) -> Result<ScanSnapshot, ScanError> {
    let walk = Walker::new(options.clone()).walk(root)?;
    let mut collector = Collector::new(walk.root(), options.filters(), largest_files);
    for visit in walk {
        collector.record(visit);
    }
    Ok(collector.finish())
}

/// Walk `root` and return the report, cut down to `limits`.
pub fn scan(
    root: &Path,
    options: &ScanOptions,
    limits: &ReportLimits,
) -> Result<ScanResults, ScanError> {
    scan_snapshot(root, options, limits.largest_files).map(|snapshot| snapshot.report(limits))
}
