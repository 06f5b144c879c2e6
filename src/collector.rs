use crate::bounded_heap::BoundedMinHeap;
use crate::path_pool::PathPool;
use crate::scanner::Visit;
use crate::types::{
    DirEntry, FileEntry, FileRecord, Filters, ScanResults, SkippedPath, Totals, TypeEntry,
};
use log::{debug, info, trace};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// A counted file ranked by size, earlier files first on equal size.
#[derive(Debug, Clone, Eq, PartialEq)]
struct RankedFile {
    path: PathBuf,
    size: u64,
    seq: u64,
}

impl Ord for RankedFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size
            .cmp(&other.size)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for RankedFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A directory (or type) total ranked by bytes, then by name ascending.
#[derive(Debug, Clone, Eq, PartialEq)]
struct Ranked<K: Ord> {
    key: K,
    bytes: u64,
}

impl<K: Ord> Ord for Ranked<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes
            .cmp(&other.bytes)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl<K: Ord> PartialOrd for Ranked<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeTotals {
    pub bytes: u64,
    pub file_count: u64,
}

/// How much of each rollup ends up in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    pub top_dirs: usize,
    pub top_types: usize,
    /// Size of the largest-files list. Zero turns the list off entirely.
    pub largest_files: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            top_dirs: 10,
            top_types: 10,
            largest_files: 0,
        }
    }
}

/// Single-pass collector fed one [`Visit`] at a time.
///
/// It keeps four rollups up to date as the walk goes:
/// 1. Scan-wide counters and the skipped-path list
/// 2. Per-directory byte totals, rolled up into every ancestor
/// 3. Per-type byte totals and file counts
/// 4. The K largest files, in a bounded heap (only when K > 0)
pub struct Collector {
    root: PathBuf,
    filters: Filters,

    // Directory rollup: dir id -> bytes of all counted files below it
    dirs: PathPool,
    dir_bytes: Vec<u64>,

    type_totals: HashMap<String, TypeTotals>,

    top_files: Option<BoundedMinHeap<RankedFile>>,
    seq: u64,

    totals: Totals,
    skipped: Vec<SkippedPath>,
}

impl Collector {
    /// Creates a collector for a scan of `root`.
    ///
    /// # Arguments
    /// * `root` - The scan root; directory totals roll up to here and stop
    /// * `filters` - The filters the walk applies, echoed into the report
    /// * `largest_files` - How many of the largest files to keep (0 disables tracking)
    pub fn new(root: &Path, filters: Filters, largest_files: usize) -> Self {
        let mut dirs = PathPool::new();
        dirs.intern(root, None);

        Self {
            root: root.to_path_buf(),
            filters,
            dirs,
            dir_bytes: vec![0],
            type_totals: HashMap::new(),
            top_files: (largest_files > 0).then(|| BoundedMinHeap::new(largest_files)),
            seq: 0,
            totals: Totals::default(),
            skipped: Vec::new(),
        }
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn record(&mut self, visit: Visit) {
        match visit {
            Visit::Directory(path) => {
                self.totals.dir_count += 1;
                self.dir_id(&path);
            }
            Visit::File(record) => self.add_file(record),
            Visit::Filtered(path) => {
                trace!("filtered out {}", path.display());
                self.totals.filtered_files += 1;
            }
            Visit::Symlink(path) => debug!("not following symlink {}", path.display()),
            Visit::Special(path) => debug!("ignoring special file {}", path.display()),
            Visit::Skipped { path, reason } => {
                self.totals.skipped_paths += 1;
                self.skipped.push(SkippedPath {
                    path: path.display().to_string(),
                    reason: reason.to_string(),
                });
            }
        }
    }

    fn add_file(&mut self, record: FileRecord) {
        let size = record.size;

        self.totals.total_bytes += size;
        self.totals.file_count += 1;

        let by_type = self.type_totals.entry(record.type_key).or_default();
        by_type.bytes += size;
        by_type.file_count += 1;

        if let Some(parent) = record.path.parent() {
            let parent_id = self.dir_id(parent);
            for id in self.dirs.ancestors(parent_id) {
                self.dir_bytes[id as usize] += size;
            }
        }

        if let Some(heap) = self.top_files.as_mut() {
            heap.push(RankedFile {
                path: record.path,
                size,
                seq: self.seq,
            });
        }
        self.seq += 1;
    }

    /// Interned ID of a directory, registering it and any missing ancestors below the root.
    fn dir_id(&mut self, dir: &Path) -> u32 {
        if let Some(id) = self.dirs.id(dir) {
            return id;
        }

        let parent = match dir.parent() {
            Some(parent) if parent.starts_with(&self.root) => Some(self.dir_id(parent)),
            _ => None,
        };

        let id = self.dirs.intern(dir, parent);
        self.dir_bytes.push(0);
        debug_assert_eq!(self.dir_bytes.len(), self.dirs.len());
        id
    }

    /// Freeze the rollups.
    pub fn finish(self) -> ScanSnapshot {
        info!(
            "scan of {} finished: {} files, {} dirs, {} bytes, {} skipped",
            self.root.display(),
            self.totals.file_count,
            self.totals.dir_count,
            self.totals.total_bytes,
            self.totals.skipped_paths
        );

        let dir_totals = self
            .dirs
            .iter()
            .map(|(id, path)| (path.to_path_buf(), self.dir_bytes[id as usize]))
            .collect();

        let largest_files = self.top_files.map(|heap| {
            heap.into_sorted_vec()
                .into_iter()
                .map(|f| FileEntry {
                    path: f.path.display().to_string(),
                    bytes: f.size,
                })
                .collect()
        });

        ScanSnapshot {
            root: self.root,
            filters: self.filters,
            totals: self.totals,
            dir_totals,
            type_totals: self.type_totals.into_iter().collect(),
            largest_files,
            skipped: self.skipped,
        }
    }
}

/// The complete, frozen rollups of one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSnapshot {
    root: PathBuf,
    filters: Filters,
    totals: Totals,
    dir_totals: BTreeMap<PathBuf, u64>,
    type_totals: BTreeMap<String, TypeTotals>,
    largest_files: Option<Vec<FileEntry>>,
    skipped: Vec<SkippedPath>,
}

impl ScanSnapshot {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Bytes of counted files anywhere below `dir`, if `dir` was visited.
    pub fn dir_total(&self, dir: &Path) -> Option<u64> {
        self.dir_totals.get(dir).copied()
    }

    pub fn dir_totals(&self) -> &BTreeMap<PathBuf, u64> {
        &self.dir_totals
    }

    pub fn type_totals(&self) -> &BTreeMap<String, TypeTotals> {
        &self.type_totals
    }

    pub fn largest_files(&self) -> Option<&[FileEntry]> {
        self.largest_files.as_deref()
    }

    pub fn skipped(&self) -> &[SkippedPath] {
        &self.skipped
    }

    fn largest_files_up_to(&self, limit: usize) -> Option<Vec<FileEntry>> {
        if limit == 0 {
            return None;
        }
        self.largest_files
            .as_ref()
            .map(|files| files.iter().take(limit).cloned().collect())
    }

    /// Cut the rollups down to the top entries for presentation.
    ///
    /// Directories and types are ordered by bytes descending, ties by name ascending.
    /// Directory names compare as whole strings, not component by component.
    /// The largest-files list is cut to `limits.largest_files` and left out when that is zero.
    pub fn report(&self, limits: &ReportLimits) -> ScanResults {
        let mut dir_heap = BoundedMinHeap::new(limits.top_dirs);
        for (path, &bytes) in &self.dir_totals {
            dir_heap.push(Ranked {
                key: path.as_os_str(),
                bytes,
            });
        }

        let mut type_heap = BoundedMinHeap::new(limits.top_types);
        for (key, totals) in &self.type_totals {
            type_heap.push(Ranked {
                key: key.as_str(),
                bytes: totals.bytes,
            });
        }

        let top_dirs = dir_heap
            .into_sorted_vec()
            .into_iter()
            .map(|d| DirEntry {
                path: Path::new(d.key).display().to_string(),
                bytes: d.bytes,
            })
            .collect();

        let top_types = type_heap
            .into_sorted_vec()
            .into_iter()
            .map(|t| TypeEntry {
                type_key: t.key.to_string(),
                bytes: t.bytes,
                file_count: self.type_totals[t.key].file_count,
            })
            .collect();

        ScanResults {
            scanned_path: self.root.display().to_string(),
            totals: self.totals,
            filters: self.filters,
            top_dirs,
            top_types,
            largest_files: self.largest_files_up_to(limits.largest_files),
            skipped: self.skipped.clone(),
        }
    }
}
