use crate::classify::classify_path;
use crate::error::{ScanError, SkipReason};
use crate::filter::FileFilter;
use crate::types::{FileRecord, Filters};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

/// What to walk into and which files count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Follow symbolic links to files and directories. Off by default: links are skipped.
    pub follow_symlinks: bool,
    pub min_size_bytes: Option<u64>,
    pub min_age_days: Option<u64>,
}

impl ScanOptions {
    pub fn filters(&self) -> Filters {
        Filters {
            min_size_bytes: self.min_size_bytes,
            min_age_days: self.min_age_days,
        }
    }
}

/// One step of a walk.
#[derive(Debug, Clone)]
pub enum Visit {
    Directory(PathBuf),
    /// A regular file that passed the filters.
    File(FileRecord),
    /// A regular file that was seen but rejected by the filters.
    Filtered(PathBuf),
    /// A symlink left alone because links are not being followed.
    Symlink(PathBuf),
    /// Fifos, sockets, devices.
    Special(PathBuf),
    Skipped { path: PathBuf, reason: SkipReason },
}

pub struct Walker {
    options: ScanOptions,
    now: SystemTime,
}

impl Walker {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            now: SystemTime::now(),
        }
    }

    /// Measure file ages against `now` instead of the moment the walker was built.
    pub fn with_reference_time(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }

    /// Check the root and start walking it.
    ///
    /// Only problems with the root itself are errors; everything below it is reported
    /// through [`Visit::Skipped`].
    pub fn walk(&self, root: &Path) -> Result<Walk, ScanError> {
        let metadata = fs::metadata(root).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ScanError::RootNotFound(root.to_path_buf()),
            _ => ScanError::RootInaccessible {
                path: root.to_path_buf(),
                source,
            },
        })?;

        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let root = fs::canonicalize(root).map_err(|source| ScanError::RootInaccessible {
            path: root.to_path_buf(),
            source,
        })?;

        info!(
            "scanning {} (follow_symlinks={}, min_size={:?}, min_age_days={:?})",
            root.display(),
            self.options.follow_symlinks,
            self.options.min_size_bytes,
            self.options.min_age_days
        );

        // walkdir keeps the open directories on a stack and, when following links,
        // reports a link back to one of them as a loop error instead of descending.
        let entries = WalkDir::new(&root)
            .follow_links(self.options.follow_symlinks)
            .sort_by_file_name()
            .into_iter();

        Ok(Walk {
            root,
            entries,
            filter: FileFilter::new(
                self.options.min_size_bytes,
                self.options.min_age_days,
                self.now,
            ),
        })
    }
}

/// Iterator over every entry below a root, depth first, siblings in file name order.
pub struct Walk {
    root: PathBuf,
    entries: walkdir::IntoIter,
    filter: FileFilter,
}

impl Walk {
    /// The canonical root being walked.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn visit(&self, entry: DirEntry) -> Visit {
        let file_type = entry.file_type();

        // With follow_links on, walkdir reports the target's type, so this only
        // triggers when links are being skipped.
        if file_type.is_symlink() {
            return Visit::Symlink(entry.into_path());
        }

        if file_type.is_dir() {
            return Visit::Directory(entry.into_path());
        }

        if !file_type.is_file() {
            return Visit::Special(entry.into_path());
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => return skipped(entry.into_path(), SkipReason::from_walk(&err)),
        };

        let size = metadata.len();
        let modified = metadata.modified().ok();
        let path = entry.into_path();

        if !self.filter.admits(size, modified) {
            return Visit::Filtered(path);
        }

        let type_key = classify_path(&path).into_owned();
        Visit::File(FileRecord {
            path,
            size,
            modified,
            type_key,
        })
    }
}

impl Iterator for Walk {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        match self.entries.next()? {
            Ok(entry) => Some(self.visit(entry)),
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                Some(skipped(path, SkipReason::from_walk(&err)))
            }
        }
    }
}

fn skipped(path: PathBuf, reason: SkipReason) -> Visit {
    debug!("skipping {}: {}", path.display(), reason);
    Visit::Skipped { path, reason }
}
