use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with the scan root. These stop a scan before anything is aggregated.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot access {}: {source}", path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A size string such as `100M` or `50KiB` that could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeParseError {
    #[error("empty size string")]
    Empty,

    #[error("invalid numeric part in size string: {0}")]
    InvalidNumber(String),

    #[error("unknown size unit: {0} (supported: K, M, G, T, KiB, MiB, GiB, TiB, KB, MB, GB, TB)")]
    UnknownUnit(String),

    #[error("size is too large: {0}")]
    Overflow(String),
}

/// Why a single entry was left out of the scan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("permission denied")]
    PermissionDenied,

    #[error("not found (broken symlink or removed during scan)")]
    NotFound,

    #[error("cycle detected (links back to {})", .0.display())]
    Cycle(PathBuf),

    #[error("{0}")]
    Io(String),
}

impl SkipReason {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => SkipReason::PermissionDenied,
            io::ErrorKind::NotFound => SkipReason::NotFound,
            _ => SkipReason::Io(err.to_string()),
        }
    }

    pub fn from_walk(err: &walkdir::Error) -> Self {
        if let Some(ancestor) = err.loop_ancestor() {
            return SkipReason::Cycle(ancestor.to_path_buf());
        }

        match err.io_error() {
            Some(io_err) => Self::from_io(io_err),
            None => SkipReason::Io(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_from_io_kind() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(SkipReason::from_io(&denied), SkipReason::PermissionDenied);

        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(SkipReason::from_io(&missing), SkipReason::NotFound);

        let other = io::Error::new(io::ErrorKind::Other, "disk on fire");
        assert_eq!(SkipReason::from_io(&other), SkipReason::Io("disk on fire".to_string()));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::Cycle(PathBuf::from("/data"));
        assert_eq!(reason.to_string(), "cycle detected (links back to /data)");
        assert_eq!(SkipReason::PermissionDenied.to_string(), "permission denied");
    }
}
