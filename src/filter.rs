use std::time::{Duration, SystemTime};

const SECONDS_PER_DAY: u64 = 86_400;

/// Size and age predicates deciding whether a visited file is counted.
#[derive(Debug, Clone, Copy)]
pub struct FileFilter {
    min_size: Option<u64>,
    min_age_days: Option<u64>,
    now: SystemTime,
}

impl FileFilter {
    pub fn new(min_size: Option<u64>, min_age_days: Option<u64>, now: SystemTime) -> Self {
        Self {
            min_size,
            min_age_days,
            now,
        }
    }

    /// Whole days between `modified` and the reference instant. Future times count as age 0.
    pub fn age_in_days(&self, modified: SystemTime) -> u64 {
        self.now
            .duration_since(modified)
            .unwrap_or(Duration::ZERO)
            .as_secs()
            / SECONDS_PER_DAY
    }

    /// A file without a modification time never satisfies an age filter.
    pub fn admits(&self, size: u64, modified: Option<SystemTime>) -> bool {
        if let Some(min) = self.min_size {
            if size < min {
                return false;
            }
        }

        if let Some(min_days) = self.min_age_days {
            match modified {
                Some(time) if self.age_in_days(time) >= min_days => {}
                _ => return false,
            }
        }

        true
    }
}
