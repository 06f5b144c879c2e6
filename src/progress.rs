use crate::types::Totals;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Redraw at most once per this many visits; indicatif throttles the terminal itself.
const UPDATE_EVERY: u64 = 256;

/// Spinner on stderr showing running totals while a scan is in progress.
pub struct ScanProgress {
    bar: ProgressBar,
    enabled: bool,
    visits: u64,
}

impl ScanProgress {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
                enabled: false,
                visits: 0,
            };
        }

        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);

        Self {
            bar,
            enabled: true,
            visits: 0,
        }
    }

    pub fn update(&mut self, totals: &Totals, current_path: &Path) {
        if !self.enabled {
            return;
        }

        self.visits += 1;
        if self.visits % UPDATE_EVERY != 1 {
            return;
        }

        let current_path = current_path.display().to_string();
        let display_path = truncate_left(&current_path, 60);

        self.bar.set_message(format!(
            "{} files | {} dirs | {} | {}",
            totals.file_count,
            totals.dir_count,
            humansize::format_size(totals.total_bytes, humansize::BINARY),
            display_path
        ));
        self.bar.tick();
    }

    pub fn finish(&self) {
        if self.enabled {
            self.bar.finish_and_clear();
        }
    }
}

/// Keep the last `max` characters of `text`, marking the cut with `...`.
pub fn truncate_left(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }

    let keep = max.saturating_sub(3);
    let tail: String = text.chars().skip(count - keep).collect();
    format!("...{}", tail)
}
