use crate::progress::truncate_left;
use crate::types::{DirEntry, FileEntry, ScanResults, SkippedPath, TypeEntry};
use colored::*;
use humansize::{format_size, BINARY};
use std::fmt;
use std::io;
use std::path::Path;

const BOX_TL: &str = "╭";
const BOX_TR: &str = "╮";
const BOX_BL: &str = "╰";
const BOX_BR: &str = "╯";
const BOX_H: &str = "─";
const BOX_V: &str = "│";
const BOX_LT: &str = "├";
const BOX_RT: &str = "┤";

const HEADER_WIDTH: usize = 62;
const PATH_WIDTH: usize = 45;
const BAR_WIDTH: usize = 20;
const SKIPPED_SHOWN: usize = 5;

pub struct TerminalRenderer {
    use_color: bool,
}

/// A scan report bound to the renderer that formats it.
struct Report<'a> {
    renderer: &'a TerminalRenderer,
    results: &'a ScanResults,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.renderer.write_report(f, self.results)
    }
}

impl TerminalRenderer {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn render(&self, results: &ScanResults) {
        print!("{}", self.report(results));
    }

    pub fn render_to_string(&self, results: &ScanResults) -> String {
        self.report(results).to_string()
    }

    fn report<'a>(&'a self, results: &'a ScanResults) -> Report<'a> {
        Report {
            renderer: self,
            results,
        }
    }

    fn write_report(&self, f: &mut fmt::Formatter<'_>, results: &ScanResults) -> fmt::Result {
        let total = results.totals.total_bytes;

        writeln!(f)?;
        self.write_header(f, results)?;

        if results.totals.file_count == 0 {
            writeln!(f)?;
            writeln!(f, "  No files found.")?;
        } else {
            if !results.top_dirs.is_empty() {
                writeln!(f)?;
                self.write_dirs(f, &results.top_dirs, total)?;
            }

            if !results.top_types.is_empty() {
                writeln!(f)?;
                self.write_types(f, &results.top_types, total)?;
            }

            if let Some(files) =
                results.largest_files.as_deref().filter(|files| !files.is_empty())
            {
                writeln!(f)?;
                self.write_files(f, files)?;
            }
        }

        if !results.skipped.is_empty() {
            writeln!(f)?;
            self.write_skipped(f, &results.skipped)?;
        }

        writeln!(f)
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>, results: &ScanResults) -> fmt::Result {
        let border = BOX_H.repeat(HEADER_WIDTH);
        writeln!(
            f,
            "  {}{}{}",
            self.colorize(BOX_TL, "bright_black", false),
            self.colorize(&border, "bright_black", false),
            self.colorize(BOX_TR, "bright_black", false)
        )?;

        let title = format!(
            " Disk usage: {}",
            truncate_left(&results.scanned_path, HEADER_WIDTH - 14)
        );
        self.write_boxed(f, &title, "cyan", true)?;

        writeln!(
            f,
            "  {}{}{}",
            self.colorize(BOX_LT, "bright_black", false),
            self.colorize(&border, "bright_black", false),
            self.colorize(BOX_RT, "bright_black", false)
        )?;

        let totals = &results.totals;
        self.write_boxed(
            f,
            &format!(" Total size: {}", format_size(totals.total_bytes, BINARY)),
            "green",
            true,
        )?;
        self.write_boxed(
            f,
            &format!(
                " Files: {}  │  Dirs: {}  │  Skipped: {}",
                totals.file_count, totals.dir_count, totals.skipped_paths
            ),
            "white",
            false,
        )?;

        let mut filters = Vec::new();
        if let Some(min) = results.filters.min_size_bytes {
            filters.push(format!(">= {}", format_size(min, BINARY)));
        }
        if let Some(days) = results.filters.min_age_days {
            filters.push(format!(">= {} days old", days));
        }
        if !filters.is_empty() {
            self.write_boxed(
                f,
                &format!(
                    " Filters: {} ({} files left out)",
                    filters.join(", "),
                    totals.filtered_files
                ),
                "yellow",
                false,
            )?;
        }

        writeln!(
            f,
            "  {}{}{}",
            self.colorize(BOX_BL, "bright_black", false),
            self.colorize(&border, "bright_black", false),
            self.colorize(BOX_BR, "bright_black", false)
        )
    }

    fn write_boxed(
        &self,
        f: &mut fmt::Formatter<'_>,
        text: &str,
        color: &str,
        bold: bool,
    ) -> fmt::Result {
        let padding = HEADER_WIDTH.saturating_sub(text.chars().count());
        writeln!(
            f,
            "  {}{}{}{}",
            self.colorize(BOX_V, "bright_black", false),
            self.colorize(text, color, bold),
            " ".repeat(padding),
            self.colorize(BOX_V, "bright_black", false)
        )
    }

    fn write_section_title(&self, f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        writeln!(
            f,
            "  {} {}",
            self.colorize("▼", "cyan", false),
            self.colorize(title, "cyan", true)
        )
    }

    fn write_dirs(&self, f: &mut fmt::Formatter<'_>, dirs: &[DirEntry], total: u64) -> fmt::Result {
        self.write_section_title(f, "Top Directories")?;
        writeln!(
            f,
            "  {}",
            self.colorize(
                &format!(
                    "{:<path$}  {:>10}  {:>7}  {}",
                    "DIRECTORY",
                    "SIZE",
                    "PERCENT",
                    "SHARE",
                    path = PATH_WIDTH
                ),
                "bright_black",
                true
            )
        )?;

        for dir in dirs {
            let percent = percent_of(dir.bytes, total);
            writeln!(
                f,
                "  {:<path$}  {}  {}  {}",
                truncate_left(&dir.path, PATH_WIDTH),
                self.colorize(&format!("{:>10}", format_size(dir.bytes, BINARY)), "green", false),
                self.colorize(&format!("{:>6.1}%", percent), "cyan", false),
                self.create_bar(percent),
                path = PATH_WIDTH
            )?;
        }
        Ok(())
    }

    fn write_types(&self, f: &mut fmt::Formatter<'_>, types: &[TypeEntry], total: u64) -> fmt::Result {
        self.write_section_title(f, "Top File Types")?;
        writeln!(
            f,
            "  {}",
            self.colorize(
                &format!(
                    "{:<20}  {:>10}  {:>8}  {:>7}  {}",
                    "TYPE", "SIZE", "FILES", "PERCENT", "SHARE"
                ),
                "bright_black",
                true
            )
        )?;

        for entry in types {
            let percent = percent_of(entry.bytes, total);
            writeln!(
                f,
                "  {:<20}  {}  {}  {}  {}",
                truncate_left(&entry.type_key, 20),
                self.colorize(&format!("{:>10}", format_size(entry.bytes, BINARY)), "green", false),
                self.colorize(&format!("{:>8}", entry.file_count), "blue", false),
                self.colorize(&format!("{:>6.1}%", percent), "cyan", false),
                self.create_bar(percent)
            )?;
        }
        Ok(())
    }

    fn write_files(&self, f: &mut fmt::Formatter<'_>, files: &[FileEntry]) -> fmt::Result {
        self.write_section_title(f, "Largest Files")?;
        writeln!(f, "  {}", self.colorize(&"─".repeat(60), "bright_black", false))?;

        for (i, file) in files.iter().enumerate() {
            let rank = format!("{:>2}.", i + 1);
            let size = format_size(file.bytes, BINARY);

            writeln!(
                f,
                "  {} {}  {}",
                self.colorize(&rank, "bright_black", false),
                self.colorize(&format!("{:>10}", size), "green", false),
                self.colorize(&truncate_left(&file.path, PATH_WIDTH), "white", false)
            )?;
        }
        Ok(())
    }

    fn write_skipped(&self, f: &mut fmt::Formatter<'_>, skipped: &[SkippedPath]) -> fmt::Result {
        writeln!(
            f,
            "  {} {}",
            self.colorize("⚠", "yellow", false),
            self.colorize(
                &format!("Warnings ({} paths skipped)", skipped.len()),
                "yellow",
                true
            )
        )?;
        writeln!(f, "  {}", self.colorize(&"─".repeat(60), "bright_black", false))?;

        for entry in skipped.iter().take(SKIPPED_SHOWN) {
            writeln!(
                f,
                "    {} {}",
                self.colorize(&truncate_left(&entry.path, 40), "bright_black", false),
                self.colorize(&format!("({})", entry.reason), "red", false)
            )?;
        }

        if skipped.len() > SKIPPED_SHOWN {
            writeln!(
                f,
                "    {}",
                self.colorize(
                    &format!("... and {} more", skipped.len() - SKIPPED_SHOWN),
                    "bright_black",
                    false
                )
            )?;
        }
        Ok(())
    }

    fn create_bar(&self, percent: f64) -> String {
        let filled = ((percent / 100.0) * BAR_WIDTH as f64) as usize;
        let filled = filled.min(BAR_WIDTH);
        let empty = BAR_WIDTH - filled;

        if !self.use_color {
            return format!("{}{}", "█".repeat(filled), "░".repeat(empty));
        }

        let full = "█".repeat(filled);
        let full = if percent > 50.0 {
            full.red()
        } else if percent > 20.0 {
            full.yellow()
        } else {
            full.green()
        };
        format!("{}{}", full, "░".repeat(empty).bright_black())
    }

    fn colorize(&self, text: &str, color: &str, bold: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }

        let colored = match color {
            "red" => text.red(),
            "green" => text.green(),
            "yellow" => text.yellow(),
            "blue" => text.blue(),
            "cyan" => text.cyan(),
            "white" => text.white(),
            "bright_black" => text.bright_black(),
            _ => text.normal(),
        };

        if bold {
            colored.bold().to_string()
        } else {
            colored.to_string()
        }
    }
}

fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, results: &ScanResults, output_file: Option<&Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(results)?;

        if let Some(path) = output_file {
            std::fs::write(path, json)?;
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}
