use clap::Parser;
use diskwhy::config::DiskwhyConfig;
use diskwhy::{parse_size, ReportLimits, ScanOptions, SizeParseError};
use std::path::PathBuf;

const DEFAULT_TOP: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "diskwhy", version)]
#[command(
    about = "Analyze disk usage: sizes by directory and file type, and the largest files",
    long_about = None
)]
pub struct Cli {
    /// Path to scan (defaults to current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Show top N directories by size [default: 10]
    #[arg(long, value_name = "N")]
    pub top_dirs: Option<usize>,

    /// Show top N file types by size [default: 10]
    #[arg(long, value_name = "N")]
    pub top_types: Option<usize>,

    /// Only count files of at least SIZE (e.g. 100M, 1G, 50KiB)
    #[arg(long, value_name = "SIZE")]
    pub min_size: Option<String>,

    /// Only count files last modified at least DAYS days ago
    #[arg(long, value_name = "DAYS")]
    pub older_than: Option<u64>,

    /// Show the N largest files
    #[arg(long, value_name = "N")]
    pub show_large_files: Option<usize>,

    /// Follow symbolic links (disabled by default)
    #[arg(long, overrides_with = "no_follow_symlinks")]
    pub follow_symlinks: bool,

    /// Do not follow symbolic links, even if the config file enables it
    #[arg(long, overrides_with = "follow_symlinks")]
    pub no_follow_symlinks: bool,

    /// Output JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Write JSON output to file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show progress indicator during scan
    #[arg(long)]
    pub progress: bool,

    /// Read defaults from this config file instead of the standard location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn get_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn should_output_json(&self) -> bool {
        self.json || self.output.is_some()
    }

    /// Scan options from flags, falling back to the config file.
    pub fn scan_options(&self, config: &DiskwhyConfig) -> Result<ScanOptions, SizeParseError> {
        let min_size = self.min_size.as_deref().or(config.scan.min_size.as_deref());
        let follow_symlinks = match (self.follow_symlinks, self.no_follow_symlinks) {
            (true, _) => true,
            (_, true) => false,
            _ => config.scan.follow_symlinks,
        };

        Ok(ScanOptions {
            follow_symlinks,
            min_size_bytes: min_size.map(parse_size).transpose()?,
            min_age_days: self.older_than.or(config.scan.older_than),
        })
    }

    pub fn report_limits(&self, config: &DiskwhyConfig) -> ReportLimits {
        ReportLimits {
            top_dirs: self.top_dirs.or(config.report.top_dirs).unwrap_or(DEFAULT_TOP),
            top_types: self.top_types.or(config.report.top_types).unwrap_or(DEFAULT_TOP),
            largest_files: self
                .show_large_files
                .or(config.report.show_large_files)
                .unwrap_or(0),
        }
    }

    pub fn use_color(&self, config: &DiskwhyConfig, is_terminal: bool) -> bool {
        !self.no_color && config.display.color && is_terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("diskwhy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);
        let config = DiskwhyConfig::default();

        assert_eq!(cli.get_path(), PathBuf::from("."));
        assert!(!cli.should_output_json());
        assert_eq!(cli.scan_options(&config).unwrap(), ScanOptions::default());
        assert_eq!(cli.report_limits(&config), ReportLimits::default());
        assert!(cli.use_color(&config, true));
        assert!(!cli.use_color(&config, false));
    }

    #[test]
    fn test_cli_flags() {
        let cli = parse(&[
            "/data",
            "--top-dirs",
            "3",
            "--top-types",
            "4",
            "--min-size",
            "100MiB",
            "--older-than",
            "90",
            "--show-large-files",
            "5",
            "--follow-symlinks",
            "--output",
            "out.json",
            "--no-color",
        ]);
        let config = DiskwhyConfig::default();

        assert_eq!(cli.get_path(), PathBuf::from("/data"));
        assert!(cli.should_output_json());
        assert_eq!(
            cli.scan_options(&config).unwrap(),
            ScanOptions {
                follow_symlinks: true,
                min_size_bytes: Some(104_857_600),
                min_age_days: Some(90),
            }
        );
        assert_eq!(
            cli.report_limits(&config),
            ReportLimits {
                top_dirs: 3,
                top_types: 4,
                largest_files: 5,
            }
        );
        assert!(!cli.use_color(&config, true));
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = DiskwhyConfig::default();
        config.scan.min_size = Some("1K".to_string());
        config.scan.older_than = Some(30);
        config.report.top_dirs = Some(2);
        config.report.show_large_files = Some(8);
        config.display.color = false;

        let from_config = parse(&[]);
        let options = from_config.scan_options(&config).unwrap();
        assert_eq!(options.min_size_bytes, Some(1000));
        assert_eq!(options.min_age_days, Some(30));
        let limits = from_config.report_limits(&config);
        assert_eq!(limits.top_dirs, 2);
        assert_eq!(limits.top_types, DEFAULT_TOP);
        assert_eq!(limits.largest_files, 8);
        assert!(!from_config.use_color(&config, true));

        let from_flags = parse(&["--min-size", "2K", "--top-dirs", "9"]);
        assert_eq!(from_flags.scan_options(&config).unwrap().min_size_bytes, Some(2000));
        assert_eq!(from_flags.report_limits(&config).top_dirs, 9);
    }

    #[test]
    fn test_cli_follow_symlinks_flags_override_config() {
        let mut config = DiskwhyConfig::default();
        config.scan.follow_symlinks = true;

        assert!(parse(&[]).scan_options(&config).unwrap().follow_symlinks);
        assert!(!parse(&["--no-follow-symlinks"]).scan_options(&config).unwrap().follow_symlinks);

        // The last of the two flags wins.
        let last_off = parse(&["--follow-symlinks", "--no-follow-symlinks"]);
        assert!(!last_off.scan_options(&config).unwrap().follow_symlinks);
        let last_on = parse(&["--no-follow-symlinks", "--follow-symlinks"]);
        assert!(last_on.scan_options(&DiskwhyConfig::default()).unwrap().follow_symlinks);
    }

    #[test]
    fn test_cli_bad_min_size() {
        let cli = parse(&["--min-size", "lots"]);
        assert!(cli.scan_options(&DiskwhyConfig::default()).is_err());
    }

    #[test]
    fn test_cli_rejects_negative_days() {
        let result = Cli::try_parse_from(["diskwhy", "--older-than", "-3"]);
        assert!(result.is_err());
    }
}
