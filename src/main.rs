mod cli;

use clap::Parser;
use cli::Cli;
use diskwhy::config::DiskwhyConfig;
use diskwhy::output::{JsonRenderer, TerminalRenderer};
use diskwhy::progress::ScanProgress;
use diskwhy::{Collector, Visit, Walker};
use is_terminal::IsTerminal;

fn main() {
    // Logging goes to stderr, controlled by RUST_LOG (e.g. RUST_LOG=debug diskwhy /data)
    env_logger::init();

    let cli = Cli::parse();

    let config = match DiskwhyConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let options = match cli.scan_options(&config) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: Invalid size format: {}", e);
            std::process::exit(2);
        }
    };
    let limits = cli.report_limits(&config);

    let path = cli.get_path();
    let walk = match Walker::new(options.clone()).walk(&path) {
        Ok(walk) => walk,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let mut progress = ScanProgress::new(cli.progress);
    let mut collector = Collector::new(walk.root(), options.filters(), limits.largest_files);

    for visit in walk {
        if let Visit::Directory(dir) = &visit {
            progress.update(collector.totals(), dir);
        }
        collector.record(visit);
    }
    progress.finish();

    let results = collector.finish().report(&limits);

    if cli.should_output_json() {
        let renderer = JsonRenderer::new();
        if let Err(e) = renderer.render(&results, cli.output.as_deref()) {
            eprintln!("Error writing JSON output: {}", e);
            std::process::exit(3);
        }
    } else {
        let use_color = cli.use_color(&config, std::io::stdout().is_terminal());
        TerminalRenderer::new(use_color).render(&results);
    }
}
