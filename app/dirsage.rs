//! Command-line interface for dirsage.
//!
//! This binary analyzes a directory (or a single file) against a local
//! Ollama server, printing progress to stderr and the final description to
//! stdout.

use clap::Parser;
use dirsage::{
    AnalyzeBuilder, AnalyzeOptions, OllamaOracle, Progress, ProgressSink, SpeedTracker,
    analyze_directory, analyze_file,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;

/// dirsage: describe a directory and everything in it
#[derive(Parser)]
#[command(name = "dirsage", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Analyze a single file instead of a directory
    #[arg(long)]
    file: Option<PathBuf>,

    /// Directory names to prune from the walk (can be repeated)
    #[arg(long = "skip-dir", default_values_t = [".git".to_string(), "node_modules".to_string()])]
    skip_dirs: Vec<String>,

    /// Include dotfiles and dot-directories
    #[arg(long)]
    include_dotfiles: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Ignore patterns (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Ollama endpoint
    #[arg(long, default_value = OllamaOracle::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model for the type-detection fallback
    #[arg(long)]
    classify_model: Option<String>,

    /// Model for per-file descriptions
    #[arg(long)]
    describe_model: Option<String>,

    /// Model for the final directory summary
    #[arg(long)]
    summarize_model: Option<String>,
}

impl Cli {
    fn into_options(self) -> (AnalyzeOptions, Option<PathBuf>, String) {
        let mut builder = AnalyzeBuilder::new(self.root)
            .skip_dirs(self.skip_dirs)
            .skip_dotfiles(!self.include_dotfiles)
            .follow_links(self.follow_links)
            .ignore_patterns(self.ignore_patterns);

        if let Some(model) = self.classify_model {
            builder = builder.classify_model(model);
        }
        if let Some(model) = self.describe_model {
            builder = builder.describe_model(model);
        }
        if let Some(model) = self.summarize_model {
            builder = builder.summarize_model(model);
        }

        (builder.build(), self.file, self.endpoint)
    }
}

/// Prints per-file progress to stderr, with a remaining-time estimate once
/// timing data exists.
struct StderrProgress;

impl ProgressSink for StderrProgress {
    fn on_file(&mut self, progress: &Progress<'_>) {
        let percent = progress.index as f64 / progress.total.max(1) as f64 * 100.0;
        let estimate = match progress.estimated_remaining {
            Some(d) if !d.is_zero() => format!(" ({:.0}% ~ {}s)", percent, d.as_secs()),
            _ => String::new(),
        };
        eprint!(
            "\rProcessing: {}/{}{}  {}",
            progress.index + 1,
            progress.total,
            estimate,
            progress.path.display()
        );
        let _ = io::stderr().flush();
    }
}

fn main() {
    let cli = Cli::parse();
    let (options, file, endpoint) = cli.into_options();
    let oracle = OllamaOracle::new(endpoint);

    if let Some(file) = file {
        run_file(&file, &options, &oracle);
        return;
    }

    match analyze_directory(&options, &oracle, &mut StderrProgress) {
        Ok(description) => {
            eprintln!();
            println!("{}", description);
        }
        Err(e) => {
            eprintln!("\nError: {}", e);
            exit(1);
        }
    }
}

fn run_file(file: &PathBuf, options: &AnalyzeOptions, oracle: &OllamaOracle) {
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut tracker = SpeedTracker::new();
    match analyze_file(file, &filename, oracle, options, &mut tracker) {
        Ok(Some(report)) => {
            println!("Type: {}", report.file_type);
            println!("Description: {}", report.description);
        }
        Ok(None) => {
            println!("Nothing to describe.");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
