use crate::classify::{self, FileReport, OP_ANALYZE_FILE};
use crate::error::AnalyzeError;
use crate::manifest::{self, Manifest};
use crate::options::AnalyzeOptions;
use crate::oracle::Oracle;
use crate::progress::{OpContext, SpeedTracker};
use crate::tables;
use crate::walker;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
#[cfg(feature = "logging")]
use tracing;

/// Progress emitted before each file is analyzed.
#[derive(Debug)]
pub struct Progress<'a> {
    /// Zero-based index of the file about to be processed.
    pub index: usize,
    pub total: usize,
    pub path: &'a Path,
    /// Remaining-time projection from the per-file timing records; `None`
    /// until at least one file has been fully analyzed.
    pub estimated_remaining: Option<Duration>,
}

/// Injected sink for progress events. The core never talks to a terminal
/// itself.
pub trait ProgressSink {
    fn on_file(&mut self, progress: &Progress<'_>);
}

/// No-op sink.
impl ProgressSink for () {
    fn on_file(&mut self, _progress: &Progress<'_>) {}
}

/// Counts the files that will reach the description stage, and their total
/// size. Ignored, reserved, and unprocessable names are excluded without
/// reading any content. Feeds the remaining-time estimate.
pub fn count_describable(files: &[PathBuf]) -> Result<(u64, u64), AnalyzeError> {
    let mut count: u64 = 0;
    let mut bytes: u64 = 0;
    for file in files {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if tables::is_ignored(&filename)
            || tables::resolve_reserved(&filename).is_some()
            || tables::resolve_unprocessable(&filename).is_some()
        {
            continue;
        }
        let metadata = std::fs::metadata(file).map_err(|e| AnalyzeError::io(file, e))?;
        count += 1;
        bytes += metadata.len();
    }
    Ok((count, bytes))
}

/// Analyzes every file under the root and returns one oracle-generated
/// description of the directory as a whole.
///
/// Files are processed strictly one at a time, in enumeration order; the
/// oracle is never called for more than one file concurrently. Any per-file
/// fatal error aborts the run and the partial manifest is discarded.
pub fn analyze_directory(
    options: &AnalyzeOptions,
    oracle: &dyn Oracle,
    sink: &mut dyn ProgressSink,
) -> Result<String, AnalyzeError> {
    let started = Instant::now();
    let mut tracker = SpeedTracker::new();
    let files = walker::enumerate_files(options)?;
    let (describable_count, _describable_bytes) = count_describable(&files)?;
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Analyzing {} files ({} describable) under {}",
        files.len(),
        describable_count,
        options.root.display()
    );

    let root_base: PathBuf = options
        .root
        .file_name()
        .map_or_else(|| options.root.clone(), PathBuf::from);

    let mut reports: Vec<(PathBuf, FileReport)> = Vec::new();
    let mut described: u64 = 0;

    for (index, file) in files.iter().enumerate() {
        let remaining = describable_count.saturating_sub(described);
        let estimate = tracker
            .get(OP_ANALYZE_FILE)
            .map(|r| r.estimate_remaining(remaining));
        sink.on_file(&Progress {
            index,
            total: files.len(),
            path: file,
            estimated_remaining: estimate,
        });

        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(report) = classify::analyze_file(file, &filename, oracle, options, &mut tracker)?
        else {
            continue;
        };
        if !report.skip {
            described += 1;
        }

        let relative = file.strip_prefix(&options.root).unwrap_or(file);
        reports.push((root_base.join(relative), report));
    }

    let mut manifest = Manifest::new();
    for (relative_path, report) in &reports {
        if report.in_manifest() {
            manifest.push(relative_path, &report.file_type, &report.description);
        }
    }

    let description = manifest::summarize(oracle, &options.summarize_model, &manifest)
        .map_err(AnalyzeError::Summarize)?;

    tracker.record("analyze_directory", started, OpContext::default());
    Ok(description)
}
