use crate::error::AnalyzeError;
use crate::options::AnalyzeOptions;
use ignore::WalkBuilder;
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing;

/// Walks the root directory and returns every regular file in a stable
/// depth-first order.
///
/// Directories named in `skip_dirs` are pruned entirely, so their descendants
/// are never visited. Any walk error aborts the enumeration and is surfaced
/// to the caller; there is no partial-skip mode.
pub fn enumerate_files(options: &AnalyzeOptions) -> Result<Vec<PathBuf>, AnalyzeError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Enumerating files under: {}", options.root.display());
    let mut builder = WalkBuilder::new(&options.root);
    builder
        .hidden(options.skip_dotfiles)
        .follow_links(options.follow_links)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .sort_by_file_name(std::ffi::OsStr::cmp);
    let matcher = if !options.ignore_patterns.is_empty() {
        let mut glob_builder = globset::GlobSetBuilder::new();
        for pattern in &options.ignore_patterns {
            let glob = globset::Glob::new(pattern).map_err(|e| {
                AnalyzeError::Walk(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            glob_builder.add(glob);
        }
        Some(
            glob_builder
                .build()
                .map_err(|e| AnalyzeError::Walk(format!("Failed to build glob set: {}", e)))?,
        )
    } else {
        None
    };
    let skip_dirs = options.skip_dirs.clone();
    builder.filter_entry(move |entry| {
        if entry.file_type().is_some_and(|t| t.is_dir()) {
            let name = entry.file_name().to_string_lossy();
            if skip_dirs.iter().any(|d| d == name.as_ref()) {
                return false;
            }
        }
        match &matcher {
            Some(m) => !m.is_match(entry.path()),
            None => true,
        }
    });
    builder
        .build()
        .filter_map(|result| match result {
            Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                Some(Ok(entry.path().to_path_buf()))
            }
            Ok(_) => None,
            Err(e) => Some(Err(AnalyzeError::Walk(e.to_string()))),
        })
        .collect()
}
