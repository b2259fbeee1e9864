//! Per-file classification cascade and description stage. Cheap heuristics
//! run in a fixed order, first match wins; the oracle is consulted only when
//! every heuristic misses, and only with a bounded content sample.

use crate::detect;
use crate::error::AnalyzeError;
use crate::options::AnalyzeOptions;
use crate::oracle::{self, Oracle, OracleError, OracleRequest};
use crate::progress::{OpContext, SpeedTracker};
use crate::prompts;
use crate::tables;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Instant;
#[cfg(feature = "logging")]
use tracing;

pub(crate) const OP_ANALYZE_FILE: &str = "analyze_file";
pub(crate) const OP_DETECT_TYPE: &str = "detect_file_type_oracle";

static FILE_TYPE_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "properties": {
            "category": { "type": "string" },
            "type": { "type": "string" }
        },
        "required": ["category", "type"]
    })
});

static FILE_ANALYSIS_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "properties": {
            "file_type": { "type": "string" },
            "description": { "type": "string" }
        },
        "required": ["file_type", "description"]
    })
});

#[derive(Debug, Deserialize)]
struct FileTypeReply {
    category: String,
    #[serde(rename = "type")]
    file_type: String,
}

#[derive(Debug, Deserialize)]
struct FileAnalysisReply {
    file_type: String,
    description: String,
}

/// The outcome of analyzing one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file_type: String,
    pub description: String,
    /// True when a heuristic settled the file and the oracle was never
    /// consulted.
    pub skip: bool,
    /// True when the type/description pair came from the reserved-filename
    /// table.
    pub reserved: bool,
    pub size_bytes: u64,
}

impl FileReport {
    fn skipped(file_type: &str, description: &str) -> Self {
        Self {
            file_type: file_type.to_string(),
            description: description.to_string(),
            skip: true,
            reserved: false,
            size_bytes: 0,
        }
    }

    /// Skipped files stay out of the directory manifest unless they carry a
    /// fixed reserved-name type and description.
    pub fn in_manifest(&self) -> bool {
        !self.skip || self.reserved
    }
}

/// Classifies and describes a single file. Returns `Ok(None)` when the file
/// produced nothing worth keeping: it was empty, or the oracle's description
/// reply was empty (a "not worth describing" signal, not an error).
pub fn analyze_file(
    path: &Path,
    filename: &str,
    oracle: &dyn Oracle,
    options: &AnalyzeOptions,
    tracker: &mut SpeedTracker,
) -> Result<Option<FileReport>, AnalyzeError> {
    let started = Instant::now();
    let mut ctx = OpContext {
        path: Some(path.to_path_buf()),
        bytes: 0,
    };

    if tables::is_ignored(filename) {
        return Ok(Some(FileReport::skipped("", "")));
    }
    if let Some(reserved) = tables::resolve_reserved(filename) {
        return Ok(Some(FileReport {
            file_type: reserved.to_string(),
            description: reserved.to_string(),
            skip: true,
            reserved: true,
            size_bytes: 0,
        }));
    }
    if let Some(media_type) = tables::resolve_unprocessable(filename) {
        return Ok(Some(FileReport::skipped(media_type, "")));
    }

    let metadata = std::fs::metadata(path).map_err(|e| AnalyzeError::io(path, e))?;
    if metadata.len() == 0 {
        return Ok(None);
    }
    ctx.bytes = metadata.len();

    let content = read_sample(path)?;
    if detect::is_probably_binary(&content) {
        let (file_type, description) = if detect::is_executable(&metadata) {
            ("executable binary", "an executable file containing binary data")
        } else {
            ("binary", "a file containing binary or non-utf8 data.")
        };
        return Ok(Some(FileReport {
            size_bytes: metadata.len(),
            ..FileReport::skipped(file_type, description)
        }));
    }

    let file_type = detect_file_type(filename, &content, oracle, options, tracker, &ctx)?;

    let sample = oracle::sample_text(&content);
    let mut prompt = format!("File name: {}", filename);
    if let Some(file_type) = &file_type {
        prompt.push_str(&format!("\nFile type: {}", file_type));
    }
    prompt.push_str(&format!("\n\n(file content below)\n\n{}", sample));

    let reply: FileAnalysisReply = match oracle::complete_json(
        oracle,
        &OracleRequest {
            model: &options.describe_model,
            system: prompts::ANALYZE_FILE,
            prompt: &prompt,
            format: &FILE_ANALYSIS_SCHEMA,
        },
    ) {
        Ok(reply) => reply,
        Err(OracleError::EmptyReply) => {
            #[cfg(feature = "logging")]
            tracing::debug!("Empty description reply, skipping: {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    // A heuristic-detected type wins over the model's reply; the model's
    // type field is the less reliable of the two.
    let resolved_type = match file_type {
        Some(t) => t,
        None => match tables::resolve_canonical(&reply.file_type) {
            Some(t) => t.to_string(),
            None => reply.file_type,
        },
    };

    let report = FileReport {
        file_type: resolved_type,
        description: clean_description(&reply.description),
        skip: false,
        reserved: false,
        size_bytes: metadata.len(),
    };
    tracker.record(OP_ANALYZE_FILE, started, ctx);
    Ok(Some(report))
}

// Resolves a file's type through the cheap lookups, falling back to one
// bounded oracle call when everything misses.
fn detect_file_type(
    filename: &str,
    content: &[u8],
    oracle: &dyn Oracle,
    options: &AnalyzeOptions,
    tracker: &mut SpeedTracker,
    ctx: &OpContext,
) -> Result<Option<String>, AnalyzeError> {
    // whole filename, for names that carry a type (readme files)
    if let Some(t) = tables::resolve_canonical(filename) {
        return Ok(Some(t.to_string()));
    }
    // last extension, for names with multiple periods
    if let Some((_, ext)) = filename.rsplit_once('.') {
        if let Some(t) = tables::resolve_canonical(ext) {
            return Ok(Some(t.to_string()));
        }
    }
    if let Some(interpreter) = detect::detect_shebang(content) {
        let t = tables::resolve_canonical(&interpreter)
            .map_or(interpreter.clone(), str::to_string);
        return Ok(Some(t));
    }

    let started = Instant::now();
    let sample = oracle::sample_text(content);
    let reply: FileTypeReply = oracle::complete_json(
        oracle,
        &OracleRequest {
            model: &options.classify_model,
            system: prompts::ANALYZE_FILE_TYPE,
            prompt: &sample,
            format: &FILE_TYPE_SCHEMA,
        },
    )?;
    tracker.record(OP_DETECT_TYPE, started, ctx.clone());

    let file_type = match tables::resolve_canonical(&reply.file_type) {
        Some(t) => t.to_string(),
        None => reply.file_type,
    };
    if !file_type.is_empty() {
        return Ok(Some(file_type));
    }
    if !reply.category.is_empty() {
        return Ok(Some(reply.category));
    }
    #[cfg(feature = "logging")]
    tracing::debug!("Oracle returned neither type nor category for {}", filename);
    Ok(None)
}

// Nothing past the binary-detection prefix is ever needed: every prompt
// sample fits inside it.
fn read_sample(path: &Path) -> Result<Vec<u8>, AnalyzeError> {
    let file = File::open(path).map_err(|e| AnalyzeError::io(path, e))?;
    let mut sample = Vec::with_capacity(4096);
    file.take(detect::BINARY_SAMPLE_BYTES as u64)
        .read_to_end(&mut sample)
        .map_err(|e| AnalyzeError::io(path, e))?;
    Ok(sample)
}

// Not touching capitalization; it can carry meaning in the description.
fn clean_description(description: &str) -> String {
    let mut desc = description;
    for prefix in ["This file contains", "This is", "This file is"] {
        if let Some(rest) = desc.strip_prefix(prefix) {
            desc = rest;
            break;
        }
    }
    desc.trim().to_string()
}
