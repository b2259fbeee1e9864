//! Aggregation of per-file results into one directory manifest, and the
//! single summarization call made over it.

use crate::oracle::{self, Oracle, OracleError, OracleRequest};
use crate::prompts;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::LazyLock;

static PROJECT_DESCRIPTION_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "properties": {
            "description": { "type": "string" }
        },
        "required": ["description"]
    })
});

#[derive(Debug, Deserialize)]
struct ProjectDescriptionReply {
    description: String,
}

/// Ordered list of `"<path> (<type>) - <description>"` lines, one per
/// manifest-worthy file, in enumeration order.
#[derive(Debug, Default)]
pub struct Manifest {
    lines: Vec<String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, relative_path: &Path, file_type: &str, description: &str) {
        self.lines.push(format!(
            "{} ({}) - {}",
            relative_path.display(),
            file_type,
            description
        ));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The manifest as the prompt body for the summarization call.
    pub fn to_prompt(&self) -> String {
        self.lines.join("\n")
    }
}

/// Asks the oracle for one holistic description of the directory, given the
/// full manifest. Failure here is fatal to the directory analysis; without a
/// summary there is no usable result.
pub fn summarize(
    oracle: &dyn Oracle,
    model: &str,
    manifest: &Manifest,
) -> Result<String, OracleError> {
    let prompt = manifest.to_prompt();
    let reply: ProjectDescriptionReply = oracle::complete_json(
        oracle,
        &OracleRequest {
            model,
            system: prompts::ANALYZE_FILE_MAP,
            prompt: &prompt,
            format: &PROJECT_DESCRIPTION_SCHEMA,
        },
    )?;
    Ok(reply.description)
}
