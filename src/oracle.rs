//! The oracle port: a synchronous structured-completion interface and the
//! Ollama-backed implementation of it.
//!
//! Every call goes through the structured contract: a JSON schema is attached
//! to the request and the reply must deserialize against it. An empty reply
//! body is a distinguished condition ([`OracleError::EmptyReply`]) that some
//! callers treat as "nothing worth saying" rather than a failure.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;
#[cfg(feature = "logging")]
use tracing;

/// Maximum number of content bytes embedded in any oracle prompt.
///
/// Lowering this speeds up completions at the cost of accuracy; prompts are
/// always built from a truncated sample, never the whole file.
pub const MAX_SAMPLE_BYTES: usize = 1000;

/// Default model names for the bundled Ollama backend.
pub mod models {
    pub const LLAMA3: &str = "llama3.2:3b";
    pub const DEEPSEEK: &str = "deepseek-r1:7b";
    pub const CODELLAMA: &str = "codellama:7b";
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Oracle transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Oracle returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Oracle returned an empty reply")]
    EmptyReply,
    #[error("Oracle reply did not match the requested schema: {source}\nreply body: {body}")]
    MalformedReply {
        body: String,
        source: serde_json::Error,
    },
}

/// One structured-completion request. The model name travels with the
/// request, so no process-wide model selector exists.
#[derive(Debug)]
pub struct OracleRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub prompt: &'a str,
    /// JSON schema the reply must conform to.
    pub format: &'a Value,
}

/// Synchronous structured-completion port.
///
/// Implementations return the raw reply body; typed decoding happens in
/// [`complete_json`] so a test suite can substitute a deterministic fake.
pub trait Oracle {
    fn complete_structured(&self, request: &OracleRequest<'_>) -> Result<String, OracleError>;
}

/// Runs a structured completion and decodes the reply into `T`.
///
/// An empty body maps to [`OracleError::EmptyReply`]; a body that fails to
/// deserialize maps to [`OracleError::MalformedReply`].
pub fn complete_json<T: DeserializeOwned>(
    oracle: &dyn Oracle,
    request: &OracleRequest<'_>,
) -> Result<T, OracleError> {
    let body = oracle.complete_structured(request)?;
    if body.trim().is_empty() {
        return Err(OracleError::EmptyReply);
    }
    serde_json::from_str(&body).map_err(|source| OracleError::MalformedReply { body, source })
}

/// Truncates file content to the prompt sample budget, decoding lossily so a
/// cut mid-sequence cannot produce invalid text.
pub fn sample_text(content: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(&content[..content.len().min(MAX_SAMPLE_BYTES)])
}

/// Oracle backed by a local Ollama server's `/api/generate` endpoint.
pub struct OllamaOracle {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl OllamaOracle {
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:11434";

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for OllamaOracle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENDPOINT)
    }
}

impl Oracle for OllamaOracle {
    fn complete_structured(&self, request: &OracleRequest<'_>) -> Result<String, OracleError> {
        #[cfg(feature = "logging")]
        tracing::debug!("Oracle call: model={}", request.model);
        let body = serde_json::json!({
            "model": request.model,
            "system": request.system,
            "prompt": request.prompt,
            "stream": false,
            "format": request.format,
            "options": { "temperature": 0.0 },
        });
        let response = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .json(&body)
            .send()?;
        if !response.status().is_success() {
            return Err(OracleError::Status(response.status()));
        }
        let reply: Value = response.json()?;
        Ok(reply
            .get("response")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}
