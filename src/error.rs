use crate::oracle::OracleError;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),
    #[error("Summarization failed: {0}")]
    Summarize(#[source] OracleError),
}
impl AnalyzeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzeError::Io {
            path: path.into(),
            source,
        }
    }
}
