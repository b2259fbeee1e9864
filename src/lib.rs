//! # Dirsage
//!
//! `dirsage` classifies every file in a directory tree into a semantic type
//! and a short description, then distills the per-file results into one
//! description of the directory's overall purpose.
//!
//! Classification runs a cascade of cheap heuristics first: reserved
//! filenames, media/archive extensions, binary-content sampling, canonical
//! name/extension lookup, and shebang detection. Only when every heuristic
//! misses does a file reach the oracle (a structured-completion language
//! model, Ollama by default), and always with a bounded content sample.
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use dirsage::{AnalyzeBuilder, OllamaOracle, analyze_directory};
//!
//! let options = AnalyzeBuilder::new(".")
//!     .skip_dotfiles(true)
//!     .skip_dirs(vec![".git".into(), "node_modules".into()])
//!     .build();
//!
//! let oracle = OllamaOracle::default();
//! let description = analyze_directory(&options, &oracle, &mut ())
//!     .expect("Failed to analyze directory");
//!
//! println!("{}", description);
//! ```

mod classify;
mod engine;
mod error;
mod manifest;
mod options;
mod walker;

pub mod detect;
pub mod oracle;
pub mod progress;
pub mod prompts;
pub mod tables;

pub use classify::{FileReport, analyze_file};
pub use engine::{Progress, ProgressSink, analyze_directory, count_describable};
pub use error::AnalyzeError;
pub use manifest::{Manifest, summarize};
pub use options::{AnalyzeBuilder, AnalyzeOptions};
pub use oracle::{MAX_SAMPLE_BYTES, OllamaOracle, Oracle, OracleError, OracleRequest};
pub use progress::{OpContext, SpeedRecord, SpeedTracker};
pub use walker::enumerate_files;
