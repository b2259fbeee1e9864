use crate::oracle::models;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    pub root: PathBuf,
    /// Directory names pruned from the walk entirely (descendants never visited).
    pub skip_dirs: Vec<String>,
    /// Skip files and directories whose name starts with a period.
    pub skip_dotfiles: bool,
    pub follow_links: bool,
    pub ignore_patterns: Vec<String>,
    /// Model used for the type-detection fallback call.
    pub classify_model: String,
    /// Model used for per-file description calls.
    pub describe_model: String,
    /// Model used for the final directory summarization call.
    pub summarize_model: String,
}
impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            skip_dirs: vec![".git".to_string(), "node_modules".to_string()],
            skip_dotfiles: true,
            follow_links: false,
            ignore_patterns: Vec::new(),
            classify_model: models::LLAMA3.to_string(),
            describe_model: models::LLAMA3.to_string(),
            summarize_model: models::DEEPSEEK.to_string(),
        }
    }
}
#[derive(Debug, Default)]
pub struct AnalyzeBuilder {
    options: AnalyzeOptions,
}
impl AnalyzeBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: AnalyzeOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn skip_dirs(mut self, dirs: Vec<String>) -> Self {
        self.options.skip_dirs = dirs;
        self
    }
    pub fn skip_dotfiles(mut self, yes: bool) -> Self {
        self.options.skip_dotfiles = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn classify_model(mut self, model: impl Into<String>) -> Self {
        self.options.classify_model = model.into();
        self
    }
    pub fn describe_model(mut self, model: impl Into<String>) -> Self {
        self.options.describe_model = model.into();
        self
    }
    pub fn summarize_model(mut self, model: impl Into<String>) -> Self {
        self.options.summarize_model = model.into();
        self
    }
    pub fn build(self) -> AnalyzeOptions {
        self.options
    }
}
