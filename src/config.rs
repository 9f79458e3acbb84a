use crate::scratch::{DEFAULT_MAX_ENTRY_SIZE, DEFAULT_MAX_TOTAL_SIZE};
use std::path::PathBuf;

pub const DEFAULT_PYTHON: &str = "python3";

/// Settings for one merge run
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Destination file; `None` means `<archive>.md` next to the archive
    pub output: Option<PathBuf>,
    /// Whether to look for and use external converters
    pub convert: bool,
    /// Interpreter used to run jupytext
    pub python: String,
    pub max_entry_size: u64,
    pub max_total_size: u64,
    /// Parent of the scratch directory; `None` means the system temp dir
    pub scratch_dir: Option<PathBuf>,
}

impl MergeOptions {
    pub fn new() -> Self {
        Self {
            output: None,
            convert: true,
            python: DEFAULT_PYTHON.to_string(),
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
            max_total_size: DEFAULT_MAX_TOTAL_SIZE,
            scratch_dir: None,
        }
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn convert(mut self, enabled: bool) -> Self {
        self.convert = enabled;
        self
    }

    pub fn python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    pub fn max_entry_size(mut self, size: u64) -> Self {
        self.max_entry_size = size;
        self
    }

    pub fn max_total_size(mut self, size: u64) -> Self {
        self.max_total_size = size;
        self
    }

    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::new()
    }
}
