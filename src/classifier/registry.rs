use crate::converter::{Converter, ExternalConverter};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Extensions handled by pandoc, without the leading dot
pub const PANDOC_EXTENSIONS: &[&str] = &[
    "docx", "odt", "tex", "latex", "rst", "org", "wiki", "epub", "html", "htm",
];

pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Extension -> converter dispatch table
pub struct ConverterRegistry {
    map: HashMap<String, Box<dyn Converter>>,
}

impl ConverterRegistry {
    /// Create an empty registry; every file goes through text handling
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Probe the system for the known converters and register what is found.
    ///
    /// Each tool is probed once here rather than per file.
    pub fn detect(python: &str) -> Self {
        let mut registry = Self::new();

        match ExternalConverter::jupytext(python) {
            Some(jupytext) => {
                info!(python = %python, "Notebook conversion enabled (jupytext)");
                registry.register(NOTEBOOK_EXTENSION, jupytext);
            }
            None => debug!("jupytext not found, notebooks will be read as text"),
        }

        match ExternalConverter::pandoc() {
            Some(pandoc) => {
                info!(program = %pandoc.program().display(), "Document conversion enabled (pandoc)");
                for ext in PANDOC_EXTENSIONS {
                    registry.register(*ext, pandoc.clone());
                }
            }
            None => debug!("pandoc not found, documents will be read as text"),
        }

        registry
    }

    /// Register a converter for an extension, with or without the leading dot
    pub fn register(&mut self, extension: impl Into<String>, converter: impl Converter + 'static) {
        self.map
            .insert(normalize_extension(&extension.into()), Box::new(converter));
    }

    /// Converter for `path`'s extension, if one is registered
    pub fn select(&self, path: &Path) -> Option<&dyn Converter> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())?;

        self.map.get(&ext).map(|c| &**c)
    }

    /// Number of registered extensions
    pub fn converter_count(&self) -> usize {
        self.map.len()
    }

    /// List all registered extensions, sorted
    pub fn registered_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.map.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}
