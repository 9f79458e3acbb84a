use std::path::{Path, PathBuf};

/// One regular file extracted into the scratch directory
#[derive(Debug, Clone)]
pub struct Entry {
    /// Path relative to the scratch root, always with forward slashes
    pub relative_path: String,
    /// Size on disk in bytes
    pub size: u64,
    /// Extension including the leading dot (e.g. ".py"), empty when absent
    pub extension: String,
    /// Absolute location inside the scratch directory
    pub disk_path: PathBuf,
}

impl Entry {
    pub fn new(relative_path: String, size: u64, disk_path: PathBuf) -> Self {
        let extension = extension_of(&disk_path);
        Self {
            relative_path,
            size,
            extension,
            disk_path,
        }
    }
}

/// Dotted extension as it appears in the file name, case preserved
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}
