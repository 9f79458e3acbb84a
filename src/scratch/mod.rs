mod entry;
mod error;


pub use entry::{extension_of, Entry};
pub use error::ArchiveError;

use crate::security::PathSanitizer;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const DEFAULT_MAX_ENTRY_SIZE: u64 = 50 * 1024 * 1024;
pub const DEFAULT_MAX_TOTAL_SIZE: u64 = 500 * 1024 * 1024;

/// Extracted archive living in a temporary directory.
///
/// The directory and everything in it is removed when this value is dropped.
pub struct Scratch {
    dir: TempDir,
    extracted: usize,
    rejected: usize,
    total_size: u64,
}

/// Extraction limits, applied while unpacking
pub struct ScratchBuilder {
    max_entry_size: u64,
    max_total_size: u64,
    parent: Option<PathBuf>,
}

impl ScratchBuilder {
    /// Create a new builder with default limits
    pub fn new() -> Self {
        Self {
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
            max_total_size: DEFAULT_MAX_TOTAL_SIZE,
            parent: None,
        }
    }

    /// Set maximum uncompressed size of a single entry
    pub fn max_entry_size(mut self, size: u64) -> Self {
        self.max_entry_size = size;
        self
    }

    /// Set maximum uncompressed size of the whole archive
    pub fn max_total_size(mut self, size: u64) -> Self {
        self.max_total_size = size;
        self
    }

    /// Create the scratch directory under `dir` instead of the system temp dir
    pub fn scratch_in(mut self, dir: impl Into<PathBuf>) -> Self {
        self.parent = Some(dir.into());
        self
    }

    /// Unpack `archive_path` into a fresh scratch directory.
    ///
    /// Members with unsafe names or over the per-entry limit are skipped and
    /// counted as rejected. Anything that makes the archive unreadable aborts.
    pub fn extract(self, archive_path: &Path) -> Result<Scratch, ArchiveError> {
        if !archive_path.exists() {
            return Err(ArchiveError::NotFound(archive_path.to_path_buf()));
        }

        let file = File::open(archive_path)?;
        let mut archive =
            zip::ZipArchive::new(file).map_err(|e| ArchiveError::Corrupt(e.to_string()))?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("zipmd-");
        let dir = match &self.parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        let mut scratch = Scratch {
            dir,
            extracted: 0,
            rejected: 0,
            total_size: 0,
        };

        for i in 0..archive.len() {
            let mut member = archive
                .by_index(i)
                .map_err(|e| ArchiveError::Corrupt(e.to_string()))?;

            // Sanitize the member name before it touches the filesystem
            let raw_name = member.name().to_string();
            let relative = match PathSanitizer::sanitize(&raw_name) {
                Ok(path) => path,
                Err(e) => {
                    warn!(member = %raw_name, error = %e, "Skipping archive member");
                    scratch.rejected += 1;
                    continue;
                }
            };
            let target = scratch.dir.path().join(&relative);

            // Directories only need to exist
            if member.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }

            // Check the declared size against both limits
            let declared = member.size();
            if let Err(e) = self.check_entry_size(declared) {
                warn!(member = %relative, error = %e, "Skipping archive member");
                scratch.rejected += 1;
                continue;
            }
            self.check_total_size(scratch.total_size.saturating_add(declared))?;

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)?;

            // Declared sizes can lie; never copy more than the limit allows.
            let limit = self.max_entry_size.saturating_add(1);
            let written = io::copy(&mut (&mut member).take(limit), &mut out)
                .map_err(|e| ArchiveError::Corrupt(format!("{}: {}", relative, e)))?;
            if let Err(e) = self.check_entry_size(written) {
                drop(out);
                fs::remove_file(&target)?;
                warn!(member = %relative, error = %e, "Skipping archive member");
                scratch.rejected += 1;
                continue;
            }

            scratch.total_size += written;
            self.check_total_size(scratch.total_size)?;
            scratch.extracted += 1;
            debug!(member = %relative, bytes = written, "Extracted");
        }

        Ok(scratch)
    }

    fn check_entry_size(&self, size: u64) -> Result<(), ArchiveError> {
        if size > self.max_entry_size {
            return Err(ArchiveError::EntryTooLarge {
                size,
                max: self.max_entry_size,
            });
        }
        Ok(())
    }

    fn check_total_size(&self, size: u64) -> Result<(), ArchiveError> {
        if size > self.max_total_size {
            return Err(ArchiveError::TooLarge {
                size,
                max: self.max_total_size,
            });
        }
        Ok(())
    }
}

impl Default for ScratchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Scratch {
    /// Root of the extracted tree
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Walk every regular file, depth-first, sorted by name within a directory
    pub fn entries(&self) -> Vec<Entry> {
        let root = self.dir.path();
        let mut entries = Vec::new();

        for item in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };

            // Skip directories and symlinks
            if !item.file_type().is_file() {
                continue;
            }

            let size = match item.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!(path = %item.path().display(), error = %e, "Failed to stat file");
                    continue;
                }
            };

            let relative_path = relative_to(root, item.path());
            entries.push(Entry::new(relative_path, size, item.into_path()));
        }

        entries
    }

    /// Number of files written during extraction
    pub fn file_count(&self) -> usize {
        self.extracted
    }

    /// Number of members skipped for unsafe names or size
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Total bytes written during extraction
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Remove the scratch directory now, reporting any failure
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}

fn relative_to(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
