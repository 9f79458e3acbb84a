use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid zip file: {0}")]
    Corrupt(String),

    #[error("Invalid path in archive: {0}")]
    InvalidPath(String),

    #[error("Entry too large: {size} bytes (max: {max})")]
    EntryTooLarge { size: u64, max: u64 },

    #[error("Archive too large: {size} bytes uncompressed (max: {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("Failed to extract archive: {0}")]
    Io(#[from] std::io::Error),
}
