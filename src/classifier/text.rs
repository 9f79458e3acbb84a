use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Extensions always treated as text, lowercase with the leading dot
pub const TEXT_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".py", ".js", ".html", ".css", ".json", ".xml", ".yml", ".yaml", ".ini",
    ".conf", ".sh", ".bat", ".c", ".cpp", ".h", ".java", ".rs", ".go", ".ts", ".tsx", ".jsx",
    ".vue", ".php", ".rb", ".pl", ".sql", ".r", ".m", ".swift", ".kt",
];

/// Bytes inspected by the content sniff
pub const SNIFF_LEN: usize = 1024;

/// Whether the file should be inlined as text.
///
/// Known extensions win; everything else is sniffed. Unreadable files are
/// never text.
pub fn is_text_file(path: &Path) -> bool {
    if has_text_extension(path) {
        return true;
    }

    match read_head(path, SNIFF_LEN) {
        Ok(head) => looks_like_text(&head),
        Err(_) => false,
    }
}

pub fn has_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}

/// True when `head` is valid UTF-8, allowing a multi-byte sequence to be cut
/// off at the very end.
pub fn looks_like_text(head: &[u8]) -> bool {
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

fn read_head(path: &Path, limit: usize) -> io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(limit);
    File::open(path)?
        .take(limit as u64)
        .read_to_end(&mut head)?;
    Ok(head)
}
