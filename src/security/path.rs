use crate::scratch::ArchiveError;
use std::path::{Component, Path};

pub struct PathSanitizer;

impl PathSanitizer {
    /// Turn a ZIP member name into a relative path that stays inside the
    /// extraction root.
    ///
    /// Backslashes are treated as separators, since some Windows archivers
    /// write them. Absolute names, drive letters and `..` components are
    /// rejected. Hidden files are kept.
    pub fn sanitize(raw_name: &str) -> Result<String, ArchiveError> {
        // Reject empty names
        if raw_name.is_empty() {
            return Err(ArchiveError::InvalidPath("Empty path".to_string()));
        }
        // Reject embedded NUL bytes
        if raw_name.contains('\0') {
            return Err(ArchiveError::InvalidPath(format!(
                "NUL byte in path: {:?}",
                raw_name
            )));
        }

        // Reject Windows drive prefixes, which Path does not see on Unix
        let normalized = raw_name.replace('\\', "/");
        if has_drive_letter(&normalized) {
            return Err(ArchiveError::InvalidPath(format!(
                "Absolute path not allowed: {}",
                raw_name
            )));
        }

        let mut components = Vec::new();
        for component in Path::new(&normalized).components() {
            match component {
                // Reject absolute paths
                Component::Prefix(_) | Component::RootDir => {
                    return Err(ArchiveError::InvalidPath(format!(
                        "Absolute path not allowed: {}",
                        raw_name
                    )));
                }
                // Reject parent directory traversal
                Component::ParentDir => {
                    return Err(ArchiveError::InvalidPath(format!(
                        "Parent directory traversal not allowed: {}",
                        raw_name
                    )));
                }
                // Skip current directory markers
                Component::CurDir => continue,
                Component::Normal(part) => {
                    let part = part.to_str().ok_or_else(|| {
                        ArchiveError::InvalidPath(format!("Invalid UTF-8 in path: {:?}", part))
                    })?;
                    components.push(part);
                }
            }
        }

        // Reject if no valid components remain
        if components.is_empty() {
            return Err(ArchiveError::InvalidPath(format!(
                "No valid components: {}",
                raw_name
            )));
        }

        Ok(components.join("/"))
    }
}

fn has_drive_letter(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
