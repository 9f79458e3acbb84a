mod registry;
mod text;

#[cfg(test)]
mod tests;

pub use registry::{ConverterRegistry, NOTEBOOK_EXTENSION, PANDOC_EXTENSIONS};
pub use text::{has_text_extension, is_text_file, looks_like_text, SNIFF_LEN, TEXT_EXTENSIONS};

use crate::converter::Converter;
use std::fmt;
use std::path::Path;

/// How a single entry will be handled
pub enum Classification<'a> {
    /// Run through an external converter first
    Convert(&'a dyn Converter),
    /// Inline the file contents
    Text,
    /// Leave out of the output
    Opaque,
}

/// Pick a handling strategy for `path`.
///
/// A registered converter takes priority; otherwise the text heuristic decides.
pub fn classify<'a>(registry: &'a ConverterRegistry, path: &Path) -> Classification<'a> {
    if let Some(converter) = registry.select(path) {
        return Classification::Convert(converter);
    }
    if is_text_file(path) {
        Classification::Text
    } else {
        Classification::Opaque
    }
}

impl fmt::Debug for Classification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Convert(converter) => {
                f.debug_tuple("Convert").field(&converter.name()).finish()
            }
            Classification::Text => f.write_str("Text"),
            Classification::Opaque => f.write_str("Opaque"),
        }
    }
}
