// Public API exports
pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod converter;
pub mod pipeline;
pub mod scratch;
pub mod security;

#[cfg(test)]
mod testutil;

// Re-export main types for convenience
pub use scratch::{ArchiveError, Entry, Scratch, ScratchBuilder};
pub use security::PathSanitizer;

pub use classifier::{classify, is_text_file, Classification, ConverterRegistry};
pub use converter::{convert_file, ConversionResult, ConvertError, Converter, ExternalConverter};

pub use aggregator::{Aggregator, Section};

pub use config::MergeOptions;
pub use pipeline::{default_output_path, process_archive, process_archive_with, MergeReport};
