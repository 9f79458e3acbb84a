use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::aggregator::{Aggregator, Section};
use crate::classifier::{classify, is_text_file, Classification, ConverterRegistry};
use crate::config::MergeOptions;
use crate::converter::convert_file;
use crate::scratch::{Entry, ScratchBuilder};

/// Summary of a finished merge
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeReport {
    pub archive: PathBuf,
    pub output: PathBuf,
    /// Files written to the scratch directory
    pub extracted: usize,
    /// Archive members refused during extraction
    pub rejected: usize,
    pub converted: usize,
    pub text: usize,
    /// Entries left out of the document (binary or unreadable)
    pub skipped: usize,
    /// Relative paths of the written sections, in document order
    pub sections: Vec<String>,
}

/// `foo.zip` -> `foo.zip.md`, in the same directory
pub fn default_output_path(archive: &Path) -> Result<PathBuf> {
    let name = match archive.file_name() {
        Some(name) => name.to_string_lossy(),
        None => bail!("Archive path has no file name: {}", archive.display()),
    };
    Ok(archive.with_file_name(format!("{}.md", name)))
}

/// Merge `archive` using the converters found on this system
pub fn process_archive(archive: &Path, options: &MergeOptions) -> Result<MergeReport> {
    let registry = if options.convert {
        ConverterRegistry::detect(&options.python)
    } else {
        ConverterRegistry::new()
    };
    process_archive_with(archive, options, &registry)
}

/// Merge `archive` with an explicit converter registry.
///
/// The output file only appears once the whole document has been written.
pub fn process_archive_with(
    archive: &Path,
    options: &MergeOptions,
    registry: &ConverterRegistry,
) -> Result<MergeReport> {
    let output = match &options.output {
        Some(path) => path.clone(),
        None => default_output_path(archive)?,
    };
    let archive_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    info!(archive = %archive.display(), "Processing archive");

    let mut extractor = ScratchBuilder::new()
        .max_entry_size(options.max_entry_size)
        .max_total_size(options.max_total_size);
    if let Some(dir) = &options.scratch_dir {
        extractor = extractor.scratch_in(dir);
    }
    let scratch = extractor
        .extract(archive)
        .with_context(|| format!("Failed to extract {}", archive.display()))?;

    let mut report = MergeReport {
        archive: archive.to_path_buf(),
        output: output.clone(),
        extracted: scratch.file_count(),
        rejected: scratch.rejected_count(),
        ..Default::default()
    };

    let output_dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let staging = staging_file(&output_dir)
        .with_context(|| format!("Failed to create output in {}", output_dir.display()))?;

    {
        let mut aggregator = Aggregator::new(BufWriter::new(staging.as_file()));
        aggregator
            .write_header(&archive_name)
            .context("Failed to write document header")?;

        for entry in scratch.entries() {
            let Some(section) = build_section(registry, &entry, &mut report) else {
                continue;
            };
            aggregator
                .write_section(&section)
                .with_context(|| format!("Failed to write section for {}", entry.relative_path))?;
            report.sections.push(section.path);
        }

        aggregator.finish().context("Failed to flush output")?;
    }

    staging
        .persist(&output)
        .with_context(|| format!("Failed to save output to {}", output.display()))?;

    if let Err(e) = scratch.close() {
        warn!(error = %e, "Failed to remove scratch directory");
    }

    Ok(report)
}

/// Temp file next to the final output.
///
/// Created with the mode a plain `File::create` would get, so the persisted
/// document is not left owner-only.
fn staging_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".zipmd-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Turn one entry into a section, or `None` when it is left out
fn build_section(
    registry: &ConverterRegistry,
    entry: &Entry,
    report: &mut MergeReport,
) -> Option<Section> {
    let path = &entry.disk_path;

    match classify(registry, path) {
        Classification::Convert(converter) => {
            let result = convert_file(converter, path);
            if let (true, Some(content)) = (result.converted, result.content) {
                info!(path = %entry.relative_path, converter = converter.name(), "Converted and Added");
                report.converted += 1;
                return Some(Section::converted(entry, content));
            }
            if !is_text_file(path) {
                debug!(path = %entry.relative_path, "Skipping binary file");
                report.skipped += 1;
                return None;
            }
            read_text(entry, report)
        }
        Classification::Text => read_text(entry, report),
        Classification::Opaque => {
            debug!(path = %entry.relative_path, "Skipping binary file");
            report.skipped += 1;
            None
        }
    }
}

fn read_text(entry: &Entry, report: &mut MergeReport) -> Option<Section> {
    match fs::read(&entry.disk_path) {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes).into_owned();
            info!(path = %entry.relative_path, "Added");
            report.text += 1;
            Some(Section::text(entry, content))
        }
        Err(e) => {
            warn!(path = %entry.relative_path, error = %e, "Skipping unreadable file");
            report.skipped += 1;
            None
        }
    }
}
