use super::*;
use crate::converter::{ConvertError, Converter};
use std::path::{Path, PathBuf};

struct Named(&'static str);

impl Converter for Named {
    fn name(&self) -> &str {
        self.0
    }

    fn convert(&self, _path: &Path) -> Result<String, ConvertError> {
        Ok(String::new())
    }
}

fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

// ========================================================================
// Text heuristic
// ========================================================================

#[test]
fn test_allow_list_is_case_insensitive() {
    assert!(has_text_extension(Path::new("script.py")));
    assert!(has_text_extension(Path::new("README.MD")));
    assert!(has_text_extension(Path::new("src/Main.Java")));
    assert!(!has_text_extension(Path::new("image.png")));
    assert!(!has_text_extension(Path::new("Makefile")));
}

#[test]
fn test_allow_list_wins_over_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "weird.txt", &[0xFF, 0xFE, 0x00]);
    assert!(is_text_file(&path));
}

#[test]
fn test_sniff_accepts_utf8_without_known_extension() {
    let dir = tempfile::tempdir().unwrap();
    let makefile = write(dir.path(), "Makefile", b"all:\n\tcargo build\n");
    let toml = write(dir.path(), "Cargo.toml", "name = \"café\"".as_bytes());
    let empty = write(dir.path(), "EMPTY", b"");
    assert!(is_text_file(&makefile));
    assert!(is_text_file(&toml));
    assert!(is_text_file(&empty));
}

#[test]
fn test_sniff_rejects_binary() {
    let dir = tempfile::tempdir().unwrap();
    let png = write(dir.path(), "image.png", b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR");
    assert!(!is_text_file(&png));
}

#[test]
fn test_sniff_only_looks_at_head() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = vec![b'a'; SNIFF_LEN];
    data.extend_from_slice(&[0xFF, 0xFF]);
    let path = write(dir.path(), "data.bin", &data);
    assert!(is_text_file(&path));
}

#[test]
fn test_multibyte_cut_at_boundary_is_text() {
    let mut head = vec![b'a'; SNIFF_LEN - 1];
    // First byte of a 3-byte sequence ("€" is E2 82 AC).
    head.push(0xE2);
    assert!(looks_like_text(&head));
    assert!(!looks_like_text(&[0xE2, b'a']));
}

#[test]
fn test_missing_file_is_not_text() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!is_text_file(&dir.path().join("gone.dat")));
}

// ========================================================================
// Converter registry
// ========================================================================

#[test]
fn test_empty_registry_selects_nothing() {
    let registry = ConverterRegistry::new();
    assert!(registry.select(Path::new("report.docx")).is_none());
    assert_eq!(registry.converter_count(), 0);
}

#[test]
fn test_register_and_select_case_insensitive() {
    let mut registry = ConverterRegistry::new();
    registry.register(".DOCX", Named("pandoc"));
    registry.register("ipynb", Named("jupytext"));

    assert_eq!(
        registry.select(Path::new("Report.DocX")).unwrap().name(),
        "pandoc"
    );
    assert_eq!(
        registry.select(Path::new("nb/analysis.ipynb")).unwrap().name(),
        "jupytext"
    );
    assert!(registry.select(Path::new("notes")).is_none());
    assert_eq!(registry.registered_extensions(), vec!["docx", "ipynb"]);
}

#[test]
fn test_known_extension_tables() {
    assert_eq!(NOTEBOOK_EXTENSION, "ipynb");
    assert!(PANDOC_EXTENSIONS.contains(&"epub"));
    assert!(PANDOC_EXTENSIONS.contains(&"htm"));
    assert!(!PANDOC_EXTENSIONS.contains(&"md"));
}

// ========================================================================
// classify
// ========================================================================

#[test]
fn test_classify_prefers_converter() {
    let dir = tempfile::tempdir().unwrap();
    let html = write(dir.path(), "page.html", b"<p>hi</p>");
    let mut registry = ConverterRegistry::new();
    registry.register("html", Named("pandoc"));

    assert!(matches!(
        classify(&registry, &html),
        Classification::Convert(c) if c.name() == "pandoc"
    ));
}

#[test]
fn test_classify_without_converters() {
    let dir = tempfile::tempdir().unwrap();
    let html = write(dir.path(), "page.html", b"<p>hi</p>");
    let blob = write(dir.path(), "blob.bin", &[0x00, 0xC3, 0x28]);
    let registry = ConverterRegistry::new();

    assert!(matches!(classify(&registry, &html), Classification::Text));
    assert!(matches!(classify(&registry, &blob), Classification::Opaque));
    assert_eq!(format!("{:?}", classify(&registry, &blob)), "Opaque");
}
