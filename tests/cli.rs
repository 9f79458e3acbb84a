use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Text, python, nested markdown, a PNG and an HTML page.
fn create_test_zip(dir: &Path) -> PathBuf {
    let path = dir.join("test_archive.zip");
    let mut zip = ZipWriter::new(File::create(&path).expect("Creating zip failed"));
    let options = SimpleFileOptions::default();

    let members: [(&str, &[u8]); 5] = [
        ("hello.txt", b"Hello world from a text file!"),
        ("script.py", b"print('This is a python script')"),
        ("docs/readme.md", b"# Documentation\nThis is a markdown file."),
        ("image.png", b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR"),
        ("page.html", b"<h1>Title</h1>"),
    ];
    for (name, data) in members {
        zip.start_file(name, options).expect("Starting zip entry failed");
        zip.write_all(data).expect("Writing zip entry failed");
    }
    zip.finish().expect("Finishing zip failed");
    path
}

fn zipmd() -> Command {
    let mut cmd = Command::cargo_bin("zipmd").expect("Binary exists");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn merges_text_entries_next_to_archive() {
    let dir = tempfile::tempdir().unwrap();
    let archive = create_test_zip(dir.path());

    zipmd()
        .arg(&archive)
        .arg("--no-convert")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done! Output saved to"))
        .stderr(predicate::str::contains("Added"));

    let output = dir.path().join("test_archive.zip.md");
    let text = fs::read_to_string(&output).expect("output written");
    assert!(text.starts_with("# Content of test_archive.zip\n\n"));
    assert_eq!(text.matches("## File: ").count(), 4);
    assert!(text.contains("## File: docs/readme.md\n"));
    assert!(text.contains("- **Extension**: .py\n"));
    assert!(!text.contains("image.png"));
}

#[test]
fn missing_converters_fall_back_to_text() {
    let dir = tempfile::tempdir().unwrap();
    let archive = create_test_zip(dir.path());
    let empty_path = tempfile::tempdir().unwrap();

    zipmd()
        .arg(&archive)
        .env("PATH", empty_path.path())
        .env("ZIPMD_PYTHON", "zipmd-no-such-python")
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("test_archive.zip.md")).unwrap();
    assert!(text.contains("## File: page.html\n"));
    assert!(!text.contains("(Converted)"));
    assert!(text.contains("```\n<h1>Title</h1>\n```"));
}

#[test]
fn corrupt_archive_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("broken.zip");
    fs::write(&archive, b"not a zip file").unwrap();

    zipmd()
        .arg(&archive)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid zip file"));

    assert!(!dir.path().join("broken.zip.md").exists());
}

#[test]
fn missing_archive_fails() {
    let dir = tempfile::tempdir().unwrap();

    zipmd()
        .arg(dir.path().join("nowhere.zip"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Archive not found"));
}

#[test]
fn json_report_and_custom_output() {
    let dir = tempfile::tempdir().unwrap();
    let archive = create_test_zip(dir.path());
    let target = dir.path().join("merged.md");

    let assert = zipmd()
        .arg(&archive)
        .args(["--no-convert", "--json", "-q", "-o"])
        .arg(&target)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON report");
    assert_eq!(report["extracted"], 5);
    assert_eq!(report["text"], 4);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["sections"].as_array().unwrap().len(), 4);

    assert!(target.exists());
    assert!(!dir.path().join("test_archive.zip.md").exists());
}

#[test]
fn requires_archive_argument() {
    zipmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("<ARCHIVE>"));
}

#[test]
fn scratch_dir_is_cleaned_up() {
    let dir = tempfile::tempdir().unwrap();
    let archive = create_test_zip(dir.path());
    let scratch = tempfile::tempdir().unwrap();

    zipmd()
        .arg(&archive)
        .args(["--no-convert", "--scratch-dir"])
        .arg(scratch.path())
        .assert()
        .success();

    assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
}
