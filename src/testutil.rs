use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write a ZIP archive named `name` into `dir`.
///
/// Names ending in `/` become directory members.
pub fn write_zip(dir: &Path, name: &str, members: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (member, data) in members {
        if member.ends_with('/') {
            zip.add_directory(*member, options).unwrap();
        } else {
            zip.start_file(*member, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }

    zip.finish().unwrap();
    path
}
