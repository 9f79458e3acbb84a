use crate::scratch::Entry;
use std::io::{self, Write};

/// One rendered block of the merged document
#[derive(Debug, Clone)]
pub struct Section {
    pub path: String,
    pub size: u64,
    pub extension: String,
    pub content: String,
    pub converted: bool,
}

impl Section {
    pub fn text(entry: &Entry, content: String) -> Self {
        Self::from_entry(entry, content, false)
    }

    pub fn converted(entry: &Entry, content: String) -> Self {
        Self::from_entry(entry, content, true)
    }

    fn from_entry(entry: &Entry, content: String, converted: bool) -> Self {
        Self {
            path: entry.relative_path.clone(),
            size: entry.size,
            extension: entry.extension.clone(),
            content: normalize_newlines(content),
            converted,
        }
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let suffix = if self.converted { " (Converted)" } else { "" };
        let info = if self.converted { "markdown" } else { "" };
        let fence = fence_for(&self.content);

        writeln!(out, "## File: {}{}", self.path, suffix)?;
        writeln!(out, "- **Size**: {} bytes", self.size)?;
        writeln!(out, "- **Extension**: {}", self.extension)?;
        writeln!(out, "- **Path**: {}", self.path)?;
        writeln!(out)?;
        writeln!(out, "{}{}", fence, info)?;
        out.write_all(self.content.as_bytes())?;
        write!(out, "\n{}\n\n", fence)?;
        write!(out, "---\n\n")
    }
}

/// Rewrite `\r\n` and lone `\r` as `\n`
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Backtick fence that cannot be closed by anything inside `content`
pub fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    let len = if longest >= 3 { longest + 1 } else { 3 };
    "`".repeat(len)
}
