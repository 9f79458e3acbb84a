mod section;


pub use section::{fence_for, normalize_newlines, Section};

use std::io::{self, Write};

/// Streams the merged document into any writer
pub struct Aggregator<W: Write> {
    out: W,
    sections: usize,
}

impl<W: Write> Aggregator<W> {
    pub fn new(out: W) -> Self {
        Self { out, sections: 0 }
    }

    /// Document title, written once before any section
    pub fn write_header(&mut self, archive_name: &str) -> io::Result<()> {
        write!(self.out, "# Content of {}\n\n", archive_name)
    }

    pub fn write_section(&mut self, section: &Section) -> io::Result<()> {
        section.render(&mut self.out)?;
        self.sections += 1;
        Ok(())
    }

    pub fn section_count(&self) -> usize {
        self.sections
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
