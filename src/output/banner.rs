//! Banner block writer

use std::io::{self, Write};

/// Width of the `=` rule above and below each `File:` line.
pub const SEPARATOR_WIDTH: usize = 80;

/// Writes banner blocks and file contents to an underlying writer, counting
/// the bytes that pass through.
pub struct BannerWriter<W: Write> {
    inner: W,
    rule: String,
    bytes_written: u64,
}

impl<W: Write> BannerWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            rule: "=".repeat(SEPARATOR_WIDTH),
            bytes_written: 0,
        }
    }

    /// Write the banner that introduces the file at `relative`.
    pub fn write_banner(&mut self, relative: &str) -> io::Result<()> {
        let banner = format!("\n{rule}\nFile: {relative}\n{rule}\n\n", rule = self.rule);
        self.write_raw(banner.as_bytes())
    }

    /// Write file contents verbatim.
    pub fn write_contents(&mut self, contents: &[u8]) -> io::Result<()> {
        self.write_raw(contents)
    }

    /// Write the inline note that replaces the contents of an unreadable file.
    pub fn write_read_error(&mut self, err: &io::Error) -> io::Result<()> {
        let line = format!("Error reading file: {}\n", err);
        self.write_raw(line.as_bytes())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}
