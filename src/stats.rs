//! Run statistics collection and display
//!
//! This module tallies what a concatenation run wrote: how many files, which
//! extensions they came from, which files could not be read and which
//! directories had to be skipped.

use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::walk::SkippedDir;

/// Summary of a finished concatenation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConcatStats {
    /// Number of banner blocks written, unreadable files included
    pub files: usize,
    /// Total bytes written to the output
    pub bytes_written: u64,
    /// Files whose contents were replaced by an error line
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub read_errors: Vec<ReadFailure>,
    /// Directories that could not be listed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_dirs: Vec<SkippedDir>,
    /// Statistics by matched extension
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_extension: Vec<ExtensionStats>,
}

impl ConcatStats {
    /// Number of files whose contents made it into the output.
    pub fn files_read(&self) -> usize {
        self.files - self.read_errors.len()
    }
}

/// A selected file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadFailure {
    /// Path relative to the root, as shown in its banner
    pub path: String,
    pub reason: String,
}

/// Statistics for a single configured extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionStats {
    pub extension: String,
    pub files: usize,
    /// Content bytes copied from files with this extension
    pub bytes: u64,
}

/// Accumulates statistics while the tree is walked.
#[derive(Debug, Default)]
pub struct StatsCollector {
    files: usize,
    read_errors: Vec<ReadFailure>,
    skipped_dirs: Vec<SkippedDir>,
    /// Maps extension -> (file_count, content_bytes)
    by_extension: HashMap<String, (usize, u64)>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file whose contents were copied.
    pub fn record_file(&mut self, extension: &str, bytes: u64) {
        self.files += 1;
        let entry = self
            .by_extension
            .entry(extension.to_string())
            .or_insert((0, 0));
        entry.0 += 1;
        entry.1 += bytes;
    }

    /// Record a file that was announced but could not be read.
    pub fn record_read_error(&mut self, extension: &str, relative: &str, err: &io::Error) {
        self.files += 1;
        self.by_extension
            .entry(extension.to_string())
            .or_insert((0, 0))
            .0 += 1;
        self.read_errors.push(ReadFailure {
            path: relative.to_string(),
            reason: err.to_string(),
        });
    }

    /// Record a directory whose subtree was skipped.
    pub fn record_skipped_dir(&mut self, dir: SkippedDir) {
        self.skipped_dirs.push(dir);
    }

    /// Finalize and return the collected statistics.
    pub fn finalize(self, bytes_written: u64) -> ConcatStats {
        let mut by_extension: Vec<ExtensionStats> = self
            .by_extension
            .into_iter()
            .map(|(extension, (files, bytes))| ExtensionStats {
                extension,
                files,
                bytes,
            })
            .collect();

        // Sort by file count descending, then by extension for a stable order
        by_extension.sort_by(|a, b| {
            b.files
                .cmp(&a.files)
                .then_with(|| a.extension.cmp(&b.extension))
        });

        ConcatStats {
            files: self.files,
            bytes_written,
            read_errors: self.read_errors,
            skipped_dirs: self.skipped_dirs,
            by_extension,
        }
    }
}

/// Print statistics to stdout with optional color.
pub fn print_stats(stats: &ConcatStats, output: &Path, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    stdout.set_color(&bold)?;
    writeln!(stdout, "Concatenation Summary")?;
    stdout.reset()?;
    writeln!(stdout, "─────────────────────")?;

    writeln!(stdout, "Output:       {}", output.display())?;
    writeln!(
        stdout,
        "Files:        {} total, {} read",
        format_number(stats.files as u64),
        format_number(stats.files_read() as u64)
    )?;
    writeln!(stdout, "Bytes:        {}", format_number(stats.bytes_written))?;
    writeln!(stdout)?;

    if !stats.by_extension.is_empty() {
        stdout.set_color(&bold)?;
        writeln!(stdout, "By Extension:")?;
        stdout.reset()?;

        let mut ext_color = ColorSpec::new();
        ext_color.set_fg(Some(Color::Cyan));

        for ext in &stats.by_extension {
            write!(stdout, "  ")?;
            stdout.set_color(&ext_color)?;
            write!(stdout, "{:<10}", ext.extension)?;
            stdout.reset()?;
            writeln!(
                stdout,
                "{:>6} files  {:>10} bytes",
                format_number(ext.files as u64),
                format_number(ext.bytes)
            )?;
        }
        writeln!(stdout)?;
    }

    if !stats.read_errors.is_empty() || !stats.skipped_dirs.is_empty() {
        let mut warn = ColorSpec::new();
        warn.set_fg(Some(Color::Yellow)).set_bold(true);
        stdout.set_color(&warn)?;
        writeln!(stdout, "Problems:")?;
        stdout.reset()?;

        for failure in &stats.read_errors {
            writeln!(stdout, "  unreadable  {}: {}", failure.path, failure.reason)?;
        }
        for dir in &stats.skipped_dirs {
            writeln!(stdout, "  skipped     {}", dir.reason)?;
        }
    }

    Ok(())
}

/// Format a number with thousand separators.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Print statistics as JSON.
pub fn print_stats_json(stats: &ConcatStats) -> io::Result<()> {
    let json = serde_json::to_string_pretty(stats).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
