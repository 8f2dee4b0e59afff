//! SourceWalker - lazily yields selected files in a deterministic order

use std::fs;
use std::path::{Component, Path, PathBuf};

use ignore::{DirEntry, Walk, WalkBuilder};
use serde::Serialize;

use crate::config::ConcatConfig;

use super::filter::{DirFilter, ExtensionFilter};

/// A file selected for concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated on every platform.
    pub relative: String,
    /// The configured suffix that selected this file.
    pub extension: String,
}

/// A directory that could not be listed. Its subtree is not visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDir {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub reason: String,
}

impl SkippedDir {
    fn from_error(err: &ignore::Error) -> Self {
        Self {
            path: error_path(err),
            reason: err.to_string(),
        }
    }
}

/// One step of a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkItem {
    File(SourceFile),
    Skipped(SkippedDir),
}

/// Walks a directory tree, pruning excluded directories before descent and
/// yielding the files whose names match the extension filter.
///
/// Entries are visited depth-first, each directory's entries in file name
/// order. Symlinked directories are never entered.
pub struct SourceWalker {
    root: PathBuf,
    extensions: ExtensionFilter,
    dirs: DirFilter,
}

impl SourceWalker {
    pub fn new(root: impl Into<PathBuf>, extensions: ExtensionFilter, dirs: DirFilter) -> Self {
        Self {
            root: root.into(),
            extensions,
            dirs,
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &ConcatConfig) -> Self {
        Self::new(
            root,
            ExtensionFilter::new(config.extensions.iter().cloned()),
            DirFilter::new(config.exclude_dirs.iter().cloned()),
        )
    }

    /// Start a walk. Nothing touches the filesystem until the iterator is polled.
    pub fn walk(&self) -> SourceFiles<'_> {
        SourceFiles {
            walker: self,
            inner: self.build(),
        }
    }

    fn build(&self) -> Walk {
        let dirs = self.dirs.clone();
        WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                // The root is never pruned, only directories found beneath it
                entry.depth() == 0 || !is_dir(entry) || dirs.should_descend(entry.file_name())
            })
            .build()
    }

    fn select(&self, entry: &DirEntry) -> Option<SourceFile> {
        if entry.depth() == 0 {
            return None;
        }
        let file_type = entry.file_type()?;
        let path = entry.path();

        // A symlink counts when it resolves to a regular file. Dangling links
        // are kept so the read failure shows up inline.
        let is_candidate = if file_type.is_symlink() {
            fs::metadata(path).map(|m| m.is_file()).unwrap_or(true)
        } else {
            file_type.is_file()
        };
        if !is_candidate {
            return None;
        }

        let name = entry.file_name().to_string_lossy();
        let extension = self.extensions.matching_extension(&name)?.to_string();

        Some(SourceFile {
            path: path.to_path_buf(),
            relative: relative_path(&self.root, path),
            extension,
        })
    }
}

/// Iterator over the items of one walk.
pub struct SourceFiles<'a> {
    walker: &'a SourceWalker,
    inner: Walk,
}

impl Iterator for SourceFiles<'_> {
    type Item = WalkItem;

    fn next(&mut self) -> Option<WalkItem> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    if let Some(file) = self.walker.select(&entry) {
                        return Some(WalkItem::File(file));
                    }
                }
                Err(err) => return Some(WalkItem::Skipped(SkippedDir::from_error(&err))),
            }
        }
    }
}

/// Render `path` relative to `root` with `/` separators.
///
/// Paths outside `root` are rendered as-is.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
}

fn error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}
