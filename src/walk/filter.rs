//! Name-based filters applied during traversal

use std::collections::HashSet;
use std::ffi::OsStr;
use std::sync::Arc;

/// Selects files whose name ends with one of an ordered list of suffixes.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Return the first configured suffix that `name` ends with.
    pub fn matching_extension(&self, name: &str) -> Option<&str> {
        self.extensions
            .iter()
            .map(String::as_str)
            .find(|ext| name.ends_with(ext))
    }

    /// Check if a file with this name should be included.
    pub fn is_included(&self, name: &str) -> bool {
        self.matching_extension(name).is_some()
    }
}

/// Prunes directories whose basename is in the exclusion set.
///
/// Cloning is cheap so the filter can be moved into the walker's
/// `filter_entry` callback.
#[derive(Debug, Clone)]
pub struct DirFilter {
    excluded: Arc<HashSet<String>>,
}

impl DirFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: Arc::new(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Check if the walk should descend into a directory named `name`.
    pub fn should_descend(&self, name: &OsStr) -> bool {
        // Configured names are UTF-8, so a non-UTF-8 name can never match one
        match name.to_str() {
            Some(name) => !self.excluded.contains(name),
            None => true,
        }
    }
}
