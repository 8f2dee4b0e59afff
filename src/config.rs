//! Configuration for a concatenation run

/// File name suffixes selected when no extensions are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".cpp", ".c", ".h", ".hpp",
];

/// Directory names pruned when no exclusions are configured.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &["node_modules", "venv", ".git", "__pycache__", "build", "dist"];

/// Output file written by the CLI when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "concatenated_code.txt";

/// Selection rules for a concatenation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatConfig {
    /// Suffixes tested against each file name, in order. Case-sensitive,
    /// each including its leading dot (e.g. ".py").
    pub extensions: Vec<String>,
    /// Directory basenames whose whole subtree is skipped, at any depth.
    pub exclude_dirs: Vec<String>,
}

impl ConcatConfig {
    /// Replace the extension list.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the excluded directory names.
    pub fn with_exclude_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = names.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ConcatConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
