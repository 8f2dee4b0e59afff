//! Directory traversal with subtree pruning
//!
//! `SourceWalker` owns the mechanics of walking a tree. Which directories are
//! entered and which files are selected is decided by `DirFilter` and
//! `ExtensionFilter`, so the walk itself carries no selection policy.

mod filter;
mod walker;

pub use filter::{DirFilter, ExtensionFilter};
pub use walker::{SkippedDir, SourceFile, SourceFiles, SourceWalker, WalkItem, relative_path};
