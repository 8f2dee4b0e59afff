//! Codecat - flatten a source tree into a single annotated text file

pub mod concat;
pub mod config;
pub mod output;
pub mod stats;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use concat::{concatenate, concatenate_to};
pub use config::{ConcatConfig, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSIONS, DEFAULT_OUTPUT};
pub use output::BannerWriter;
pub use stats::{ConcatStats, StatsCollector, print_stats, print_stats_json};
pub use walk::{DirFilter, ExtensionFilter, SkippedDir, SourceFile, SourceWalker, WalkItem};
