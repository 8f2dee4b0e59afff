//! The concatenation pass: walk the tree, write a banner and contents per file
//!
//! `concatenate` is the file-backed entry point used by the CLI.
//! `concatenate_to` runs the same pass against any writer.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::ConcatConfig;
use crate::output::BannerWriter;
use crate::stats::{ConcatStats, StatsCollector};
use crate::walk::{SourceWalker, WalkItem};

/// Concatenate every selected file under `root` into the file at `output`.
///
/// The output is created or truncated before the walk starts; failing to
/// open it aborts before anything else happens. A root that cannot be listed
/// is also fatal. Unreadable files are reported inline in the output and
/// unreadable subdirectories are skipped; both are recorded in the returned
/// stats.
pub fn concatenate(root: &Path, output: &Path, config: &ConcatConfig) -> io::Result<ConcatStats> {
    let file = File::create(output)
        .map_err(|e| with_context(e, "cannot create output file", output))?;

    // Resolved after creation so the output can be recognized inside the tree
    let output_path = output.canonicalize().ok();

    let mut writer = BannerWriter::new(BufWriter::new(file));
    let stats = write_tree(root, &mut writer, config, output_path.as_deref())?;
    // Dropping the flushed writer closes the file
    writer.finish()?;
    Ok(stats)
}

/// Concatenate every selected file under `root` into `writer`.
pub fn concatenate_to<W: Write>(
    root: &Path,
    writer: W,
    config: &ConcatConfig,
) -> io::Result<ConcatStats> {
    let mut writer = BannerWriter::new(writer);
    let stats = write_tree(root, &mut writer, config, None)?;
    writer.finish()?;
    Ok(stats)
}

fn write_tree<W: Write>(
    root: &Path,
    out: &mut BannerWriter<W>,
    config: &ConcatConfig,
    skip: Option<&Path>,
) -> io::Result<ConcatStats> {
    // The walker would report a missing root as a skipped entry, and a
    // plain file root as itself. Both are fatal here.
    fs::read_dir(root).map_err(|e| with_context(e, "cannot read directory", root))?;

    let walker = SourceWalker::from_config(root, config);
    let mut stats = StatsCollector::new();

    for item in walker.walk() {
        let file = match item {
            WalkItem::File(file) => file,
            WalkItem::Skipped(dir) => {
                stats.record_skipped_dir(dir);
                continue;
            }
        };

        if skip.is_some_and(|skip| is_same_file(&file.path, skip)) {
            continue;
        }

        out.write_banner(&file.relative)?;
        match fs::read_to_string(&file.path) {
            Ok(contents) => {
                out.write_contents(contents.as_bytes())?;
                stats.record_file(&file.extension, contents.len() as u64);
            }
            Err(err) => {
                out.write_read_error(&err)?;
                stats.record_read_error(&file.extension, &file.relative, &err);
            }
        }
    }

    Ok(stats.finalize(out.bytes_written()))
}

fn is_same_file(path: &Path, resolved: &Path) -> bool {
    path.canonicalize()
        .map(|p| p.as_path() == resolved)
        .unwrap_or(false)
}

fn with_context(err: io::Error, what: &str, path: &Path) -> io::Error {
    io::Error::new(err.kind(), format!("{} '{}': {}", what, path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTree;

    fn block(relative: &str, body: &str) -> String {
        let rule = "=".repeat(80);
        format!("\n{rule}\nFile: {relative}\n{rule}\n\n{body}")
    }

    fn concat_to_string(root: &Path, config: &ConcatConfig) -> (String, ConcatStats) {
        let mut buf = Vec::new();
        let stats = concatenate_to(root, &mut buf, config).unwrap();
        (String::from_utf8(buf).unwrap(), stats)
    }

    #[test]
    fn test_default_config_scenario() {
        let tree = TestTree::new();
        tree.add_file("a.py", "x=1");
        tree.add_file("sub/b.py", "y=2");
        tree.add_file("sub/node_modules/c.py", "z=3");

        let (out, stats) = concat_to_string(tree.path(), &ConcatConfig::default());
        assert_eq!(out, block("a.py", "x=1") + &block("sub/b.py", "y=2"));
        assert_eq!(stats.files, 2);
        assert!(!out.contains("c.py"));
    }

    #[test]
    fn test_contents_are_copied_verbatim() {
        let tree = TestTree::new();
        tree.add_file("a.js", "line one\r\n\tline two\n\n\n");
        tree.add_file("b.js", "");

        let (out, _) = concat_to_string(tree.path(), &ConcatConfig::default());
        assert_eq!(
            out,
            block("a.js", "line one\r\n\tline two\n\n\n") + &block("b.js", "")
        );
    }

    #[test]
    fn test_invalid_utf8_is_reported_inline() {
        let tree = TestTree::new();
        tree.add_bytes("bad.py", &[0x66, 0x6f, 0xff, 0xfe, 0x00]);
        tree.add_file("good.py", "ok");

        let (out, stats) = concat_to_string(tree.path(), &ConcatConfig::default());
        let expected_prefix = block("bad.py", "Error reading file: ");
        assert!(out.starts_with(&expected_prefix), "got: {}", out);
        assert!(out.ends_with(&block("good.py", "ok")));
        assert_eq!(stats.files, 2);
        assert_eq!(stats.read_errors.len(), 1);
        assert_eq!(stats.read_errors[0].path, "bad.py");
    }

    #[test]
    fn test_empty_directory_produces_empty_output() {
        let tree = TestTree::new();
        let (out, stats) = concat_to_string(tree.path(), &ConcatConfig::default());
        assert!(out.is_empty());
        assert_eq!(stats.files, 0);
        assert_eq!(stats.bytes_written, 0);
    }

    #[test]
    fn test_no_matching_extension_produces_empty_output() {
        let tree = TestTree::new();
        tree.add_file("a.py", "x=1");
        tree.add_file("pkg/b.py", "y=2");

        let config = ConcatConfig::default().with_extensions([".md"]);
        let (out, _) = concat_to_string(tree.path(), &config);
        assert!(out.is_empty());
    }

    #[test]
    fn test_custom_exclusions_replace_defaults() {
        let tree = TestTree::new();
        tree.add_file("node_modules/dep.js", "dep");
        tree.add_file("vendor/lib.js", "vendored");

        let config = ConcatConfig::default().with_exclude_dirs(["vendor"]);
        let (out, _) = concat_to_string(tree.path(), &config);
        assert_eq!(out, block("node_modules/dep.js", "dep"));
    }

    #[test]
    fn test_bytes_written_matches_output() {
        let tree = TestTree::new();
        tree.add_file("a.c", "int main(void) { return 0; }\n");
        tree.add_file("a.h", "#pragma once\n");

        let (out, stats) = concat_to_string(tree.path(), &ConcatConfig::default());
        assert_eq!(stats.bytes_written, out.len() as u64);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tree = TestTree::new();
        let mut buf = Vec::new();
        let err = concatenate_to(&tree.path().join("missing"), &mut buf, &ConcatConfig::default())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("cannot read directory"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_file_root_is_fatal() {
        let tree = TestTree::new();
        let file = tree.add_file("a.py", "x=1");
        let mut buf = Vec::new();
        assert!(concatenate_to(&file, &mut buf, &ConcatConfig::default()).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_concatenate_writes_file() {
        let tree = TestTree::new();
        tree.add_file("src/a.py", "x=1");
        let out_dir = TestTree::new();
        let output = out_dir.path().join("out.txt");

        let stats = concatenate(&tree.path().join("src"), &output, &ConcatConfig::default())
            .unwrap();
        assert_eq!(stats.files, 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), block("a.py", "x=1"));
    }

    #[test]
    fn test_concatenate_truncates_existing_output() {
        let tree = TestTree::new();
        tree.add_file("src/a.py", "x=1");
        let output = tree.add_file("out.txt", &"stale ".repeat(1000));

        concatenate(&tree.path().join("src"), &output, &ConcatConfig::default()).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), block("a.py", "x=1"));
    }

    #[test]
    fn test_missing_output_parent_fails_without_creating() {
        let tree = TestTree::new();
        tree.add_file("a.py", "x=1");
        let output = tree.path().join("no/such/dir/out.txt");

        let err = concatenate(tree.path(), &output, &ConcatConfig::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("cannot create output file"));
        assert!(!output.exists());
    }

    #[test]
    fn test_output_inside_root_is_not_read_back() {
        let tree = TestTree::new();
        tree.add_file("notes.txt", "hello");
        let output = tree.path().join("all.txt");

        let config = ConcatConfig::default().with_extensions([".txt"]);
        let stats = concatenate(tree.path(), &output, &config).unwrap();
        assert_eq!(stats.files, 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), block("notes.txt", "hello"));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let tree = TestTree::new();
        tree.add_file("z.py", "last");
        tree.add_file("a/b/c.ts", "nested");
        tree.add_file("m.java", "class M {}");

        let (first, _) = concat_to_string(tree.path(), &ConcatConfig::default());
        let (second, _) = concat_to_string(tree.path(), &ConcatConfig::default());
        assert_eq!(first, second);
    }
}
