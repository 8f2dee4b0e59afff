//! CLI entry point for codecat

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use codecat::{ConcatConfig, DEFAULT_OUTPUT, concatenate, print_stats, print_stats_json};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "codecat")]
#[command(about = "Concatenate the source files of a project into one annotated text file")]
#[command(version)]
struct Args {
    /// Root directory of the project
    directory: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// File extensions to include (e.g. .py .js), replacing the defaults
    #[arg(long, value_name = "EXT", num_args = 1..)]
    extensions: Option<Vec<String>>,

    /// Directory names to skip at any depth (e.g. node_modules venv), replacing the defaults
    #[arg(long = "exclude-dirs", value_name = "NAME", num_args = 1..)]
    exclude_dirs: Option<Vec<String>>,

    /// Print a summary of what was written
    #[arg(long = "stats")]
    stats: bool,

    /// Print the summary as JSON
    #[arg(long = "json", requires = "stats")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::parse();

    let mut config = ConcatConfig::default();
    if let Some(extensions) = args.extensions {
        config = config.with_extensions(extensions);
    }
    if let Some(exclude_dirs) = args.exclude_dirs {
        config = config.with_exclude_dirs(exclude_dirs);
    }

    let stats = match concatenate(&args.directory, &args.output, &config) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("codecat: {}", e);
            process::exit(1);
        }
    };

    for dir in &stats.skipped_dirs {
        eprintln!("codecat: warning: skipped unreadable directory: {}", dir.reason);
    }

    if args.stats {
        let result = if args.json {
            print_stats_json(&stats)
        } else {
            print_stats(&stats, &args.output, should_use_color(args.color))
        };
        if let Err(e) = result {
            eprintln!("codecat: error writing summary: {}", e);
            process::exit(1);
        }
    }
}
