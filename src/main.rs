//! id3scrub
//!
//! # What this program is
//! A small command-line tool that tidies the ID3 tags of `.mp3` files:
//!
//! - cuts forbidden text (site names, promo junk) out of every text-like frame
//! - drops URL link frames and, optionally, replay-gain frames
//! - fills missing title/artist/album/track/disc from the file's path
//! - removes a 128-byte ID3v1 block from the head or tail of the file
//!
//! # How a run works
//! 1. Parse flags, set up logging
//! 2. Load the forbidden word list (unless scrubbing is off)
//! 3. Expand inputs (files, directories, or paths on stdin) into a sorted list of files
//! 4. Process every file independently on a small worker pool
//! 5. Print a summary and exit with 0 (all ok), 1 (some file failed) or 2 (startup failure)
//!
//! # Architecture constraints
//! - `main` only wires things up; all tag and filesystem work lives in `core::*`.
//! - A failing file never stops the others.

mod core;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info, warn};

use crate::core::config::{DEFAULT_FORBIDDEN_PATH, ForbiddenWords, Pipeline};
use crate::core::types::{LegacyDecision, SaveDecision};

#[derive(Parser, Debug)]
#[command(
    name = "id3scrub",
    about = "Scrub junk out of ID3 tags and strip legacy ID3v1 blocks",
    version
)]
struct Cli {
    /// Compute and log every change, write nothing
    #[arg(long)]
    dry: bool,

    /// Newline-delimited list of forbidden words
    #[arg(long, env = "ID3SCRUB_FORBIDDEN", default_value = DEFAULT_FORBIDDEN_PATH)]
    forbidden: PathBuf,

    /// Log per-frame details
    #[arg(short, long)]
    verbose: bool,

    /// Fill missing title/artist/album/track/disc from the file path
    #[arg(long)]
    enhance: bool,

    /// Remove replay-gain TXXX frames
    #[arg(long)]
    ungain: bool,

    /// Leave ID3v1 blocks in place
    #[arg(long)]
    keep_legacy: bool,

    /// Attach this image as front cover when a file has none
    #[arg(long, value_name = "IMAGE")]
    cover: Option<PathBuf>,

    /// Skip forbidden-word scrubbing
    #[arg(long)]
    no_clean: bool,

    /// Report embedded pictures (type, mime, size) of every file
    #[arg(long)]
    covers: bool,

    /// Files or directories; read from stdin (one per line) when empty
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut clog = colog::default_builder();
    clog.filter(
        None,
        if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
    );
    clog.init();

    let pipeline = match build_pipeline(&cli) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    let inputs = if cli.files.is_empty() {
        match read_stdin_paths() {
            Ok(paths) => paths,
            Err(e) => {
                error!("failed to read paths from stdin: {e}");
                return ExitCode::from(2);
            }
        }
    } else {
        cli.files.clone()
    };

    let files = match core::expand_inputs(&inputs) {
        Ok(files) => files,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };
    if files.is_empty() {
        error!("No input files");
        return ExitCode::from(2);
    }

    let reports = core::process_files(&files, &pipeline);

    let mut saved = 0usize;
    let mut stripped = 0usize;
    let mut failed = Vec::new();
    for report in &reports {
        match &report.result {
            Ok(outcome) => {
                if outcome.save == SaveDecision::Saved {
                    saved += 1;
                }
                if matches!(outcome.legacy, LegacyDecision::Removed(_)) {
                    stripped += 1;
                }
            }
            Err(e) => failed.push(e.path()),
        }
    }

    info!(
        "{} files: {saved} saved, {stripped} ID3v1 removed, {} failed{}",
        reports.len(),
        failed.len(),
        if cli.dry { " (dry run)" } else { "" }
    );
    for path in &failed {
        error!("Failed: {}", path.display());
    }

    if !failed.is_empty() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn build_pipeline(cli: &Cli) -> core::error::CleanResult<Pipeline> {
    let mut pipeline = if cli.no_clean {
        Pipeline::enhance(cli.dry)
    } else {
        let words = ForbiddenWords::load(&cli.forbidden)?;
        if words.is_empty() {
            warn!("{} has no words, nothing will be scrubbed", cli.forbidden.display());
        }
        info!(
            "Loaded {} forbidden words from {}",
            words.len(),
            cli.forbidden.display()
        );
        Pipeline::clean(words, cli.dry)
    };

    // Presets give the base run; flags switch the optional steps.
    pipeline.enhance = cli.enhance;
    pipeline.ungain = cli.ungain;
    pipeline.strip_legacy = !cli.keep_legacy;
    pipeline.cover = cli.cover.clone();
    pipeline.list_covers = cli.covers;
    Ok(pipeline)
}

/// One path per line, up to the first empty line or end of input.
fn read_stdin_paths() -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            break;
        }
        paths.push(PathBuf::from(line));
    }
    Ok(paths)
}
