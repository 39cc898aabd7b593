//! Core data types shared between the pipeline stages and the CLI.
//!
//! Rule of thumb:
//! - These structs should be "boring bags of data"
//! - No tag parsing code
//! - No filesystem code
//!
//! 'MetaCandidate' is the handful of fields we care about when enhancing a file,
//! either read from its tag or guessed from its path.

use std::path::PathBuf;

/// Rudimentary metadata for one audio file.
///
/// Empty strings and zeros mean "unknown". A missing value is not an error here:
/// the path heuristic is best-effort and tags are often incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaCandidate {
    pub album: String,
    pub artist: String,
    pub title: String,
    pub genre: String,

    pub year: i32,

    /// Track number (like 1, 2, 3...) and the total on the release.
    pub track: u32,
    pub track_count: u32,

    /// Disc number and the disc count of the set.
    pub disc: u32,
    pub disc_count: u32,
}

/// Where a 128-byte ID3v1 block was found, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyTagLocation {
    None,
    /// First 128 bytes of the file.
    Head,
    /// Last 128 bytes of the file.
    Tail,
}

/// What happened to the in-memory tag of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    /// Nothing changed, nothing written.
    Clean,
    /// Changes were written to disk.
    Saved,
    /// Changes were computed but the run was dry.
    Skipped,
}

/// What happened to the legacy (ID3v1) block of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyDecision {
    /// The legacy step was not part of this pipeline.
    NotChecked,
    Absent,
    Removed(LegacyTagLocation),
    /// Found, but kept because the run was dry.
    Kept(LegacyTagLocation),
}

/// Final state of one successfully processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOutcome {
    pub save: SaveDecision,
    pub legacy: LegacyDecision,
}

/// One row of the batch report: a path and how its task ended.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<FileOutcome, super::error::CleanError>,
}
