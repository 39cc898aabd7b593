//! core/config.rs
//! Run-wide, read-only inputs: defaults, the forbidden word list, pipeline switches.
//!
//! Everything here is built once at startup and borrowed by every per-file task.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::error::{CleanError, CleanResult};

/// Where the forbidden word list lives unless told otherwise.
pub const DEFAULT_FORBIDDEN_PATH: &str = "/usr/local/share/cleanid3/forbidden.txt";

/// TXXX descriptions written by replay-gain tools.
pub const GAIN_DESCRIPTIONS: &[&str] = &[
    "replaygain_album_gain",
    "replaygain_album_peak",
    "replaygain_reference_loudness",
    "replaygain_track_gain",
    "replaygain_track_peak",
    "rgain:track",
    "rgain:album",
    "MP3GAIN_ALBUM_MINMAX",
    "MP3GAIN_MINMAX",
    "MP3GAIN_UNDO",
];

/// Literal substrings that mark the start of junk in a tag value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenWords(Vec<String>);

impl ForbiddenWords {
    /// Load a newline-delimited UTF-8 list, one word or phrase per line.
    pub fn load(path: &Path) -> CleanResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| CleanError::WordList {
            path: path.to_path_buf(),
            source,
        })?;
        let words = Self::from_lines(&text);
        for word in words.as_slice() {
            debug!("forbidden: \"{word}\"");
        }
        Ok(words)
    }

    /// Empty lines are skipped: an empty pattern would match at offset 0.
    pub fn from_lines(text: &str) -> Self {
        Self(
            text.lines()
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which steps run for each file.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    /// Truncate forbidden text and drop URL frames.
    pub scrub: Option<ForbiddenWords>,
    /// Drop replay-gain TXXX frames.
    pub ungain: bool,
    /// Fill missing fields from the path.
    pub enhance: bool,
    /// Attach this image as front cover when none is present.
    pub cover: Option<PathBuf>,
    /// Report every embedded picture (type, mime, size).
    pub list_covers: bool,
    /// Remove an ID3v1 block after the tag is settled.
    pub strip_legacy: bool,
    /// Compute and log everything, write nothing.
    pub dry_run: bool,
}

impl Pipeline {
    /// Scrub + legacy removal.
    pub fn clean(words: ForbiddenWords, dry_run: bool) -> Self {
        Self {
            scrub: Some(words),
            strip_legacy: true,
            dry_run,
            ..Self::default()
        }
    }

    /// Path-based enhancement only.
    pub fn enhance(dry_run: bool) -> Self {
        Self {
            enhance: true,
            dry_run,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_skips_blank_lines_and_carriage_returns() {
        let words = ForbiddenWords::from_lines("PROMO\r\n\nwww.site.ru\n [ad]\n");
        assert_eq!(words.as_slice(), ["PROMO", "www.site.ru", " [ad]"]);
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn load_reports_the_list_path() {
        let err = ForbiddenWords::load(Path::new("/missing/forbidden.txt")).unwrap_err();
        assert!(matches!(err, CleanError::WordList { .. }));
        assert!(err.to_string().contains("/missing/forbidden.txt"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forbidden.txt");
        fs::write(&path, "one\ntwo words\n").unwrap();

        let words = ForbiddenWords::load(&path).unwrap();
        assert_eq!(words.as_slice(), ["one", "two words"]);
    }

    #[test]
    fn presets() {
        let clean = Pipeline::clean(ForbiddenWords::from_lines("x"), true);
        assert!(clean.scrub.is_some() && clean.strip_legacy && clean.dry_run);
        assert!(!clean.enhance);

        let enhance = Pipeline::enhance(false);
        assert!(enhance.enhance && enhance.scrub.is_none() && !enhance.strip_legacy);
    }
}
