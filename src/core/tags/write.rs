//! core/tags/write.rs
//! Fill missing fields of a `TagDocument` from a guessed `MetaCandidate`.
//!
//! Semantics:
//! - Only empty/zero fields of `current` are written; present values are never touched
//! - Names go in as UTF-16 text frames, TRCK/TPOS as Latin-1 "n" or "n/total"

use id3::Encoding;
use log::info;

use super::super::types::MetaCandidate;
use super::document::TagDocument;
use super::util::format_slash_pair;

/// Returns true when anything was added.
pub fn fill_missing(doc: &mut TagDocument, current: &MetaCandidate, guess: &MetaCandidate) -> bool {
    let mut dirty = false;

    if current.title.is_empty() && !guess.title.is_empty() {
        info!("Adding title {}", guess.title);
        set_text(doc, "TIT2", &guess.title, Encoding::UTF16);
        dirty = true;
    }

    if current.artist.is_empty() && !guess.artist.is_empty() {
        info!("Adding artist {}", guess.artist);
        set_text(doc, "TPE1", &guess.artist, Encoding::UTF16);
        dirty = true;
    }

    if current.track == 0 && guess.track > 0 {
        set_slash_pair(doc, "TRCK", "track", guess.track, current.track_count, guess.track_count);
        dirty = true;
    }

    if current.disc == 0 && guess.disc > 0 {
        set_slash_pair(doc, "TPOS", "disc", guess.disc, current.disc_count, guess.disc_count);
        dirty = true;
    }

    if current.album.is_empty() && !guess.album.is_empty() {
        info!("Adding album {}", guess.album);
        set_text(doc, "TALB", &guess.album, Encoding::UTF16);
        dirty = true;
    }

    dirty
}

/// Helper: set a plain text frame (T***) with an explicit encoding.
fn set_text(doc: &mut TagDocument, id: &str, value: &str, encoding: Encoding) {
    doc.add_frame(id3::Frame::text(id, value).set_encoding(Some(encoding)));
}

/// Helper: write TRCK/TPOS, preferring a total the tag already knows.
fn set_slash_pair(
    doc: &mut TagDocument,
    id: &str,
    what: &str,
    n: u32,
    known_total: u32,
    guessed_total: u32,
) {
    let total = if known_total > 0 { known_total } else { guessed_total };
    let value = format_slash_pair(n, total);
    info!("Adding {what} {value}");
    set_text(doc, id, &value, Encoding::Latin1);
}
