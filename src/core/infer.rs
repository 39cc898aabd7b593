//! core/infer.rs
//!
//! Guess metadata from a file path like `.../<album>/<artist> - <title>.mp3`.
//!
//! - Only used to fill fields the tag does not already have
//! - Best-effort: wrong guesses are possible and accepted
//! - Never fails; anything unusable stays empty/zero

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::types::MetaCandidate;

/// Parent directory names containing any of these are staging folders, not albums.
pub const NON_ALBUM_DIRS: &[&str] = &["MP3ADD", "Downloads", "tmp."];

/// Characters stripped from both ends of every guessed name.
const NAME_TRIM: &[char] = &[':', ';', ',', '.', '-', ' '];

/// "<index>[:<count>][sep]<rest>", e.g. "03 Money", "1:2 - Live", "07.Intro".
static LEADING_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([0-9]*):?([0-9]*)[-,.: ]?(.*)$").expect("static regex is valid")
});

/// Derive a best-effort [`MetaCandidate`] from `path`.
///
/// The filename is split on `-` before looking for a leading number, so
/// `"01 - Money.mp3"` yields artist `"01"` rather than track 1.
pub fn infer(path: &str) -> MetaCandidate {
    let parts: Vec<&str> = path
        .split(|c| c == '/' || c == std::path::MAIN_SEPARATOR)
        .collect();

    let file = parts.last().copied().unwrap_or_default();
    let stem = file.rsplit_once('.').map_or(file, |(stem, _ext)| stem);
    let raw_title = stem.trim();

    let mut meta = MetaCandidate::default();

    // "artist - title", where the title may contain more dashes.
    let title = match raw_title.split_once('-') {
        Some((artist, rest)) => {
            meta.artist = artist.trim_matches(NAME_TRIM).to_string();
            rest.trim()
        }
        None => raw_title,
    };

    let (track, track_count, title) = split_leading_index(title);
    meta.track = track;
    meta.track_count = track_count;
    meta.title = title;

    if parts.len() > 1 {
        let dir = parts[parts.len() - 2];
        if !dir.is_empty() && !NON_ALBUM_DIRS.iter().any(|marker| dir.contains(marker)) {
            let (disc, disc_count, album) = split_leading_index(dir);
            meta.disc = disc;
            meta.disc_count = disc_count;
            meta.album = album;
        }
    }

    debug!("Guessed from path '{path}': {meta:?}");
    meta
}

/// Split "<n>[:<count>][sep]<rest>" into `(n, count, rest)`.
///
/// Missing or unparsable numbers are 0; `rest` is trimmed of separators.
fn split_leading_index(s: &str) -> (u32, u32, String) {
    let Some(caps) = LEADING_INDEX.captures(s) else {
        return (0, 0, s.trim_matches(NAME_TRIM).to_string());
    };

    let number = |i: usize| {
        caps.get(i)
            .map(|m| m.as_str())
            .filter(|digits| !digits.is_empty())
            .map_or(0, |digits| {
                digits.parse::<u32>().unwrap_or_else(|_| {
                    debug!("Ignoring unusable number '{digits}' in '{s}'");
                    0
                })
            })
    };

    let rest = caps.get(3).map_or("", |m| m.as_str());
    (number(1), number(2), rest.trim().trim_matches(NAME_TRIM).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_title_and_album_from_path() {
        let meta = infer("/Music/Dark Side of the Moon/Pink Floyd - Money.mp3");
        assert_eq!(
            meta,
            MetaCandidate {
                artist: "Pink Floyd".into(),
                title: "Money".into(),
                album: "Dark Side of the Moon".into(),
                ..MetaCandidate::default()
            }
        );
    }

    #[test]
    fn leading_track_number_without_dash() {
        let meta = infer("/Music/Animals/03 Dogs.mp3");
        assert_eq!(meta.track, 3);
        assert_eq!(meta.track_count, 0);
        assert_eq!(meta.title, "Dogs");
        assert_eq!(meta.artist, "");
    }

    #[test]
    fn track_and_count_in_title_after_artist() {
        let meta = infer("/x/Pink Floyd - 03:10 Dogs.mp3");
        assert_eq!(meta.artist, "Pink Floyd");
        assert_eq!(meta.track, 3);
        assert_eq!(meta.track_count, 10);
        assert_eq!(meta.title, "Dogs");
    }

    #[test]
    fn dash_before_digits_puts_number_in_artist() {
        let meta = infer("/Music/Wish You Were Here/01 - Shine On.mp3");
        assert_eq!(meta.artist, "01");
        assert_eq!(meta.title, "Shine On");
        assert_eq!(meta.track, 0);
    }

    #[test]
    fn title_keeps_inner_dashes() {
        let meta = infer("A - B - C.mp3");
        assert_eq!(meta.artist, "A");
        assert_eq!(meta.title, "B - C");
    }

    #[test]
    fn disc_number_from_album_directory() {
        let meta = infer("/Music/1:2 - The Wall/Pink Floyd - Hey You.mp3");
        assert_eq!(meta.disc, 1);
        assert_eq!(meta.disc_count, 2);
        assert_eq!(meta.album, "The Wall");
    }

    #[test]
    fn staging_directories_are_not_albums() {
        for path in [
            "/home/u/Downloads/Artist - Song.mp3",
            "/tmp/MP3ADD-batch/Artist - Song.mp3",
            "/var/tmp.x81/Artist - Song.mp3",
        ] {
            let meta = infer(path);
            assert_eq!(meta.album, "", "{path}");
            assert_eq!(meta.disc, 0, "{path}");
        }
    }

    #[test]
    fn bare_filename_has_no_album() {
        let meta = infer("Artist - Song.mp3");
        assert_eq!(meta.album, "");
        assert_eq!(meta.title, "Song");
    }

    #[test]
    fn extensionless_file_keeps_its_name() {
        assert_eq!(infer("/a/Title").title, "Title");
    }

    #[test]
    fn only_last_extension_is_stripped() {
        assert_eq!(infer("/a/Mr. Blue Sky.mp3").title, "Mr. Blue Sky");
    }

    #[test]
    fn oversized_numbers_fall_back_to_zero() {
        let meta = infer("/a/99999999999999 Song.mp3");
        assert_eq!(meta.track, 0);
        assert_eq!(meta.title, "Song");
    }
}
