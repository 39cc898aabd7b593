//! core/tags/read.rs
//! Read the metadata we care about out of an open `TagDocument`.
//!
//! - Never fails: unreadable or odd values just come back empty/zero
//! - Used to decide which fields enhancement may fill

use id3::TagLike;
use id3::frame::Content;

use super::super::types::MetaCandidate;
use super::document::TagDocument;
use super::util::parse_slash_pair;

pub fn read_meta(doc: &TagDocument) -> MetaCandidate {
    let (track, track_count) = parse_slash_pair(text_frame(doc, "TRCK"));
    let (disc, disc_count) = parse_slash_pair(text_frame(doc, "TPOS"));

    MetaCandidate {
        title: text_frame(doc, "TIT2").unwrap_or_default().to_string(),
        artist: text_frame(doc, "TPE1").unwrap_or_default().to_string(),
        album: text_frame(doc, "TALB").unwrap_or_default().to_string(),
        genre: text_frame(doc, "TCON").unwrap_or_default().to_string(),

        // Best-effort; TYER/TDRC parsing lives in the store.
        year: doc.tag().year().unwrap_or(0),

        track,
        track_count,
        disc,
        disc_count,
    }
}

/// Text of a plain text frame, if present and actually text.
fn text_frame<'a>(doc: &'a TagDocument, id: &str) -> Option<&'a str> {
    match doc.tag().get(id)?.content() {
        Content::Text(s) => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use id3::Tag;
    use std::path::Path;

    #[test]
    fn reads_core_fields() {
        let mut tag = Tag::new();
        tag.set_title("Money");
        tag.set_artist("Pink Floyd");
        tag.set_album("Dark Side of the Moon");
        tag.set_genre("Rock");
        tag.set_year(1973);
        tag.set_text("TRCK", "6/10");
        tag.set_text("TPOS", "1");

        let meta = read_meta(&TagDocument::from_tag(Path::new("a.mp3"), tag));
        assert_eq!(
            meta,
            MetaCandidate {
                album: "Dark Side of the Moon".into(),
                artist: "Pink Floyd".into(),
                title: "Money".into(),
                genre: "Rock".into(),
                year: 1973,
                track: 6,
                track_count: 10,
                disc: 1,
                disc_count: 0,
            }
        );
    }

    #[test]
    fn garbage_numbers_read_as_unknown() {
        let mut tag = Tag::new();
        tag.set_text("TRCK", "A1");

        let meta = read_meta(&TagDocument::from_tag(Path::new("a.mp3"), tag));
        assert_eq!(meta.track, 0);
        assert_eq!(meta, MetaCandidate::default());
    }
}
