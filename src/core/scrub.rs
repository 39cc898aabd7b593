//! core/scrub.rs
//! Truncate promotional junk appended to tag text.
//!
//! The junk is assumed to trail the genuine content, so everything from the
//! leftmost forbidden occurrence onwards is dropped.

/// Cut `text` before the leftmost occurrence of any forbidden word.
///
/// Returns `(false, text)` untouched when nothing matches, otherwise
/// `(true, trimmed_prefix)`. Offsets come from `str::find`, which always lands on a
/// char boundary, so a multi-byte character is never split.
pub fn scrub<S: AsRef<str>>(text: &str, forbidden: &[S]) -> (bool, String) {
    let leftmost = forbidden
        .iter()
        .map(AsRef::as_ref)
        .filter(|word| !word.is_empty())
        .filter_map(|word| text.find(word))
        .min();

    match leftmost {
        None => (false, text.to_string()),
        Some(at) => (true, text[..at].trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_trailing_promo() {
        assert_eq!(
            scrub("Artist - Title PROMO-TAG extra", &["PROMO-TAG"]),
            (true, "Artist - Title".to_string())
        );
    }

    #[test]
    fn clean_text_is_returned_unchanged() {
        assert_eq!(
            scrub("Clean Title", &["PROMO"]),
            (false, "Clean Title".to_string())
        );
    }

    #[test]
    fn leftmost_match_wins_regardless_of_list_order() {
        let words = ["www.example.com", "[Free Download]"];
        let (changed, out) = scrub("Song [Free Download] www.example.com", &words);
        assert!(changed);
        assert_eq!(out, "Song");
    }

    #[test]
    fn multibyte_prefix_is_never_split() {
        let (changed, out) = scrub("Björk – Jóga ★ promo.ru", &["promo.ru"]);
        assert!(changed);
        assert_eq!(out, "Björk – Jóga ★");
    }

    #[test]
    fn whole_text_forbidden_yields_empty() {
        assert_eq!(
            scrub("  visit promo.ru  ", &["visit"]),
            (true, String::new())
        );
    }

    #[test]
    fn empty_words_are_ignored() {
        assert_eq!(
            scrub("Title", &["", "nope"]),
            (false, "Title".to_string())
        );
    }

    #[test]
    fn strings_without_forbidden_words_pass_through() {
        let words = ["PROMO", "www.", "Downloaded from"];
        for s in ["", " padded ", "Ünïcödé title", "promo (lowercase)", "ww.w"] {
            assert_eq!(scrub(s, &words), (false, s.to_string()));
        }
    }

    #[test]
    fn scrubbing_is_idempotent() {
        let words = ["PROMO", "www.", "ad:"];
        for s in [
            "Title PROMO",
            "Name www.site ad: more",
            "x ad: PROMO",
            "PROMO first",
            "   spaced   www.",
        ] {
            let (_, once) = scrub(s, &words);
            let (changed, twice) = scrub(&once, &words);
            assert!(!changed, "second pass changed {once:?}");
            assert_eq!(once, twice);
        }
    }
}
