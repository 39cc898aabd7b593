//! core/tags/frame.rs
//! One read/replace/delete contract over the four text-like ID3v2 frame shapes.
//!
//! - `PlainText` (T***), `Comment` (COMM), `Lyrics` (USLT): one frame per key as far as
//!   we are concerned; replacing keeps encoding, language and description, deleting
//!   drops the whole key
//! - `UserDefinedText` (TXXX): many frames share the key and differ by description only,
//!   so a targeted change rebuilds the whole key bucket (see [`Frame::set_text`])

use id3::Encoding;
use id3::frame::{Comment, Content, ExtendedText, Lyrics};
use log::{debug, warn};

use super::document::TagDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    PlainText {
        key: String,
        encoding: Option<Encoding>,
        text: String,
    },
    UserDefinedText {
        key: String,
        encoding: Option<Encoding>,
        description: String,
        value: String,
    },
    Comment {
        key: String,
        encoding: Option<Encoding>,
        lang: String,
        description: String,
        text: String,
    },
    Lyrics {
        key: String,
        encoding: Option<Encoding>,
        lang: String,
        description: String,
        text: String,
    },
}

impl Frame {
    /// Classify a store frame; anything that is not text-like yields `None`.
    pub fn from_id3(frame: &id3::Frame) -> Option<Self> {
        let key = frame.id().to_string();
        let encoding = frame.encoding();

        match frame.content() {
            Content::Text(text) => Some(Frame::PlainText {
                key,
                encoding,
                text: text.clone(),
            }),
            Content::ExtendedText(et) => Some(Frame::UserDefinedText {
                key,
                encoding,
                description: et.description.clone(),
                value: et.value.clone(),
            }),
            Content::Comment(c) => Some(Frame::Comment {
                key,
                encoding,
                lang: c.lang.clone(),
                description: c.description.clone(),
                text: c.text.clone(),
            }),
            Content::Lyrics(l) => Some(Frame::Lyrics {
                key,
                encoding,
                lang: l.lang.clone(),
                description: l.description.clone(),
                text: l.text.clone(),
            }),
            _ => None,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Frame::PlainText { key, .. }
            | Frame::UserDefinedText { key, .. }
            | Frame::Comment { key, .. }
            | Frame::Lyrics { key, .. } => key,
        }
    }

    /// The displayed text we may need to clean.
    pub fn text(&self) -> &str {
        match self {
            Frame::PlainText { text, .. }
            | Frame::Comment { text, .. }
            | Frame::Lyrics { text, .. } => text,
            Frame::UserDefinedText { value, .. } => value,
        }
    }

    /// Replace this frame's text in `doc`, keeping every other attribute.
    ///
    /// For TXXX the store only indexes by key, so the bucket is rebuilt: every
    /// frame under the key is removed, siblings are re-added untouched, and the
    /// frame with our description is re-added with the new value. This is several
    /// store calls, not one atomic step; nothing else may touch the key meanwhile.
    pub fn set_text(&self, doc: &mut TagDocument, value: &str) {
        match self {
            Frame::UserDefinedText { .. } => self.rebuild_bucket(doc, Some(value)),
            _ => doc.add_frame(self.to_id3(value)),
        }
    }

    /// Remove this frame from `doc`.
    ///
    /// Plain, comment and lyrics frames drop their whole key. TXXX drops only the
    /// entry with our description (bucket rebuilt like [`Frame::set_text`]).
    pub fn delete(&self, doc: &mut TagDocument) {
        match self {
            Frame::UserDefinedText { .. } => self.rebuild_bucket(doc, None),
            _ => {
                doc.delete_frames(self.key());
            }
        }
    }

    fn rebuild_bucket(&self, doc: &mut TagDocument, replacement: Option<&str>) {
        let mut found = false;

        for sibling in doc.delete_frames(self.key()) {
            if !self.same_identity(&sibling) {
                doc.add_frame(sibling);
                continue;
            }
            found = true;
            if let Some(value) = replacement {
                doc.add_frame(self.to_id3(value));
            }
        }

        if !found {
            warn!(
                "{} '{}' vanished from {} before it could be rewritten",
                self.key(),
                self.description(),
                doc.path().display()
            );
        }
        debug_assert!(found, "TXXX identity must come from a fresh enumeration");
    }

    /// Key plus description is what tells TXXX frames apart.
    fn same_identity(&self, other: &id3::Frame) -> bool {
        if other.id() != self.key() {
            return false;
        }
        match other.content() {
            Content::ExtendedText(et) => et.description == self.description(),
            _ => false,
        }
    }

    fn description(&self) -> &str {
        match self {
            Frame::PlainText { .. } => "",
            Frame::UserDefinedText { description, .. }
            | Frame::Comment { description, .. }
            | Frame::Lyrics { description, .. } => description,
        }
    }

    /// Build the store frame this variant becomes with `value` as its text.
    fn to_id3(&self, value: &str) -> id3::Frame {
        let (frame, encoding) = match self {
            Frame::PlainText { key, encoding, .. } => (id3::Frame::text(key, value), *encoding),
            Frame::UserDefinedText {
                key,
                encoding,
                description,
                ..
            } => (
                id3::Frame::with_content(
                    key,
                    Content::ExtendedText(ExtendedText {
                        description: description.clone(),
                        value: value.to_string(),
                    }),
                ),
                *encoding,
            ),
            Frame::Comment {
                key,
                encoding,
                lang,
                description,
                ..
            } => (
                id3::Frame::with_content(
                    key,
                    Content::Comment(Comment {
                        lang: lang.clone(),
                        description: description.clone(),
                        text: value.to_string(),
                    }),
                ),
                *encoding,
            ),
            Frame::Lyrics {
                key,
                encoding,
                lang,
                description,
                ..
            } => (
                id3::Frame::with_content(
                    key,
                    Content::Lyrics(Lyrics {
                        lang: lang.clone(),
                        description: description.clone(),
                        text: value.to_string(),
                    }),
                ),
                *encoding,
            ),
        };
        frame.set_encoding(encoding)
    }

    /// Log tag name and all important details for this frame.
    pub fn log(&self) {
        match self {
            Frame::PlainText {
                key,
                encoding,
                text,
            } => debug!("{key}: {text} ({encoding:?})"),
            Frame::UserDefinedText {
                key,
                encoding,
                description,
                value,
            } => debug!("{key}: {description}: {value} ({encoding:?})"),
            Frame::Comment {
                key,
                lang,
                description,
                text,
                ..
            }
            | Frame::Lyrics {
                key,
                lang,
                description,
                text,
                ..
            } => {
                let mut message = format!("{key}: ");
                if !description.is_empty() {
                    message.push_str(&format!("{description}: "));
                }
                if !lang.is_empty() {
                    message.push_str(&format!("{lang}: "));
                }
                message.push_str(text);
                debug!("{message}");
            }
        }
    }
}
