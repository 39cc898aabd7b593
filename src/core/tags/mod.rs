//! core/tags/mod.rs
//!
//! ID3v2 tag store access, built on the `id3` crate.
//! Public API:
//! - [`TagDocument`] one file's tag in memory (open / enumerate / add / delete / save).
//! - [`Frame`] the uniform text/replace/delete contract over text-like frames.
//! - [`read_meta`] / [`fill_missing`] the enhancement read and write halves.
//! - [`covers`] / [`attach_front_cover`] embedded picture handling.

mod art;
mod document;
mod frame;
mod read;
mod util;
mod write;

pub use art::{attach_front_cover, covers};
pub use document::TagDocument;
pub use frame::Frame;
pub use read::read_meta;
pub use write::fill_missing;
