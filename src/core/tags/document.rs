//! core/tags/document.rs
//! One file's ID3v2 tag, held in memory until an explicit save.
//!
//! - `open` reads the tag (a file without one opens as an empty document)
//! - frames are enumerated as snapshots, then mutated by key
//! - `save` writes through a sibling temp copy and renames it into place, so a
//!   failed save leaves the file exactly as it was

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use id3::{ErrorKind, Tag, TagLike, Version};
use log::debug;
use tempfile::NamedTempFile;

use super::super::error::{CleanError, CleanResult};
use super::frame::Frame;

pub struct TagDocument {
    path: PathBuf,
    tag: Tag,
}

impl TagDocument {
    /// Parse the ID3v2 tag of `path`.
    pub fn open(path: &Path) -> CleanResult<Self> {
        let tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(id3::Error {
                kind: ErrorKind::NoTag,
                ..
            }) => {
                debug!("No ID3v2 tag in {}, starting empty", path.display());
                Tag::new()
            }
            Err(source) => {
                return Err(CleanError::Parse {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Ok(Self::from_tag(path, tag))
    }

    pub fn from_tag(path: &Path, tag: Tag) -> Self {
        Self {
            path: path.to_path_buf(),
            tag,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Snapshot of every text-like frame, grouped by frame id in file order.
    pub fn all_frames(&self) -> BTreeMap<String, Vec<Frame>> {
        let mut out: BTreeMap<String, Vec<Frame>> = BTreeMap::new();
        for frame in self.tag.frames().filter_map(Frame::from_id3) {
            out.entry(frame.key().to_string()).or_default().push(frame);
        }
        out
    }

    /// Every frame id present, text-like or not.
    pub fn frame_ids(&self) -> BTreeSet<String> {
        self.tag.frames().map(|f| f.id().to_string()).collect()
    }

    /// Add a frame, replacing whatever the store considers the same frame.
    pub fn add_frame(&mut self, frame: id3::Frame) {
        let _ = self.tag.add_frame(frame); // replaced frame (if any) is discarded
    }

    /// Remove every frame stored under `key` and hand them back.
    pub fn delete_frames(&mut self, key: &str) -> Vec<id3::Frame> {
        self.tag.remove(key)
    }

    /// Persist the tag. All-or-nothing: on error the file on disk is untouched.
    pub fn save(&self) -> CleanResult<()> {
        let path = self.path.as_path();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let staged = NamedTempFile::new_in(dir)
            .map_err(CleanError::io(path, "failed to create staging file"))?;
        fs::copy(path, staged.path()).map_err(CleanError::io(path, "failed to stage file"))?;

        if self.tag.frames().next().is_none() {
            Tag::remove_from_path(staged.path()).map_err(|e| CleanError::save(path, e))?;
        } else {
            self.tag
                .write_to_path(staged.path(), writable_version(self.tag.version()))
                .map_err(|e| CleanError::save(path, e))?;
        }

        let permissions = fs::metadata(path)
            .map_err(CleanError::io(path, "failed to get file info"))?
            .permissions();
        fs::set_permissions(staged.path(), permissions)
            .map_err(CleanError::io(path, "failed to copy file permissions"))?;

        staged
            .persist(path)
            .map_err(|e| CleanError::save(path, io::Error::from(e)))?;
        Ok(())
    }
}

/// ID3v2.2 cannot be written; upgrade it.
fn writable_version(version: Version) -> Version {
    match version {
        Version::Id3v22 => Version::Id3v23,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_util::{payload, write_fixture};
    use id3::frame::{Comment, Content};

    #[test]
    fn file_without_tag_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.mp3");
        fs::write(&path, vec![0u8; 512]).unwrap();

        let doc = TagDocument::open(&path).unwrap();
        assert!(doc.all_frames().is_empty());
        assert!(doc.frame_ids().is_empty());
    }

    #[test]
    fn missing_file_is_a_parse_failure_with_path() {
        let err = TagDocument::open(Path::new("/no/such/file.mp3")).err().unwrap();
        assert!(matches!(err, CleanError::Parse { .. }));
        assert!(err.to_string().contains("/no/such/file.mp3"));
    }

    #[test]
    fn enumerates_text_like_frames_and_all_ids() {
        let mut tag = Tag::new();
        tag.set_title("Money");
        tag.add_frame(Comment {
            lang: "eng".into(),
            description: "".into(),
            text: "hi".into(),
        });
        tag.add_frame(id3::Frame::with_content(
            "WOAR",
            Content::Link("http://example.com".into()),
        ));

        let doc = TagDocument::from_tag(Path::new("x.mp3"), tag);
        let frames = doc.all_frames();
        assert_eq!(frames.keys().collect::<Vec<_>>(), ["COMM", "TIT2"]);
        assert!(doc.frame_ids().contains("WOAR"));
    }

    #[test]
    fn unsaved_changes_stay_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        let mut tag = Tag::new();
        tag.set_title("Before");
        write_fixture(&path, &tag, false);
        let on_disk = fs::read(&path).unwrap();

        let mut doc = TagDocument::open(&path).unwrap();
        doc.delete_frames("TIT2");
        drop(doc);

        assert_eq!(fs::read(&path).unwrap(), on_disk);
    }

    #[test]
    fn save_round_trips_and_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        let mut tag = Tag::new();
        tag.set_title("Before");
        write_fixture(&path, &tag, false);

        let mut doc = TagDocument::open(&path).unwrap();
        doc.add_frame(id3::Frame::text("TIT2", "After"));
        doc.save().unwrap();

        let reread = Tag::read_from_path(&path).unwrap();
        assert_eq!(reread.title(), Some("After"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_save_leaves_disk_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("album.mp3");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner.bin"), b"keep me").unwrap();

        let mut tag = Tag::new();
        tag.set_title("Never written");
        let doc = TagDocument::from_tag(&target, tag);

        let err = doc.save().unwrap_err();
        assert!(err.to_string().contains("album.mp3"));

        assert!(target.is_dir());
        assert_eq!(fs::read(target.join("inner.bin")).unwrap(), b"keep me");
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, ["album.mp3"]);
    }

    #[test]
    fn save_of_emptied_tag_drops_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        let mut tag = Tag::new();
        tag.set_title("Only frame");
        write_fixture(&path, &tag, false);

        let mut doc = TagDocument::open(&path).unwrap();
        doc.delete_frames("TIT2");
        doc.save().unwrap();

        assert_eq!(fs::read(&path).unwrap(), payload());
    }
}
