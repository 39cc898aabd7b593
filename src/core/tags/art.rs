//! core/tags/art.rs
//! Embedded cover art: list what is there, attach a front cover when missing.

use std::path::Path;

use id3::frame::{Content, Picture, PictureType};
use log::{debug, info};

use super::super::error::{CleanError, CleanResult};
use super::document::TagDocument;

/// Summary of one APIC frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverInfo {
    pub picture_type: PictureType,
    pub mime_type: String,
    pub size: usize,
}

pub fn covers(doc: &TagDocument) -> Vec<CoverInfo> {
    doc.tag()
        .frames()
        .filter(|f| f.id() == "APIC" || f.id() == "PIC")
        .filter_map(|f| match f.content() {
            Content::Picture(p) => Some(CoverInfo {
                picture_type: p.picture_type,
                mime_type: p.mime_type.clone(),
                size: p.data.len(),
            }),
            _ => None,
        })
        .collect()
}

/// Attach `image` as front cover unless `doc` already has one.
///
/// Returns true when the document changed.
pub fn attach_front_cover(doc: &mut TagDocument, image: &Path) -> CleanResult<bool> {
    if covers(doc)
        .iter()
        .any(|c| c.picture_type == PictureType::CoverFront)
    {
        debug!("{} already has a front cover", doc.path().display());
        return Ok(false);
    }

    let data = std::fs::read(image).map_err(CleanError::io(image, "cover file read failed"))?;

    info!("Adding front cover from {}", image.display());
    doc.add_frame(
        Picture {
            mime_type: mime_for(image).to_string(),
            picture_type: PictureType::CoverFront,
            description: "Front cover".to_string(),
            data,
        }
        .into(),
    );
    Ok(true)
}

fn mime_for(image: &Path) -> &'static str {
    let is_png = image
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);

    if is_png { "image/png" } else { "image/jpeg" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use id3::Tag;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("cover.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("cover.jpg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("folder")), "image/jpeg");
    }

    #[test]
    fn attaches_once() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("cover.png");
        std::fs::write(&image, b"\x89PNG fake").unwrap();

        let mut doc = TagDocument::from_tag(&dir.path().join("a.mp3"), Tag::new());
        assert!(attach_front_cover(&mut doc, &image).unwrap());
        assert!(!attach_front_cover(&mut doc, &image).unwrap());

        let found = covers(&doc);
        assert_eq!(
            found,
            vec![CoverInfo {
                picture_type: PictureType::CoverFront,
                mime_type: "image/png".into(),
                size: 9,
            }]
        );
    }

    #[test]
    fn missing_image_is_an_io_error() {
        let mut doc = TagDocument::from_tag(Path::new("a.mp3"), Tag::new());
        let err = attach_front_cover(&mut doc, Path::new("/nope/cover.jpg")).unwrap_err();
        assert!(matches!(err, CleanError::Io { .. }));
    }
}
