//! core/clean.rs
//!
//! Per-file orchestration. One call handles one file start to finish:
//!
//!   open -> scrub / ungain / enhance / cover -> save or skip -> legacy check -> done
//!
//! - Steps run strictly in that order on one in-memory `TagDocument`
//! - The legacy check reads raw byte offsets, so it only runs after any save landed
//! - Any error ends this file only; the caller decides what to do with it

use std::path::Path;

use log::info;

use super::config::{ForbiddenWords, GAIN_DESCRIPTIONS, Pipeline};
use super::error::CleanResult;
use super::infer::infer;
use super::legacy;
use super::scrub::scrub;
use super::tags::{self, Frame, TagDocument};
use super::types::{FileOutcome, LegacyDecision, LegacyTagLocation, SaveDecision};

/// Run every step `pipeline` enables on one file.
///
/// [`Pipeline::clean`] and [`Pipeline::enhance`] are the two stock runs.
pub fn process(path: &Path, pipeline: &Pipeline) -> CleanResult<FileOutcome> {
    info!("Processing {}", path.display());

    let mut doc = TagDocument::open(path)?;
    let mut dirty = false;

    if let Some(words) = &pipeline.scrub {
        dirty |= scrub_frames(&mut doc, words);
    }
    if pipeline.ungain {
        dirty |= strip_gain(&mut doc);
    }
    if pipeline.enhance {
        dirty |= enhance_from_path(&mut doc);
    }
    if pipeline.list_covers {
        report_covers(&doc);
    }
    if let Some(image) = &pipeline.cover {
        dirty |= tags::attach_front_cover(&mut doc, image)?;
    }

    let save = decide(&doc, dirty, pipeline.dry_run)?;
    drop(doc);

    let legacy = if pipeline.strip_legacy {
        strip_legacy(path, pipeline.dry_run)?
    } else {
        LegacyDecision::NotChecked
    };

    Ok(FileOutcome { save, legacy })
}

/// Scrub every text-like frame and drop every URL frame. Returns true if anything changed.
fn scrub_frames(doc: &mut TagDocument, words: &ForbiddenWords) -> bool {
    let mut dirty = false;

    for (key, frames) in doc.all_frames() {
        for frame in frames {
            frame.log();

            let (changed, value) = scrub(frame.text(), words.as_slice());
            if !changed {
                continue;
            }

            if value.is_empty() {
                info!("Removing frame {key}");
                frame.delete(doc);
            } else {
                info!("Updating {key}: {value}");
                frame.set_text(doc, &value);
            }
            dirty = true;
        }
    }

    for key in doc.frame_ids() {
        if is_url_frame(&key) {
            info!("Removing frame {key}");
            doc.delete_frames(&key);
            dirty = true;
        }
    }

    dirty
}

/// URL link frames (W***) are removed unconditionally.
fn is_url_frame(key: &str) -> bool {
    key.starts_with('W')
}

/// Drop replay-gain TXXX entries, keeping every other TXXX.
fn strip_gain(doc: &mut TagDocument) -> bool {
    let Some(frames) = doc.all_frames().remove("TXXX") else {
        return false;
    };

    let mut dirty = false;
    for frame in frames {
        if let Frame::UserDefinedText { key, description, .. } = &frame {
            if GAIN_DESCRIPTIONS.contains(&description.as_str()) {
                info!("Removing frame {key}:{description}");
                frame.delete(doc);
                dirty = true;
            }
        }
    }
    dirty
}

fn enhance_from_path(doc: &mut TagDocument) -> bool {
    let guess = infer(&doc.path().to_string_lossy());
    let current = tags::read_meta(doc);
    info!("Read ID3 from '{}': {current:?}", doc.path().display());

    let dirty = tags::fill_missing(doc, &current, &guess);
    if !dirty {
        info!("File did not need additional ID3 tagging");
    }
    dirty
}

fn report_covers(doc: &TagDocument) {
    let found = tags::covers(doc);
    if found.is_empty() {
        info!("No embedded pictures in {}", doc.path().display());
    }
    for cover in found {
        info!(
            "Picture in {}: type:{:?} mime:{} bytes:{}",
            doc.path().display(),
            cover.picture_type,
            cover.mime_type,
            cover.size
        );
    }
}

fn decide(doc: &TagDocument, dirty: bool, dry_run: bool) -> CleanResult<SaveDecision> {
    if !dirty {
        info!("File was clean already");
        return Ok(SaveDecision::Clean);
    }
    if dry_run {
        info!("Skipping save for dry run");
        return Ok(SaveDecision::Skipped);
    }

    info!("Saving {}", doc.path().display());
    doc.save()?;
    Ok(SaveDecision::Saved)
}

fn strip_legacy(path: &Path, dry_run: bool) -> CleanResult<LegacyDecision> {
    let location = legacy::locate(path)?;

    if location == LegacyTagLocation::None {
        return Ok(LegacyDecision::Absent);
    }
    if dry_run {
        info!("Skipping ID3v1 removal for dry run");
        return Ok(LegacyDecision::Kept(location));
    }

    legacy::remove(path, location)?;
    Ok(LegacyDecision::Removed(location))
}
