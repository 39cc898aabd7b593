//! core/mod.rs
//!
//! The brain of the tool:
//! - Expand inputs into audio file paths (filesystem walk)
//! - Clean / enhance each file independently
//! - Return plain report structs for the CLI to print
//!
//! - Make the batch pipeline explicit:
//!   (A) expand inputs -> Vec<PathBuf>
//!   (B) process files -> Vec<FileReport>
//!
//! Files share nothing mutable. A failure is recorded in that file's report and
//! never stops its siblings.

pub mod clean;
pub mod config;
pub mod error;
pub mod infer;
pub mod legacy;
pub mod library;
pub mod scrub;
pub mod tags;
pub mod types;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::error;

use config::Pipeline;
use error::CleanResult;
use types::FileReport;

/// Expand every input into file paths.
///
/// - De-dupes across overlapping inputs by full path
/// - Sorts paths once
pub fn expand_inputs(inputs: &[PathBuf]) -> CleanResult<Vec<PathBuf>> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(inputs.len());
    let mut out: Vec<PathBuf> = Vec::new();

    for input in inputs {
        for path in library::expand(input)? {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    out.sort();
    Ok(out)
}

/// Run `pipeline` over every file, one independent task per file.
///
/// Tasks are spread over a small pool of scoped threads and finish in no particular
/// order; the returned reports are sorted by path. Returns once every task is done.
pub fn process_files(paths: &[PathBuf], pipeline: &Pipeline) -> Vec<FileReport> {
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(paths.len())
        .max(1);

    let next = AtomicUsize::new(0);
    let reports = Mutex::new(Vec::with_capacity(paths.len()));

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    let Some(path) = paths.get(i) else { break };

                    let result = clean::process(path, pipeline);
                    if let Err(e) = &result {
                        error!("{e}");
                    }

                    let report = FileReport {
                        path: path.clone(),
                        result,
                    };
                    // A poisoned lock only means another task panicked mid-push.
                    reports
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .push(report);
                }
            });
        }
    });

    let mut reports = reports
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    reports
}

#[cfg(test)]
pub(crate) mod test_util {
    //! Tag fixtures written with the store itself.

    use std::fs;
    use std::path::Path;

    use id3::{Tag, Version};

    /// Stand-in audio payload every fixture starts from.
    pub(crate) fn payload() -> Vec<u8> {
        vec![0x55u8; 4096]
    }

    /// Write `payload()` (plus a 128-byte ID3v1 block if asked) and prepend `tag`.
    pub(crate) fn write_fixture(path: &Path, tag: &Tag, with_legacy: bool) {
        let mut data = payload();
        if with_legacy {
            let mut block = b"TAG".to_vec();
            block.resize(128, 0);
            data.extend_from_slice(&block);
        }
        fs::write(path, data).unwrap();
        tag.write_to_path(path, Version::Id3v24).unwrap();
    }

    pub(crate) fn read_tag(path: &Path) -> Tag {
        Tag::read_from_path(path).unwrap()
    }
}
