//! core/legacy.rs
//!
//! Find and physically remove a 128-byte ID3v1 block.
//!
//! - `locate` peeks at the head and at `size - 128` for the `TAG` magic
//! - `remove` streams the file minus that block into `<path>-id3v1`, then renames it
//!   over the original; on any failure the temporary file is deleted and the
//!   original is left as it was

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::error::{CleanError, CleanResult};
use super::types::LegacyTagLocation;

/// Size of an ID3v1 block.
pub const LEGACY_TAG_SIZE: u64 = 128;

const LEGACY_MAGIC: &[u8; 3] = b"TAG";

/// Copy buffer size for the rewrite.
const COPY_CHUNK: usize = 128 * 1024;

/// Suffix of the sibling file the rewrite goes through.
const TEMP_SUFFIX: &str = "-id3v1";

/// Check `path` for an ID3v1 block at its head or tail.
pub fn locate(path: &Path) -> CleanResult<LegacyTagLocation> {
    debug!("Checking {} for ID3v1 tag", path.display());

    let mut file = File::open(path).map_err(CleanError::io(path, "failed to open file"))?;
    let size = file
        .metadata()
        .map_err(CleanError::io(path, "failed to get file info"))?
        .len();

    let location = locate_in(&mut file, size)
        .map_err(CleanError::io(path, "failed to read possible TAG"))?;

    match location {
        LegacyTagLocation::Head => info!("ID3v1 tag found at head of {}", path.display()),
        LegacyTagLocation::Tail => info!("ID3v1 tag found at tail of {}", path.display()),
        LegacyTagLocation::None => {}
    }
    Ok(location)
}

/// Same as [`locate`], for any seekable source of known `size`.
pub(crate) fn locate_in<R: Read + Seek>(source: &mut R, size: u64) -> io::Result<LegacyTagLocation> {
    // Too small for a complete block.
    if size < LEGACY_TAG_SIZE {
        return Ok(LegacyTagLocation::None);
    }

    let mut magic = [0u8; 3];

    source.seek(SeekFrom::Start(0))?;
    source.read_exact(&mut magic)?;
    if &magic == LEGACY_MAGIC {
        return Ok(LegacyTagLocation::Head);
    }

    source.seek(SeekFrom::Start(size - LEGACY_TAG_SIZE))?;
    source.read_exact(&mut magic)?;
    if &magic == LEGACY_MAGIC {
        return Ok(LegacyTagLocation::Tail);
    }

    Ok(LegacyTagLocation::None)
}

/// Rewrite `path` without the ID3v1 block found at `location`.
///
/// `LegacyTagLocation::None` is a no-op: no file is opened or created.
pub fn remove(path: &Path, location: LegacyTagLocation) -> CleanResult<()> {
    if location == LegacyTagLocation::None {
        return Ok(());
    }

    info!("Removing ID3v1 from {}", path.display());

    let mut original = File::open(path).map_err(CleanError::io(path, "failed to open file"))?;
    let meta = original
        .metadata()
        .map_err(CleanError::io(path, "failed to get file info"))?;

    let (temp, mut out) = TempSibling::create(path)?;
    copy_without_legacy(&mut original, &mut out, meta.len(), location)
        .map_err(CleanError::io(path, "failed to copy audio data"))?;
    out.sync_all()
        .map_err(CleanError::io(temp.path(), "failed to flush destination"))?;
    drop(out);
    drop(original);

    fs::set_permissions(temp.path(), meta.permissions())
        .map_err(CleanError::io(temp.path(), "failed to copy file permissions"))?;

    temp.persist_over(path)
}

/// Stream `source` (of `size` bytes) into `dest`, leaving out the 128-byte block.
///
/// Returns the number of bytes written. A source shorter than `size` is an
/// `UnexpectedEof` error, never a short copy.
pub(crate) fn copy_without_legacy<R, W>(
    source: &mut R,
    dest: &mut W,
    size: u64,
    location: LegacyTagLocation,
) -> io::Result<u64>
where
    R: Read + Seek,
    W: Write,
{
    let end = match location {
        LegacyTagLocation::None => size,
        LegacyTagLocation::Head => {
            source.seek(SeekFrom::Start(LEGACY_TAG_SIZE))?;
            size
        }
        LegacyTagLocation::Tail => {
            source.seek(SeekFrom::Start(0))?;
            size.saturating_sub(LEGACY_TAG_SIZE)
        }
    };

    let mut offset = source.stream_position()?;
    let mut buf = vec![0u8; COPY_CHUNK];
    let mut written = 0u64;

    while offset < end {
        let read = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        // The chunk straddling `end` is shortened by the overlap.
        let keep = (end - offset).min(read as u64) as usize;
        dest.write_all(&buf[..keep])?;

        offset += read as u64;
        written += keep as u64;
    }

    if offset < end {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("source ended at byte {offset}, expected {end}"),
        ));
    }

    dest.flush()?;
    Ok(written)
}

/// `<path>-id3v1`, deleted on drop unless persisted.
struct TempSibling {
    path: PathBuf,
    persisted: bool,
}

impl TempSibling {
    fn create(original: &Path) -> CleanResult<(Self, File)> {
        let mut name = original.as_os_str().to_os_string();
        name.push(TEMP_SUFFIX);
        let path = PathBuf::from(name);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(CleanError::io(&path, "failed to create destination file"))?;

        let temp = Self {
            path,
            persisted: false,
        };
        Ok((temp, file))
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn persist_over(mut self, original: &Path) -> CleanResult<()> {
        fs::rename(&self.path, original)
            .map_err(CleanError::io(original, "failed to rename temporary file"))?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempSibling {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}
