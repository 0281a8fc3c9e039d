//! `EDXC` binary cache of parsed word records.
//!
//! Layout (little-endian):
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | magic `EDXC` |
//! | 4 | 1 | format version |
//! | 5 | 3 | reserved |
//! | 8 | 4 | record count |
//! | 12 | 4 | CRC32 of the payload |
//! | 16 | .. | bincode `Vec<WordRecord>` |
//!
//! The cache carries no link to its source other than file modification
//! times; see [`is_stale`].

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use super::WordRecord;

const MAGIC: &[u8; 4] = b"EDXC";
pub const VERSION: u8 = 1;
const HEADER_SIZE: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("dictionary source not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected EDXC)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("payload checksum mismatch")]
    ChecksumMismatch,

    #[error("record count mismatch: header says {expected}, payload has {found}")]
    CountMismatch { expected: usize, found: usize },

    #[error("record count exceeds u32::MAX")]
    TooLarge,

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

pub fn encode(words: &[WordRecord]) -> Result<Vec<u8>, CacheError> {
    let count: u32 = words.len().try_into().map_err(|_| CacheError::TooLarge)?;
    let payload = bincode::serialize(words).map_err(CacheError::Serialize)?;
    let crc = crc32fast::hash(&payload);

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.push(VERSION);
    buf.extend_from_slice(&[0u8; 3]); // reserved
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend_from_slice(&crc.to_le_bytes());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

pub fn decode(data: &[u8]) -> Result<Vec<WordRecord>, CacheError> {
    if data.len() < 5 {
        return Err(CacheError::InvalidHeader);
    }
    if &data[..4] != MAGIC {
        return Err(CacheError::InvalidMagic);
    }
    if data[4] != VERSION {
        return Err(CacheError::UnsupportedVersion(data[4]));
    }
    if data.len() < HEADER_SIZE {
        return Err(CacheError::InvalidHeader);
    }

    let expected = read_u32(&data[8..12]) as usize;
    let crc = read_u32(&data[12..16]);
    let payload = &data[HEADER_SIZE..];
    if crc32fast::hash(payload) != crc {
        return Err(CacheError::ChecksumMismatch);
    }

    let words: Vec<WordRecord> =
        bincode::deserialize(payload).map_err(CacheError::Deserialize)?;
    if words.len() != expected {
        return Err(CacheError::CountMismatch {
            expected,
            found: words.len(),
        });
    }
    Ok(words)
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(b)
}

/// Read a cache file through a read-only mapping.
pub fn open(path: &Path) -> Result<Vec<WordRecord>, CacheError> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Err(CacheError::InvalidHeader);
    }
    // SAFETY: The file is opened read-only and the mapping is immutable.
    // The Mmap is dropped after decoding completes below.
    let mmap = unsafe { Mmap::map(&file)? };
    decode(&mmap)
}

/// Atomic write: write to `<file name>.tmp` then rename.
pub fn save(path: &Path, words: &[WordRecord]) -> Result<(), CacheError> {
    let bytes = encode(words)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Whether `cache` must be rebuilt from `source`.
///
/// A missing source is an error (nothing to rebuild from). A missing cache,
/// or a source modified after the cache was written, is stale.
pub fn is_stale(source: &Path, cache: &Path) -> Result<bool, CacheError> {
    let source_mtime = match fs::metadata(source) {
        Ok(meta) => meta.modified()?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CacheError::SourceMissing(source.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    let cache_mtime = match fs::metadata(cache) {
        Ok(meta) => meta.modified()?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(e.into()),
    };
    Ok(source_mtime > cache_mtime)
}
