//! ARC header table.
//!
//! Layout (big-endian, no magic, no version):
//! - `[i32 entry_count]`
//! - per entry: `[i16 path_len][path bytes UTF-8][i32 payload_offset][i32 payload_size]`
//!
//! Payloads follow the header back to back in declaration order. Offsets are
//! absolute from the first byte of the blob.

use std::collections::HashSet;

use tracing::debug;

use crate::container::layout::{COUNT_LEN, MAX_PATH_LEN, header_size, record_len};
use crate::error::{ArcError, Result};
use crate::util::buf::{BeReader, put_i16, put_i32};
use crate::util::sanitize::to_arc_path;

/// One decoded header record. Offset and size are kept exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcEntry {
    pub path: String,
    pub offset: i32,
    pub size: i32,
}

impl ArcEntry {
    /// Payload range inside the blob, or `None` if the stored fields are
    /// negative.
    pub fn range(&self) -> Option<std::ops::Range<usize>> {
        let start = usize::try_from(self.offset).ok()?;
        let len = usize::try_from(self.size).ok()?;
        Some(start..start.checked_add(len)?)
    }
}

/// Decoded header: entries in declaration order plus the number of bytes the
/// header occupied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcTable {
    pub entries: Vec<ArcEntry>,
    pub header_len: usize,
}

/// Encoded header plus the absolute offset assigned to each entry.
#[derive(Debug, Clone)]
pub struct EncodedHeader {
    pub bytes: Vec<u8>,
    pub offsets: Vec<u32>,
}

impl EncodedHeader {
    /// Total blob length once every payload has been appended.
    pub fn blob_len(&self, sizes: impl IntoIterator<Item = u64>) -> u64 {
        self.bytes.len() as u64 + sizes.into_iter().sum::<u64>()
    }
}

fn to_i32(v: u64, what: impl FnOnce() -> String) -> Result<i32> {
    i32::try_from(v).map_err(|_| ArcError::ArchiveTooLarge(what()))
}

/// Build the header for `entries` given as `(path, payload size)` in payload
/// order. Two entries that normalize to the same ARC path are rejected.
pub fn encode<S: AsRef<str>>(entries: &[(S, u64)]) -> Result<EncodedHeader> {
    let count = to_i32(entries.len() as u64, || format!("{} entries", entries.len()))?;

    let mut paths: Vec<Vec<u8>> = Vec::with_capacity(entries.len());
    let mut seen = HashSet::with_capacity(entries.len());
    for (p, _) in entries {
        let norm = to_arc_path(p.as_ref());
        if norm.len() > MAX_PATH_LEN {
            return Err(ArcError::PathTooLong {
                len: norm.len(),
                max: MAX_PATH_LEN,
                path: norm,
            });
        }
        if !seen.insert(norm.clone()) {
            return Err(ArcError::DuplicatePath(norm));
        }
        paths.push(norm.into_bytes());
    }

    let hdr_len = header_size(paths.iter().map(Vec::len));
    let mut bytes = Vec::with_capacity(hdr_len);
    let mut offsets = Vec::with_capacity(entries.len());
    put_i32(&mut bytes, count);

    let mut cursor = hdr_len as u64;
    for (path, (_, size)) in paths.iter().zip(entries) {
        let path_str = || String::from_utf8_lossy(path).into_owned();
        let off = to_i32(cursor, || format!("offset {cursor} of {}", path_str()))?;
        let sz = to_i32(*size, || format!("size {size} of {}", path_str()))?;
        let end = cursor + size;
        // the last byte of every payload must stay addressable as well
        to_i32(end, || format!("payload end {end} of {}", path_str()))?;

        put_i16(&mut bytes, path.len() as i16);
        bytes.extend_from_slice(path);
        put_i32(&mut bytes, off);
        put_i32(&mut bytes, sz);

        offsets.push(off as u32);
        cursor = end;
    }

    debug_assert_eq!(bytes.len(), hdr_len);
    debug!(entries = entries.len(), header_len = hdr_len, "encoded ARC header");
    Ok(EncodedHeader { bytes, offsets })
}

/// Parse the header table at the start of `buf`.
///
/// Offsets and sizes are not checked against the buffer here.
pub fn decode(buf: &[u8]) -> Result<ArcTable> {
    let mut r = BeReader::new(buf);
    let count = r.i32("entry count")?;
    if count < 0 {
        return Err(ArcError::CorruptArchive(format!(
            "negative entry count {count}"
        )));
    }
    let count = count as usize;

    // every record needs at least `record_len(0)` bytes
    let cap = count.min(r.remaining() / record_len(0));
    let mut entries = Vec::with_capacity(cap);

    for index in 0..count {
        let path_len = r.i16("path length")?;
        if path_len < 0 {
            return Err(ArcError::CorruptArchive(format!(
                "entry {index}: negative path length {path_len}"
            )));
        }
        let raw = r.take(path_len as usize, "path bytes")?;
        let path = std::str::from_utf8(raw)
            .map_err(|source| ArcError::InvalidEncoding { index, source })?
            .to_owned();
        let offset = r.i32("payload offset")?;
        let size = r.i32("payload size")?;
        entries.push(ArcEntry { path, offset, size });
    }

    let header_len = r.position();
    debug_assert_eq!(
        header_len,
        COUNT_LEN
            + entries
                .iter()
                .map(|e| record_len(e.path.len()))
                .sum::<usize>()
    );
    debug!(entries = entries.len(), header_len, "decoded ARC header");
    Ok(ArcTable {
        entries,
        header_len,
    })
}
