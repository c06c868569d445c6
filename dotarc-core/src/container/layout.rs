//! Offset/size bookkeeping for the ARC payload region.

use std::ops::Range;

use crate::container::header::ArcTable;
use crate::error::{ArcError, Result};

/// Bytes taken by the leading entry count.
pub const COUNT_LEN: usize = 4;
/// Fixed bytes per record besides the path: i16 length + i32 offset + i32 size.
pub const RECORD_FIXED_LEN: usize = 2 + 4 + 4;
/// Longest encodable path in bytes (positive range of the i16 length field).
pub const MAX_PATH_LEN: usize = i16::MAX as usize;

#[inline]
pub fn record_len(path_len: usize) -> usize {
    RECORD_FIXED_LEN + path_len
}

/// `4 + Σ(2 + path_len + 8)` over the UTF-8 path lengths.
pub fn header_size(path_lens: impl IntoIterator<Item = usize>) -> usize {
    COUNT_LEN + path_lens.into_iter().map(record_len).sum::<usize>()
}

/// Check that every entry's payload range lies inside a blob of `blob_len`
/// bytes and return the ranges in table order. Negative fields are rejected.
pub fn check_bounds(table: &ArcTable, blob_len: usize) -> Result<Vec<Range<usize>>> {
    let mut ranges = Vec::with_capacity(table.entries.len());
    for (i, e) in table.entries.iter().enumerate() {
        if e.offset < 0 || e.size < 0 {
            return Err(ArcError::CorruptArchive(format!(
                "entry {i} ({}): negative offset/size {}/{}",
                e.path, e.offset, e.size
            )));
        }
        match e.range() {
            Some(r) if r.end <= blob_len => ranges.push(r),
            _ => {
                return Err(ArcError::CorruptArchive(format!(
                    "entry {i} ({}): payload {}+{} outside {blob_len}-byte archive",
                    e.path, e.offset, e.size
                )));
            }
        }
    }
    Ok(ranges)
}

/// Check the tight-packing invariant: payloads start right after the header,
/// follow each other without gaps or overlaps, and end exactly at `blob_len`.
pub fn check_packing(table: &ArcTable, blob_len: usize) -> Result<()> {
    let mut expect = table.header_len as u64;
    for (i, e) in table.entries.iter().enumerate() {
        if i64::from(e.offset) != expect as i64 {
            return Err(ArcError::CorruptArchive(format!(
                "entry {i} ({}): offset {} but tight packing expects {expect}",
                e.path, e.offset
            )));
        }
        expect += u64::try_from(e.size).map_err(|_| {
            ArcError::CorruptArchive(format!("entry {i} ({}): negative size {}", e.path, e.size))
        })?;
    }
    if expect != blob_len as u64 {
        return Err(ArcError::CorruptArchive(format!(
            "payload region ends at {expect} but archive is {blob_len} bytes"
        )));
    }
    Ok(())
}

/// End of the furthest payload, or the header length when there are none.
pub fn payload_end(table: &ArcTable) -> usize {
    table
        .entries
        .iter()
        .filter_map(|e| e.range())
        .map(|r| r.end)
        .fold(table.header_len, usize::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::header::ArcEntry;

    fn table(entries: &[(&str, i32, i32)]) -> ArcTable {
        let entries: Vec<ArcEntry> = entries
            .iter()
            .map(|(p, o, s)| ArcEntry {
                path: p.to_string(),
                offset: *o,
                size: *s,
            })
            .collect();
        let header_len = header_size(entries.iter().map(|e| e.path.len()));
        ArcTable {
            entries,
            header_len,
        }
    }

    #[test]
    fn header_size_formula() {
        assert_eq!(header_size([]), 4);
        assert_eq!(header_size([5, 9]), 38);
    }

    #[test]
    fn bounds_accept_exact_fit() {
        let t = table(&[("x.txt", 38, 2), ("dir\\y.bin", 40, 3)]);
        assert_eq!(check_bounds(&t, 43).unwrap(), vec![38..40, 40..43]);
        check_packing(&t, 43).unwrap();
        assert_eq!(payload_end(&t), 43);
    }

    #[test]
    fn bounds_reject_overrun_and_negatives() {
        let t = table(&[("x.txt", 38, 2), ("dir\\y.bin", 40, 4)]);
        assert!(matches!(check_bounds(&t, 43), Err(ArcError::CorruptArchive(_))));

        let t = table(&[("x", -1, 2)]);
        assert!(matches!(check_bounds(&t, 100), Err(ArcError::CorruptArchive(_))));

        let t = table(&[("x", 15, -2)]);
        assert!(matches!(check_bounds(&t, 100), Err(ArcError::CorruptArchive(_))));
    }

    #[test]
    fn packing_rejects_gap_overlap_and_trailing() {
        // gap: second payload starts one byte late
        let t = table(&[("x.txt", 38, 2), ("dir\\y.bin", 41, 3)]);
        check_bounds(&t, 44).unwrap();
        assert!(check_packing(&t, 44).is_err());

        // overlap
        let t = table(&[("x.txt", 38, 2), ("dir\\y.bin", 39, 3)]);
        assert!(check_packing(&t, 42).is_err());

        // first payload not right after the header
        let t = table(&[("x.txt", 39, 2)]);
        assert!(check_packing(&t, 41).is_err());

        // trailing garbage
        let t = table(&[("x.txt", 19, 2)]);
        check_packing(&t, 21).unwrap();
        assert!(check_packing(&t, 22).is_err());
    }
}
