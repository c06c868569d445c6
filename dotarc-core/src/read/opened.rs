use std::ops::Range;
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, info};

use crate::container::header::{self, ArcEntry, ArcTable};
use crate::container::layout::{check_bounds, check_packing, payload_end};
use crate::convert::write_entries;
use crate::error::{ArcError, Result};
use crate::hash::blake3::digest_ranges;
use crate::policy::DecodePolicy;
use crate::sink::EntrySink;
use crate::util::sanitize::to_arc_path;

/// One loaded ARC archive: the raw buffer and its decoded header, validated
/// together. Immutable once built; payload accessors hand out zero-copy
/// slices of the shared buffer.
#[derive(Clone, Debug)]
pub struct ArcArchive {
    data: Bytes,
    table: ArcTable,
    ranges: Vec<Range<usize>>,
}

impl ArcArchive {
    pub fn parse(data: impl Into<Bytes>, policy: &DecodePolicy) -> Result<Self> {
        let data = data.into();
        let table = header::decode(&data)?;

        if let Some(max) = policy.max_entries {
            if table.entries.len() as u64 > max {
                return Err(ArcError::LimitExceeded(format!(
                    "{} entries (max {max})",
                    table.entries.len()
                )));
            }
        }

        let ranges = check_bounds(&table, data.len())?;
        if policy.strict_packing {
            check_packing(&table, data.len())?;
        }

        debug!(
            entries = table.entries.len(),
            header_len = table.header_len,
            bytes = data.len(),
            strict = policy.strict_packing,
            "parsed ARC archive"
        );
        Ok(Self {
            data,
            table,
            ranges,
        })
    }

    pub fn open(path: &Path, policy: &DecodePolicy) -> Result<Self> {
        let data = std::fs::read(path)?;
        info!(path = %path.display(), bytes = data.len(), "loading ARC archive");
        Self::parse(data, policy)
    }

    pub fn entries(&self) -> &[ArcEntry] {
        &self.table.entries
    }

    pub fn len(&self) -> usize {
        self.table.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }

    pub fn header_len(&self) -> usize {
        self.table.header_len
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }

    /// Sum of all declared payload sizes.
    pub fn payload_bytes(&self) -> u64 {
        self.ranges.iter().map(|r| r.len() as u64).sum()
    }

    /// Bytes after the furthest payload. Always zero for archives we build.
    pub fn trailing_bytes(&self) -> usize {
        self.data.len().saturating_sub(payload_end(&self.table))
    }

    pub fn payload(&self, index: usize) -> Option<Bytes> {
        self.ranges.get(index).map(|r| self.data.slice(r.clone()))
    }

    /// Index of the first entry stored under `path`. `/` separators in the
    /// query are accepted.
    pub fn find(&self, path: &str) -> Option<usize> {
        let want = to_arc_path(path);
        self.table.entries.iter().position(|e| e.path == want)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArcEntry, Bytes)> + '_ {
        self.table
            .entries
            .iter()
            .zip(&self.ranges)
            .map(|(e, r)| (e, self.data.slice(r.clone())))
    }

    /// The ordered `(path, payload)` pairs.
    pub fn into_entries(self) -> Vec<(String, Bytes)> {
        let data = self.data;
        self.table
            .entries
            .into_iter()
            .zip(self.ranges)
            .map(|(e, r)| (e.path, data.slice(r)))
            .collect()
    }

    /// BLAKE3 digest of every payload, in table order.
    pub fn digests(&self) -> Vec<[u8; 32]> {
        digest_ranges(&self.data, &self.ranges)
    }

    /// Write every entry to `sink` in table order.
    pub fn export(&self, sink: &mut dyn EntrySink) -> Result<usize> {
        write_entries(
            self.table
                .entries
                .iter()
                .zip(&self.ranges)
                .map(|(e, r)| (e.path.as_str(), &self.data[r.clone()])),
            sink,
        )
    }
}
