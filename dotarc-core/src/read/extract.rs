use std::path::Path;

use bytes::Bytes;
use tracing::info;

use crate::domain::VerifyReport;
use crate::error::{ArcError, Result};
use crate::hash::blake3::digest_hex;
use crate::policy::DecodePolicy;
use crate::read::opened::ArcArchive;
use crate::sink::{DirSink, EntrySink};
use crate::util::sanitize::safe_join;

/// Write entries of `archive` below `dest`. When `filter` is non-empty only
/// entries whose path contains one of the substrings are written.
///
/// Every target path is validated before `dest` or any file is created.
pub fn extract(
    archive: &Path,
    dest: &Path,
    policy: &DecodePolicy,
    filter: &[String],
) -> Result<usize> {
    let arc = ArcArchive::open(archive, policy)?;
    let wanted = |p: &str| filter.is_empty() || filter.iter().any(|f| p.contains(f.as_str()));

    for e in arc.entries().iter().filter(|e| wanted(&e.path)) {
        safe_join(dest, &e.path)?;
    }

    let mut sink = DirSink::new(dest)?;
    let mut n = 0;
    for (e, data) in arc.iter().filter(|(e, _)| wanted(&e.path)) {
        sink.write_entry(&e.path, &data)?;
        n += 1;
    }
    info!(archive = %archive.display(), dest = %dest.display(), entries = n, "extracted");
    Ok(n)
}

/// Load `archive` with tight packing enforced and summarize it.
pub fn verify(archive: &Path) -> Result<VerifyReport> {
    let arc = ArcArchive::open(archive, &DecodePolicy::strict())?;
    Ok(VerifyReport {
        entries: arc.len(),
        header_len: arc.header_len(),
        payload_bytes: arc.payload_bytes(),
        archive_bytes: arc.as_bytes().len(),
        blake3: digest_hex(arc.as_bytes()),
    })
}

/// Payload of the entry stored under `path`.
pub fn cat(archive: &Path, path: &str, policy: &DecodePolicy) -> Result<Bytes> {
    let arc = ArcArchive::open(archive, policy)?;
    arc.find(path)
        .and_then(|i| arc.payload(i))
        .ok_or_else(|| ArcError::NotFound(path.to_string()))
}
