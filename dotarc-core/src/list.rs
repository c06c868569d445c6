use std::path::Path;

use crate::domain::EntryRow;
use crate::error::Result;
use crate::policy::DecodePolicy;
use crate::read::opened::ArcArchive;

pub fn rows(arc: &ArcArchive, with_hash: bool) -> Vec<EntryRow> {
    let digests = if with_hash { arc.digests() } else { Vec::new() };
    arc.entries()
        .iter()
        .enumerate()
        .map(|(index, e)| EntryRow {
            index,
            path: e.path.clone(),
            offset: e.offset,
            size: e.size,
            blake3: digests.get(index).map(hex::encode),
        })
        .collect()
}

pub fn list(archive: &Path, policy: &DecodePolicy, with_hash: bool) -> Result<Vec<EntryRow>> {
    let arc = ArcArchive::open(archive, policy)?;
    Ok(rows(&arc, with_hash))
}
