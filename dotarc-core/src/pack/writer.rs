use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use tracing::info;

use crate::container::header;
use crate::convert::to_arc;
use crate::domain::PackSummary;
use crate::error::Result;
use crate::policy::ConvertPolicy;
use crate::source::{DirSource, EntrySource, ZipSource};
use crate::util::atomic::write_atomic;

fn write_arc(
    source: &mut dyn EntrySource,
    out: &Path,
    policy: &ConvertPolicy,
) -> Result<PackSummary> {
    let blob = to_arc(source, policy)?;
    let table = header::decode(&blob)?;
    write_atomic(out, |w| Ok(w.write_all(&blob)?))?;
    Ok(PackSummary {
        entries: table.entries.len(),
        header_len: table.header_len,
        bytes: blob.len(),
    })
}

/// Convert a ZIP file into an ARC file.
pub fn zip_to_arc(zip: &Path, out: &Path, policy: &ConvertPolicy) -> Result<PackSummary> {
    info!(input = %zip.display(), out = %out.display(), "zip -> arc");
    let mut src = ZipSource::new(BufReader::new(File::open(zip)?))?;
    write_arc(&mut src, out, policy)
}

/// Pack the regular files below `dir` into an ARC file.
pub fn dir_to_arc(dir: &Path, out: &Path, policy: &ConvertPolicy) -> Result<PackSummary> {
    info!(input = %dir.display(), out = %out.display(), "dir -> arc");
    let mut src = DirSource::new(dir);
    write_arc(&mut src, out, policy)
}

/// `input` may be a ZIP file or a directory.
pub fn pack(input: &Path, out: &Path, policy: &ConvertPolicy) -> Result<PackSummary> {
    if input.is_dir() {
        dir_to_arc(input, out, policy)
    } else {
        zip_to_arc(input, out, policy)
    }
}
