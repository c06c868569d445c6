use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::policy::{DecodePolicy, ZipOptions};
use crate::read::opened::ArcArchive;
use crate::sink::ZipSink;
use crate::util::atomic::write_atomic;

/// Convert an ARC file into a ZIP file. Returns the number of entries.
pub fn arc_to_zip(
    archive: &Path,
    out: &Path,
    policy: &DecodePolicy,
    opts: &ZipOptions,
) -> Result<usize> {
    let arc = ArcArchive::open(archive, policy)?;
    info!(
        input = %archive.display(),
        out = %out.display(),
        entries = arc.len(),
        "arc -> zip"
    );
    write_atomic(out, |w| {
        let mut sink = ZipSink::new(w, opts.clone());
        arc.export(&mut sink)?;
        let n = sink.written();
        sink.finish()?;
        Ok(n)
    })
}
