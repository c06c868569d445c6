use std::collections::HashSet;
use std::io::{Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::EntrySink;
use crate::error::{ArcError, Result};
use crate::policy::ZipOptions;
use crate::util::sanitize::to_zip_name;

/// Writes every entry deflate-compressed into a new ZIP container.
///
/// ZIP names must be unique, so a second entry with an already written name
/// fails with `DuplicatePath` before anything is added for it.
pub struct ZipSink<W: Write + Seek> {
    writer: ZipWriter<W>,
    opts: ZipOptions,
    names: HashSet<String>,
}

impl<W: Write + Seek> ZipSink<W> {
    pub fn new(inner: W, opts: ZipOptions) -> Self {
        Self {
            writer: ZipWriter::new(inner),
            opts,
            names: HashSet::new(),
        }
    }

    fn file_options(&self) -> SimpleFileOptions {
        let mut o = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(self.opts.level);
        if self.opts.deterministic {
            o = o.last_modified_time(DateTime::default());
        }
        o
    }

    pub fn written(&self) -> usize {
        self.names.len()
    }

    /// Write the central directory and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.writer.finish()?)
    }
}

impl<W: Write + Seek> EntrySink for ZipSink<W> {
    fn write_entry(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let name = if self.opts.forward_slashes {
            to_zip_name(path)
        } else {
            path.to_string()
        };
        if self.names.contains(&name) {
            return Err(ArcError::DuplicatePath(name));
        }
        let opts = self.file_options();
        self.writer.start_file(name.as_str(), opts)?;
        self.writer.write_all(data)?;
        self.names.insert(name);
        Ok(())
    }
}
