use std::io::{Read, Seek};

use tracing::debug;
use zip::ZipArchive;

use super::{EntrySource, SourceEntry};
use crate::error::Result;

/// Reads entries out of a ZIP container in central-directory order.
pub struct ZipSource<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        debug!(entries = archive.len(), "opened zip source");
        Ok(Self { archive })
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    fn entries(&mut self) -> Result<Vec<SourceEntry>> {
        let mut out = Vec::with_capacity(self.archive.len());
        for i in 0..self.archive.len() {
            let zf = self.archive.by_index_raw(i)?;
            out.push(SourceEntry {
                path: zf.name().to_string(),
                size: zf.size(),
                is_dir: zf.is_dir(),
            });
        }
        Ok(out)
    }

    fn open_entry(&mut self, index: usize) -> std::io::Result<Box<dyn Read + '_>> {
        let zf = self.archive.by_index(index).map_err(std::io::Error::other)?;
        Ok(Box::new(zf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn sample_zip() -> Vec<u8> {
        let mut w = ZipWriter::new(Cursor::new(Vec::new()));
        let opts = SimpleFileOptions::default();
        w.add_directory("dir/", opts).unwrap();
        w.start_file("dir/y.bin", opts).unwrap();
        w.write_all(&[0, 1, 2]).unwrap();
        w.start_file("x.txt", opts).unwrap();
        w.write_all(b"hi").unwrap();
        w.finish().unwrap().into_inner()
    }

    #[test]
    fn lists_entries_in_order() {
        let mut src = ZipSource::new(Cursor::new(sample_zip())).unwrap();
        let entries = src.entries().unwrap();
        let got: Vec<_> = entries
            .iter()
            .map(|e| (e.path.as_str(), e.size, e.is_dir))
            .collect();
        assert_eq!(
            got,
            vec![("dir/", 0, true), ("dir/y.bin", 3, false), ("x.txt", 2, false)]
        );
    }

    #[test]
    fn opens_payloads() {
        let mut src = ZipSource::new(Cursor::new(sample_zip())).unwrap();
        let mut buf = Vec::new();
        src.open_entry(2).unwrap().read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"hi");
    }

    #[test]
    fn rejects_non_zip() {
        assert!(ZipSource::new(Cursor::new(b"not a zip".to_vec())).is_err());
    }
}
