//! Containers that receive entries exported from an ARC archive.

use crate::error::Result;

pub mod dir;
pub mod zipfile;

pub trait EntrySink {
    /// Store one entry. `path` is the ARC path (backslash separators).
    fn write_entry(&mut self, path: &str, data: &[u8]) -> Result<()>;
}

pub use dir::DirSink;
pub use zipfile::ZipSink;
