//! Containers that feed entries into an ARC build.

use std::io::Read;

use crate::error::Result;

pub mod dir;
pub mod memory;
pub mod zipfile;

/// Metadata for one entry of a source container, in container order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    /// Entry path as the container names it (`/` separators).
    pub path: String,
    /// Declared uncompressed size.
    pub size: u64,
    pub is_dir: bool,
}

pub trait EntrySource {
    /// List every entry, directories included.
    fn entries(&mut self) -> Result<Vec<SourceEntry>>;

    /// Open the payload of the entry at `index` in the `entries()` listing.
    fn open_entry(&mut self, index: usize) -> std::io::Result<Box<dyn Read + '_>>;
}

pub use dir::DirSource;
pub use memory::MemorySource;
pub use zipfile::ZipSource;
