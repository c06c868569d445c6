use std::io::Read;

use super::{EntrySource, SourceEntry};
use crate::error::Result;

/// In-memory entry list. A path ending in `/` with no bytes is a directory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    items: Vec<(String, Vec<u8>)>,
}

impl MemorySource {
    pub fn new<P: Into<String>, D: Into<Vec<u8>>>(items: impl IntoIterator<Item = (P, D)>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|(p, d)| (p.into(), d.into()))
                .collect(),
        }
    }
}

impl EntrySource for MemorySource {
    fn entries(&mut self) -> Result<Vec<SourceEntry>> {
        Ok(self
            .items
            .iter()
            .map(|(p, d)| SourceEntry {
                path: p.clone(),
                size: d.len() as u64,
                is_dir: p.ends_with('/') && d.is_empty(),
            })
            .collect())
    }

    fn open_entry(&mut self, index: usize) -> std::io::Result<Box<dyn Read + '_>> {
        let (_, data) = self.items.get(index).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no entry at index {index}"),
            )
        })?;
        Ok(Box::new(&data[..]))
    }
}
