use std::fs;
use std::path::{Path, PathBuf};

use super::EntrySink;
use crate::error::Result;
use crate::util::sanitize::safe_join;

/// Writes entries as plain files below `root`.
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Where `path` would land, without touching the filesystem.
    pub fn target(&self, path: &str) -> Result<PathBuf> {
        safe_join(&self.root, path)
    }
}

impl EntrySink for DirSink {
    fn write_entry(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let out = self.target(path)?;
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out, data)?;
        Ok(())
    }
}
