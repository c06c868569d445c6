use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::{EntrySource, SourceEntry};
use crate::error::{ArcError, Result};

/// Regular files below a directory, sorted by name at every level.
///
/// Symlinks are not followed and directories do not produce entries.
pub struct DirSource {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl DirSource {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            files: Vec::new(),
        }
    }
}

fn rel_path(root: &Path, file: &Path) -> Result<String> {
    let not_utf8 = || ArcError::SourceRead {
        path: file.to_string_lossy().into_owned(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "file name is not valid UTF-8",
        ),
    };
    let rel = file.strip_prefix(root).map_err(|_| not_utf8())?;
    let mut parts = Vec::new();
    for comp in rel.components() {
        parts.push(comp.as_os_str().to_str().ok_or_else(not_utf8)?);
    }
    Ok(parts.join("/"))
}

impl EntrySource for DirSource {
    fn entries(&mut self) -> Result<Vec<SourceEntry>> {
        self.files.clear();
        let mut out = Vec::new();
        for ent in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let ent = ent.map_err(std::io::Error::from)?;
            if !ent.file_type().is_file() {
                continue;
            }
            let path = rel_path(&self.root, ent.path())?;
            let size = ent.metadata().map_err(std::io::Error::from)?.len();
            out.push(SourceEntry {
                path,
                size,
                is_dir: false,
            });
            self.files.push(ent.into_path());
        }
        debug!(root = %self.root.display(), files = out.len(), "walked directory source");
        Ok(out)
    }

    fn open_entry(&mut self, index: usize) -> std::io::Result<Box<dyn Read + '_>> {
        let p = self.files.get(index).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no entry at index {index}"),
            )
        })?;
        Ok(Box::new(File::open(p)?))
    }
}
