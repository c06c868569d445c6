use std::path::{Path, PathBuf};

use crate::error::{ArcError, Result};

/// Separator used inside ARC headers.
pub const ARC_SEP: char = '\\';

/// Rewrite `/` separators to the ARC backslash form. Everything else is kept
/// verbatim.
pub fn to_arc_path(p: &str) -> String {
    p.replace('/', "\\")
}

/// Rewrite ARC backslashes to the `/` form ZIP entry names use.
pub fn to_zip_name(p: &str) -> String {
    p.replace(ARC_SEP, "/")
}

/// Join a stored entry path under `root`, splitting on either separator.
///
/// Absolute paths, drive prefixes, `.`/`..` and empty components are rejected.
pub fn safe_join(root: &Path, stored: &str) -> Result<PathBuf> {
    let unsafe_path = || ArcError::UnsafePath(stored.to_string());
    if stored.is_empty() || stored.starts_with(['/', '\\']) {
        return Err(unsafe_path());
    }
    let mut out = root.to_path_buf();
    for comp in stored.split(['/', '\\']) {
        if comp.is_empty() || comp == "." || comp == ".." || comp.contains(':') {
            return Err(unsafe_path());
        }
        out.push(comp);
    }
    Ok(out)
}
