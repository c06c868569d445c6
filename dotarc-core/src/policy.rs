use serde::{Deserialize, Serialize};

/// How much of an ARC blob is verified on load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DecodePolicy {
    /// Reject archives whose payloads are not packed back to back right after
    /// the header. Bounds are always checked regardless of this flag.
    pub strict_packing: bool,
    pub max_entries: Option<u64>,
}

impl DecodePolicy {
    pub fn strict() -> Self {
        Self {
            strict_packing: true,
            ..Default::default()
        }
    }
}

/// Limits applied while building an ARC blob from a source container.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConvertPolicy {
    pub max_entries: Option<u64>,
    /// Cap on the summed payload size, checked before any payload is read.
    pub max_total_bytes: Option<u64>,
}

/// Options for the ZIP side of an ARC → ZIP export.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZipOptions {
    /// Pin entry timestamps to the ZIP epoch for reproducible output.
    pub deterministic: bool,
    /// Deflate level; `None` uses the library default.
    pub level: Option<i64>,
    /// Write `/` separators in entry names instead of the stored backslashes.
    pub forward_slashes: bool,
}

impl Default for ZipOptions {
    fn default() -> Self {
        Self {
            deterministic: false,
            level: None,
            forward_slashes: true,
        }
    }
}
