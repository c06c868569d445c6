#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod policy;

pub mod util {
    pub mod atomic;
    pub mod buf;
    pub mod sanitize;
}

pub mod hash {
    pub mod blake3;
}

pub mod container {
    pub mod header;
    pub mod layout;
}

pub mod convert;
pub mod sink;
pub mod source;

pub mod pack {
    pub mod writer;
}

pub mod read {
    pub mod export;
    pub mod extract;
    pub mod opened;
}

pub mod list;

// Re-exports: stable API surface
pub use container::header::{ArcEntry, ArcTable, EncodedHeader, decode, encode};
pub use convert::{arc_to_zip_bytes, from_arc, from_arc_with, to_arc, write_entries};
pub use domain::{EntryRow, PackSummary, VerifyReport};
pub use error::{ArcError, Result};
pub use list::list;
pub use pack::writer::{dir_to_arc, pack, zip_to_arc};
pub use policy::{ConvertPolicy, DecodePolicy, ZipOptions};
pub use read::export::arc_to_zip;
pub use read::extract::{cat, extract, verify};
pub use read::opened::ArcArchive;
