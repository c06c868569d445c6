use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "dotarc: convert between ZIP and ARC archives", long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an ARC archive from a ZIP file or a directory
    ToArc {
        input: PathBuf,
        out: PathBuf,
        /// refuse sources with more file entries than this
        #[arg(long)]
        max_entries: Option<u64>,
        /// refuse sources whose payloads add up to more bytes than this
        #[arg(long)]
        max_bytes: Option<u64>,
    },

    /// Convert an ARC archive into a deflate-compressed ZIP file
    ToZip {
        archive: PathBuf,
        out: PathBuf,
        /// fixed entry timestamps for reproducible output
        #[arg(long)]
        deterministic: bool,
        /// deflate level
        #[arg(long)]
        level: Option<i64>,
        /// keep `\` separators in ZIP entry names
        #[arg(long)]
        keep_backslashes: bool,
        /// reject archives that are not tightly packed
        #[arg(long)]
        strict: bool,
    },

    /// List archive contents
    List {
        archive: PathBuf,
        /// show offsets and sizes
        #[arg(long)]
        long: bool,
        /// include a BLAKE3 digest of each payload
        #[arg(long)]
        hash: bool,
        /// print rows as JSON
        #[arg(long)]
        json: bool,
        #[arg(long)]
        strict: bool,
    },

    /// Extract archive entries to a directory
    Extract {
        archive: PathBuf,
        dest: PathBuf,
        /// only entries whose path contains this substring (repeatable)
        #[arg(long)]
        filter: Vec<String>,
        #[arg(long)]
        strict: bool,
    },

    /// Check bounds and tight packing, print a summary
    Verify {
        archive: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Stream one entry to stdout
    Cat {
        archive: PathBuf,
        path: String,
        #[arg(long)]
        strict: bool,
    },
}
