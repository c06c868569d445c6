pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use dotarc_core::error::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::ToArc {
            input,
            out,
            max_entries,
            max_bytes,
        } => handlers::handle_to_arc(input, out, max_entries, max_bytes),
        Commands::ToZip {
            archive,
            out,
            deterministic,
            level,
            keep_backslashes,
            strict,
        } => handlers::handle_to_zip(archive, out, deterministic, level, keep_backslashes, strict),
        Commands::List {
            archive,
            long,
            hash,
            json,
            strict,
        } => handlers::handle_list(archive, long, hash, json, strict),
        Commands::Extract {
            archive,
            dest,
            filter,
            strict,
        } => handlers::handle_extract(archive, dest, filter, strict),
        Commands::Verify { archive, json } => handlers::handle_verify(archive, json),
        Commands::Cat {
            archive,
            path,
            strict,
        } => handlers::handle_cat(archive, path, strict),
    }
}
