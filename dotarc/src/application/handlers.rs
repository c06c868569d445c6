use std::io::Write;
use std::path::PathBuf;

use dotarc_core::error::Result;
use dotarc_core::{
    ConvertPolicy, DecodePolicy, ZipOptions, arc_to_zip, cat, extract, list, pack, verify,
};

fn decode_policy(strict: bool) -> DecodePolicy {
    if strict {
        DecodePolicy::strict()
    } else {
        DecodePolicy::default()
    }
}

fn json_err(e: serde_json::Error) -> std::io::Error {
    std::io::Error::other(e)
}

pub fn handle_to_arc(
    input: PathBuf,
    out: PathBuf,
    max_entries: Option<u64>,
    max_bytes: Option<u64>,
) -> Result<()> {
    let policy = ConvertPolicy {
        max_entries,
        max_total_bytes: max_bytes,
    };
    let summary = pack(&input, &out, &policy)?;
    eprintln!(
        "to-arc: {} -> {} ({} entries, {} bytes)",
        input.display(),
        out.display(),
        summary.entries,
        summary.bytes
    );
    Ok(())
}

pub fn handle_to_zip(
    archive: PathBuf,
    out: PathBuf,
    deterministic: bool,
    level: Option<i64>,
    keep_backslashes: bool,
    strict: bool,
) -> Result<()> {
    let opts = ZipOptions {
        deterministic,
        level,
        forward_slashes: !keep_backslashes,
    };
    let n = arc_to_zip(&archive, &out, &decode_policy(strict), &opts)?;
    eprintln!(
        "to-zip: {} -> {} ({} entries)",
        archive.display(),
        out.display(),
        n
    );
    Ok(())
}

pub fn handle_list(
    archive: PathBuf,
    long: bool,
    hash: bool,
    json: bool,
    strict: bool,
) -> Result<()> {
    let rows = list(&archive, &decode_policy(strict), hash)?;
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &rows).map_err(json_err)?;
        writeln!(out)?;
        return Ok(());
    }
    for r in &rows {
        match (long, &r.blake3) {
            (true, Some(h)) => writeln!(
                out,
                "{:>10}  {:>10}  {}  {}",
                r.offset, r.size, h, r.path
            )?,
            (true, None) => writeln!(out, "{:>10}  {:>10}  {}", r.offset, r.size, r.path)?,
            (false, Some(h)) => writeln!(out, "{}  {}", h, r.path)?,
            (false, None) => writeln!(out, "{}", r.path)?,
        }
    }
    Ok(())
}

pub fn handle_extract(
    archive: PathBuf,
    dest: PathBuf,
    filter: Vec<String>,
    strict: bool,
) -> Result<()> {
    let n = extract(&archive, &dest, &decode_policy(strict), &filter)?;
    eprintln!("extract: {} entries -> {}", n, dest.display());
    Ok(())
}

pub fn handle_verify(archive: PathBuf, json: bool) -> Result<()> {
    let report = verify(&archive)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(json_err)?
        );
    } else {
        eprintln!(
            "verify: OK ({} entries, header {} bytes, payload {} bytes, blake3 {})",
            report.entries, report.header_len, report.payload_bytes, report.blake3
        );
    }
    Ok(())
}

pub fn handle_cat(archive: PathBuf, path: String, strict: bool) -> Result<()> {
    let data = cat(&archive, &path, &decode_policy(strict))?;
    let mut out = std::io::stdout().lock();
    out.write_all(&data)?;
    out.flush()?;
    Ok(())
}
