//! In-memory conversion between entry containers and ARC blobs.
//!
//! Both directions are eager and all-or-nothing: on error nothing is returned
//! and any partially built buffer is dropped.

use std::io::Read;

use bytes::Bytes;
use tracing::debug;

use crate::container::header;
use crate::error::{ArcError, Result};
use crate::policy::{ConvertPolicy, DecodePolicy, ZipOptions};
use crate::read::opened::ArcArchive;
use crate::sink::{EntrySink, ZipSink};
use crate::source::{EntrySource, SourceEntry};

fn check_limits(files: &[(usize, SourceEntry)], policy: &ConvertPolicy) -> Result<()> {
    if let Some(max) = policy.max_entries {
        if files.len() as u64 > max {
            return Err(ArcError::LimitExceeded(format!(
                "{} entries (max {max})",
                files.len()
            )));
        }
    }
    if let Some(max) = policy.max_total_bytes {
        let total = files
            .iter()
            .fold(0u64, |acc, (_, e)| acc.saturating_add(e.size));
        if total > max {
            return Err(ArcError::LimitExceeded(format!(
                "{total} payload bytes (max {max})"
            )));
        }
    }
    Ok(())
}

/// Append exactly `entry.size` bytes from the source to `blob`.
fn append_payload(
    source: &mut dyn EntrySource,
    index: usize,
    entry: &SourceEntry,
    blob: &mut Vec<u8>,
) -> Result<()> {
    let source_err = |e: std::io::Error| ArcError::SourceRead {
        path: entry.path.clone(),
        source: e,
    };
    let r = source.open_entry(index).map_err(source_err)?;
    // one extra byte so an overlong stream is noticed
    let got = r
        .take(entry.size + 1)
        .read_to_end(blob)
        .map_err(source_err)? as u64;
    if got != entry.size {
        return Err(source_err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("declared {} bytes but read {got}", entry.size),
        )));
    }
    Ok(())
}

/// Build an ARC blob from every non-directory entry of `source`, in source
/// order.
pub fn to_arc(source: &mut dyn EntrySource, policy: &ConvertPolicy) -> Result<Vec<u8>> {
    let files: Vec<(usize, SourceEntry)> = source
        .entries()?
        .into_iter()
        .enumerate()
        .filter(|(_, e)| !e.is_dir)
        .collect();
    check_limits(&files, policy)?;

    let listing: Vec<(&str, u64)> = files
        .iter()
        .map(|(_, e)| (e.path.as_str(), e.size))
        .collect();
    let hdr = header::encode(&listing)?;
    let total = hdr.blob_len(files.iter().map(|(_, e)| e.size));

    // encode() already bounded the total to the i32 range
    let mut blob = Vec::with_capacity(total as usize);
    blob.extend_from_slice(&hdr.bytes);
    for ((index, entry), off) in files.iter().zip(&hdr.offsets) {
        debug_assert_eq!(blob.len() as u64, u64::from(*off));
        append_payload(source, *index, entry, &mut blob)?;
    }

    debug!(entries = files.len(), bytes = blob.len(), "built ARC blob");
    Ok(blob)
}

/// Split an ARC blob into its `(path, payload)` pairs in header order.
///
/// Payloads are zero-copy slices of `blob`.
pub fn from_arc(blob: impl Into<Bytes>) -> Result<Vec<(String, Bytes)>> {
    from_arc_with(blob, &DecodePolicy::default())
}

pub fn from_arc_with(
    blob: impl Into<Bytes>,
    policy: &DecodePolicy,
) -> Result<Vec<(String, Bytes)>> {
    Ok(ArcArchive::parse(blob, policy)?.into_entries())
}

/// Feed entries to `sink` in order. Returns how many were written.
pub fn write_entries<'a, I>(entries: I, sink: &mut dyn EntrySink) -> Result<usize>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut n = 0;
    for (path, data) in entries {
        sink.write_entry(path, data)?;
        n += 1;
    }
    Ok(n)
}

/// ARC blob → ZIP bytes, entirely in memory.
pub fn arc_to_zip_bytes(
    blob: impl Into<Bytes>,
    policy: &DecodePolicy,
    opts: &ZipOptions,
) -> Result<Vec<u8>> {
    let arc = ArcArchive::parse(blob, policy)?;
    let mut sink = ZipSink::new(std::io::Cursor::new(Vec::new()), opts.clone());
    arc.export(&mut sink)?;
    Ok(sink.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemorySource, ZipSource};
    use std::io::Cursor;

    fn scenario() -> MemorySource {
        MemorySource::new([
            ("x.txt", b"hi".to_vec()),
            ("dir\\y.bin", vec![0u8, 1, 2]),
        ])
    }

    #[test]
    fn concrete_two_entry_blob() {
        let blob = to_arc(&mut scenario(), &ConvertPolicy::default()).unwrap();
        assert_eq!(blob.len(), 43);
        assert_eq!(&blob[38..40], b"hi");
        assert_eq!(&blob[40..43], &[0, 1, 2]);

        let back = from_arc(blob).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].0, "x.txt");
        assert_eq!(&back[0].1[..], b"hi");
        assert_eq!(back[1].0, "dir\\y.bin");
        assert_eq!(&back[1].1[..], &[0, 1, 2]);
    }

    #[test]
    fn empty_source_gives_four_byte_blob() {
        let blob = to_arc(&mut MemorySource::default(), &ConvertPolicy::default()).unwrap();
        assert_eq!(blob, vec![0, 0, 0, 0]);
        assert!(from_arc(blob).unwrap().is_empty());
    }

    #[test]
    fn directories_are_skipped_but_empty_files_kept() {
        let mut src = MemorySource::new([
            ("assets/", Vec::new()),
            ("assets/empty.txt", Vec::new()),
            ("assets/a.bin", vec![9u8]),
        ]);
        let blob = to_arc(&mut src, &ConvertPolicy::default()).unwrap();
        let back = from_arc(blob).unwrap();
        let paths: Vec<_> = back.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["assets\\empty.txt", "assets\\a.bin"]);
        assert!(back[0].1.is_empty());
    }

    struct ShortSource;

    impl EntrySource for ShortSource {
        fn entries(&mut self) -> Result<Vec<SourceEntry>> {
            Ok(vec![SourceEntry {
                path: "lies.bin".into(),
                size: 10,
                is_dir: false,
            }])
        }

        fn open_entry(&mut self, _index: usize) -> std::io::Result<Box<dyn Read + '_>> {
            Ok(Box::new(&b"short"[..]))
        }
    }

    struct FailingSource;

    impl EntrySource for FailingSource {
        fn entries(&mut self) -> Result<Vec<SourceEntry>> {
            Ok(vec![SourceEntry {
                path: "broken.bin".into(),
                size: 4,
                is_dir: false,
            }])
        }

        fn open_entry(&mut self, _index: usize) -> std::io::Result<Box<dyn Read + '_>> {
            Err(std::io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn source_failures_are_source_read_errors() {
        match to_arc(&mut ShortSource, &ConvertPolicy::default()) {
            Err(ArcError::SourceRead { path, .. }) => assert_eq!(path, "lies.bin"),
            other => panic!("unexpected: {other:?}"),
        }
        match to_arc(&mut FailingSource, &ConvertPolicy::default()) {
            Err(ArcError::SourceRead { path, source }) => {
                assert_eq!(path, "broken.bin");
                assert_eq!(source.to_string(), "disk on fire");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn colliding_paths_are_rejected_before_reading() {
        let mut src = MemorySource::new([
            ("a/b.txt", b"one".to_vec()),
            ("a\\b.txt", b"two".to_vec()),
        ]);
        match to_arc(&mut src, &ConvertPolicy::default()) {
            Err(ArcError::DuplicatePath(p)) => assert_eq!(p, "a\\b.txt"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn foreign_archive_with_duplicates_fails_zip_export() {
        // hand-built: two entries both named "d", tightly packed
        let mut blob = Vec::new();
        crate::util::buf::put_i32(&mut blob, 2);
        for (off, size) in [(26, 1), (27, 1)] {
            crate::util::buf::put_i16(&mut blob, 1);
            blob.push(b'd');
            crate::util::buf::put_i32(&mut blob, off);
            crate::util::buf::put_i32(&mut blob, size);
        }
        blob.extend_from_slice(b"12");

        assert_eq!(from_arc(blob.clone()).unwrap().len(), 2);
        assert!(matches!(
            arc_to_zip_bytes(blob, &DecodePolicy::strict(), &ZipOptions::default()),
            Err(ArcError::DuplicatePath(_))
        ));
    }

    #[test]
    fn limits_are_enforced_before_reading() {
        let policy = ConvertPolicy {
            max_entries: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            to_arc(&mut scenario(), &policy),
            Err(ArcError::LimitExceeded(_))
        ));

        let policy = ConvertPolicy {
            max_total_bytes: Some(4),
            ..Default::default()
        };
        assert!(matches!(
            to_arc(&mut scenario(), &policy),
            Err(ArcError::LimitExceeded(_))
        ));
    }

    #[test]
    fn corrupt_blob_yields_nothing() {
        let mut blob = to_arc(&mut scenario(), &ConvertPolicy::default()).unwrap();
        blob.truncate(42);
        assert!(matches!(from_arc(blob), Err(ArcError::CorruptArchive(_))));
    }

    #[test]
    fn zip_round_trip_through_arc() {
        let blob = to_arc(&mut scenario(), &ConvertPolicy::default()).unwrap();
        let zip_bytes =
            arc_to_zip_bytes(blob.clone(), &DecodePolicy::strict(), &ZipOptions::default())
                .unwrap();

        let mut src = ZipSource::new(Cursor::new(zip_bytes)).unwrap();
        let names: Vec<_> = src.entries().unwrap().into_iter().map(|e| e.path).collect();
        assert_eq!(names, vec!["x.txt", "dir/y.bin"]);

        let again = to_arc(&mut src, &ConvertPolicy::default()).unwrap();
        assert_eq!(again, blob);
    }

    #[test]
    fn write_entries_counts() {
        struct Collect(Vec<(String, Vec<u8>)>);
        impl EntrySink for Collect {
            fn write_entry(&mut self, path: &str, data: &[u8]) -> Result<()> {
                self.0.push((path.to_string(), data.to_vec()));
                Ok(())
            }
        }
        let mut sink = Collect(Vec::new());
        let n = write_entries([("a", &b"1"[..]), ("b", &b""[..])], &mut sink).unwrap();
        assert_eq!(n, 2);
        assert_eq!(sink.0[0], ("a".to_string(), b"1".to_vec()));
    }
}
