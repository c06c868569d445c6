use serde::Serialize;

/// One listing row.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EntryRow {
    pub index: usize,
    pub path: String,
    pub offset: i32,
    pub size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blake3: Option<String>,
}

/// Outcome of building an ARC file.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PackSummary {
    pub entries: usize,
    pub header_len: usize,
    pub bytes: usize,
}

/// Outcome of a strict archive check.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VerifyReport {
    pub entries: usize,
    pub header_len: usize,
    pub payload_bytes: u64,
    pub archive_bytes: usize,
    pub blake3: String,
}
