use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("path too long ({len} bytes, max {max}): {path}")]
    PathTooLong { path: String, len: usize, max: usize },

    #[error("truncated header: {what} needs {need} bytes at offset {at}, buffer has {len}")]
    TruncatedHeader {
        what: &'static str,
        at: usize,
        need: usize,
        len: usize,
    },

    #[error("entry {index}: path is not valid UTF-8: {source}")]
    InvalidEncoding {
        index: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("duplicate entry path: {0}")]
    DuplicatePath(String),

    #[error("corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("failed to read source entry {path}: {source}")]
    SourceRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("archive too large for 32-bit ARC fields: {0}")]
    ArchiveTooLarge(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unsafe path: {0}")]
    UnsafePath(String),

    #[error("no such entry: {0}")]
    NotFound(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, ArcError>;
