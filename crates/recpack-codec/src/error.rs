/// Errors that can occur during record encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The buffer does not start with the Person schema tag.
    #[error("schema tag mismatch (expected {expected:#010x}, found {found:#010x})")]
    SchemaMismatch { expected: u32, found: u32 },

    /// The buffer ends before the fixed header or the declared name.
    #[error("truncated buffer ({available} bytes, need {needed})")]
    TruncatedBuffer { needed: usize, available: usize },

    /// A field does not fit its length prefix (or the configured cap).
    #[error("field `{field}` too large ({size} bytes, max {max})")]
    FieldTooLarge {
        field: &'static str,
        size: usize,
        max: usize,
    },

    /// Bytes remain after the record and the decoder was asked to reject them.
    #[error("trailing bytes after record ({actual} bytes, record is {expected})")]
    TrailingBytes { expected: usize, actual: usize },

    /// An I/O error occurred while reading or writing records.
    #[error("record I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete record was received.
    #[error("connection closed (incomplete record)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, CodecError>;
