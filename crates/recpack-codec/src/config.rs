use crate::person::MAX_NAME_LEN;

/// What a decoder does with bytes left over after a complete record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingBytes {
    /// Decode the record and drop whatever follows it.
    #[default]
    Ignore,
    /// Fail with `CodecError::TrailingBytes`.
    Reject,
}

/// Configuration for record decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Trailing-bytes policy for single-record decoding. Default: ignore.
    pub trailing: TrailingBytes,
    /// Largest declared name length accepted on decode. Default: 255.
    pub max_name_len: usize,
}

impl CodecConfig {
    /// Default configuration with trailing bytes rejected.
    pub fn strict() -> Self {
        Self {
            trailing: TrailingBytes::Reject,
            ..Self::default()
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            trailing: TrailingBytes::Ignore,
            max_name_len: MAX_NAME_LEN,
        }
    }
}
