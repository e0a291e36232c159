//! Schema-tagged positional binary codec for Person records.
//!
//! Every encoded record carries:
//! - A 4-byte little-endian schema tag identifying the record layout
//! - A 4-byte little-endian `age`
//! - A 1-byte `name` length followed by the raw `name` bytes
//!
//! Decoding validates the tag before touching the payload, and never hands
//! back a partially populated record.

pub mod codec;
pub mod config;
pub mod error;
pub mod person;
pub mod reader;
pub mod writer;

pub use codec::{
    check_schema, decode, decode_prefix, decode_record, decode_with_config, encode, encode_to,
    encode_with_offset, peek_age, peek_name,
};
pub use config::{CodecConfig, TrailingBytes};
pub use error::{CodecError, Result};
pub use person::{
    Person, AGE_OFFSET, FIXED_SIZE, MAX_NAME_LEN, NAME_LEN_OFFSET, NAME_OFFSET, SCHEMA_TAG,
    TAG_SIZE,
};
pub use reader::{RecordReader, Records};
pub use writer::RecordWriter;
