//! Schema-tagged binary Person records.
//!
//! recpack encodes a Person (`age` + `name`) into a fixed positional layout
//! stamped with a schema tag, and decodes it back after checking that tag.
//!
//! # Crate Structure
//!
//! - [`codec`] — The record codec: encode/decode, streaming reader/writer
//!
//! The `recpack` binary (behind the `cli` feature) wraps the codec for
//! encoding, decoding, and inspecting record files from the shell.

/// Re-export codec types.
pub mod codec {
    pub use recpack_codec::*;
}
