use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::config::{CodecConfig, TrailingBytes};
use crate::error::{CodecError, Result};
use crate::person::{
    Person, AGE_OFFSET, FIXED_SIZE, MAX_NAME_LEN, NAME_LEN_OFFSET, NAME_OFFSET, SCHEMA_TAG,
    TAG_SIZE,
};

/// Encode a record into a freshly allocated buffer.
///
/// Wire format:
/// ```text
/// ┌──────────────┬───────────┬──────────┬─────────────────┐
/// │ Schema tag   │ Age       │ Name len │ Name             │
/// │ (4B LE)      │ (4B LE)   │ (1B)     │ (Name len bytes) │
/// └──────────────┴───────────┴──────────┴─────────────────┘
/// ```
///
/// The output is always `9 + name.len()` bytes.
pub fn encode(person: &Person) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(person.encoded_len());
    encode_to(person, &mut dst)?;
    Ok(dst.freeze())
}

/// Append an encoded record to `dst`, keeping whatever `dst` already holds.
///
/// `dst` is left untouched when the record cannot be encoded.
pub fn encode_to(person: &Person, dst: &mut BytesMut) -> Result<()> {
    if person.name.len() > MAX_NAME_LEN {
        return Err(CodecError::FieldTooLarge {
            field: "name",
            size: person.name.len(),
            max: MAX_NAME_LEN,
        });
    }
    dst.reserve(person.encoded_len());
    dst.put_u32_le(SCHEMA_TAG);
    dst.put_u32_le(person.age);
    dst.put_u8(person.name.len() as u8);
    dst.put_slice(&person.name);
    tracing::trace!(age = person.age, len = person.encoded_len(), "encoded person");
    Ok(())
}

/// Encode a record after `offset` zero bytes reserved for a caller header.
pub fn encode_with_offset(offset: usize, person: &Person) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(offset + person.encoded_len());
    dst.put_bytes(0, offset);
    encode_to(person, &mut dst)?;
    Ok(dst.freeze())
}

/// Verify that `src` starts with the Person schema tag.
pub fn check_schema(src: &[u8]) -> Result<()> {
    let found = read_tag(src)?;
    if found != SCHEMA_TAG {
        return Err(CodecError::SchemaMismatch {
            expected: SCHEMA_TAG,
            found,
        });
    }
    Ok(())
}

/// Decode a record from the start of `src`.
///
/// Bytes after the record are ignored. Use [`decode_with_config`] to reject
/// them or [`decode_prefix`] to get them back.
pub fn decode(src: &[u8]) -> Result<Person> {
    decode_with_config(src, &CodecConfig::default())
}

/// Decode a record from the start of `src` under an explicit configuration.
pub fn decode_with_config(src: &[u8], config: &CodecConfig) -> Result<Person> {
    let (person, rest) = decode_prefix_with(src, config)?;
    if config.trailing == TrailingBytes::Reject && !rest.is_empty() {
        return Err(CodecError::TrailingBytes {
            expected: person.encoded_len(),
            actual: src.len(),
        });
    }
    Ok(person)
}

/// Decode a record from the start of `src` and return the unconsumed bytes.
pub fn decode_prefix(src: &[u8]) -> Result<(Person, &[u8])> {
    decode_prefix_with(src, &CodecConfig::default())
}

fn decode_prefix_with<'a>(src: &'a [u8], config: &CodecConfig) -> Result<(Person, &'a [u8])> {
    let header = read_header(src, config.max_name_len)?;
    let end = NAME_OFFSET + header.name_len;
    let person = Person {
        age: header.age,
        name: Bytes::copy_from_slice(&src[NAME_OFFSET..end]),
    };
    tracing::trace!(age = person.age, len = end, "decoded person");
    Ok((person, &src[end..]))
}

/// Decode a record from a streaming buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete record yet.
/// A wrong schema tag fails as soon as the first 4 bytes are present.
/// On success, consumes the record bytes from the buffer.
pub fn decode_record(src: &mut BytesMut, config: &CodecConfig) -> Result<Option<Person>> {
    if src.len() < TAG_SIZE {
        return Ok(None); // Need more data
    }
    check_schema(src)?;

    if src.len() < FIXED_SIZE {
        return Ok(None); // Need more data
    }

    let name_len = src[NAME_LEN_OFFSET] as usize;
    check_name_len(name_len, config.max_name_len)?;

    if src.len() < FIXED_SIZE + name_len {
        return Ok(None); // Need more data
    }

    src.advance(AGE_OFFSET);
    let age = src.get_u32_le();
    src.advance(1);
    let name = src.split_to(name_len).freeze();

    Ok(Some(Person { age, name }))
}

/// Read only the `age` field, after the usual tag and bounds checks.
pub fn peek_age(src: &[u8]) -> Result<u32> {
    Ok(read_header(src, MAX_NAME_LEN)?.age)
}

/// Borrow only the `name` bytes, after the usual tag and bounds checks.
pub fn peek_name(src: &[u8]) -> Result<&[u8]> {
    let header = read_header(src, MAX_NAME_LEN)?;
    Ok(&src[NAME_OFFSET..NAME_OFFSET + header.name_len])
}

struct Header {
    age: u32,
    name_len: usize,
}

fn read_tag(src: &[u8]) -> Result<u32> {
    let bytes: [u8; TAG_SIZE] = src
        .get(..TAG_SIZE)
        .and_then(|tag| tag.try_into().ok())
        .ok_or(CodecError::TruncatedBuffer {
            needed: TAG_SIZE,
            available: src.len(),
        })?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_header(src: &[u8], max_name_len: usize) -> Result<Header> {
    check_schema(src)?;

    if src.len() < FIXED_SIZE {
        return Err(CodecError::TruncatedBuffer {
            needed: FIXED_SIZE,
            available: src.len(),
        });
    }

    let mut fixed = &src[AGE_OFFSET..FIXED_SIZE];
    let age = fixed.get_u32_le();
    let name_len = fixed.get_u8() as usize;
    check_name_len(name_len, max_name_len)?;

    let needed = FIXED_SIZE + name_len;
    if src.len() < needed {
        return Err(CodecError::TruncatedBuffer {
            needed,
            available: src.len(),
        });
    }

    Ok(Header { age, name_len })
}

fn check_name_len(name_len: usize, max_name_len: usize) -> Result<()> {
    if name_len > max_name_len {
        return Err(CodecError::FieldTooLarge {
            field: "name",
            size: name_len,
            max: max_name_len,
        });
    }
    Ok(())
}
