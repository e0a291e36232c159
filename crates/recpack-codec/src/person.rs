//! The Person record and its fixed byte layout.
//!
//! ```text
//! ┌──────────────┬───────────┬──────────┬─────────────────┐
//! │ Schema tag   │ Age       │ Name len │ Name             │
//! │ (4B LE)      │ (4B LE)   │ (1B)     │ (Name len bytes) │
//! │ 0x85A8FDE6   │           │          │                  │
//! └──────────────┴───────────┴──────────┴─────────────────┘
//! ```

use bytes::Bytes;

/// Schema tag stamped at offset 0 of every encoded Person.
pub const SCHEMA_TAG: u32 = 2_242_444_774;

/// Width of the schema tag.
pub const TAG_SIZE: usize = 4;

/// Offset of the `age` field.
pub const AGE_OFFSET: usize = 4;

/// Offset of the 1-byte `name` length.
pub const NAME_LEN_OFFSET: usize = 8;

/// Offset of the first `name` byte.
pub const NAME_OFFSET: usize = 9;

/// Tag + age + name length.
pub const FIXED_SIZE: usize = NAME_OFFSET;

/// Largest name a 1-byte length prefix can describe.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// A Person record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    /// Age, any 32-bit unsigned value.
    pub age: u32,
    /// Name bytes, treated as text but not required to be UTF-8.
    pub name: Bytes,
}

impl Person {
    /// Create a new record.
    pub fn new(age: u32, name: impl Into<Bytes>) -> Self {
        Self {
            age,
            name: name.into(),
        }
    }

    /// The total wire size of this record (fixed header + name).
    pub fn encoded_len(&self) -> usize {
        FIXED_SIZE + self.name.len()
    }

    /// The name as UTF-8 text, if it is valid UTF-8.
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_offsets_are_contiguous() {
        assert_eq!(AGE_OFFSET, TAG_SIZE);
        assert_eq!(NAME_LEN_OFFSET, AGE_OFFSET + 4);
        assert_eq!(NAME_OFFSET, NAME_LEN_OFFSET + 1);
        assert_eq!(FIXED_SIZE, 9);
        assert_eq!(MAX_NAME_LEN, 255);
    }

    #[test]
    fn schema_tag_little_endian_bytes() {
        assert_eq!(SCHEMA_TAG.to_le_bytes(), [0xE6, 0xFD, 0xA8, 0x85]);
    }

    #[test]
    fn encoded_len_counts_name() {
        assert_eq!(Person::new(1, "").encoded_len(), 9);
        assert_eq!(Person::new(1, "Betty").encoded_len(), 14);
    }

    #[test]
    fn name_str_rejects_invalid_utf8() {
        assert_eq!(Person::new(1, "tom").name_str(), Some("tom"));
        assert_eq!(Person::new(1, vec![0xFFu8, 0xFE]).name_str(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip_through_json() {
        let person = Person::new(21, "Betty");
        let json = serde_json::to_string(&person).unwrap();
        let back: Person = serde_json::from_str(&json).unwrap();
        assert_eq!(back, person);
    }
}
