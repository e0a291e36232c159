use recpack_codec::SCHEMA_TAG;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpResult {
    Ok = 0,
    InvalidArgument = 1,
    SchemaMismatch = 2,
    TruncatedBuffer = 3,
    FieldTooLarge = 4,
    Internal = 99,
}

#[allow(dead_code)]
pub const RP_OK: RpResult = RpResult::Ok;
#[allow(dead_code)]
pub const RP_ERR_INVALID_ARGUMENT: RpResult = RpResult::InvalidArgument;
#[allow(dead_code)]
pub const RP_ERR_SCHEMA_MISMATCH: RpResult = RpResult::SchemaMismatch;
#[allow(dead_code)]
pub const RP_ERR_TRUNCATED_BUFFER: RpResult = RpResult::TruncatedBuffer;
#[allow(dead_code)]
pub const RP_ERR_FIELD_TOO_LARGE: RpResult = RpResult::FieldTooLarge;
#[allow(dead_code)]
pub const RP_ERR_INTERNAL: RpResult = RpResult::Internal;

#[allow(dead_code)]
pub const RP_PERSON_SCHEMA_TAG: u32 = SCHEMA_TAG;

/// Encoded bytes owned by this library. Release with `rp_buffer_free`.
#[repr(C)]
#[derive(Debug)]
pub struct RpBuffer {
    pub data: *mut u8,
    pub len: usize,
}

impl Default for RpBuffer {
    fn default() -> Self {
        Self {
            data: std::ptr::null_mut(),
            len: 0,
        }
    }
}

/// A decoded Person. `name` is owned by this library; release with `rp_person_free`.
#[repr(C)]
#[derive(Debug)]
pub struct RpPerson {
    pub age: u32,
    pub name: *mut u8,
    pub name_len: usize,
}

impl Default for RpPerson {
    fn default() -> Self {
        Self {
            age: 0,
            name: std::ptr::null_mut(),
            name_len: 0,
        }
    }
}
