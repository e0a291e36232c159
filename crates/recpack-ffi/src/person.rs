use std::ptr;

use recpack_codec::Person;

use crate::error;
use crate::types::{RpBuffer, RpPerson, RpResult};

/// Convert an optional byte pointer + length into a slice.
///
/// # Safety
/// If `len > 0`, `data` must be non-null and readable for `len` bytes.
unsafe fn bytes_arg<'a>(data: *const u8, len: usize, name: &str) -> Option<&'a [u8]> {
    if len == 0 {
        return Some(&[]);
    }
    if data.is_null() {
        let _ = error::set_invalid_argument(format!("{name} cannot be null when len > 0"));
        return None;
    }

    // SAFETY: Pointer and length are validated above and owned by caller for the call duration.
    Some(unsafe { std::slice::from_raw_parts(data, len) })
}

/// Move `bytes` onto the heap and hand out the raw parts. Empty input yields null.
fn into_raw_bytes(bytes: &[u8]) -> (*mut u8, usize) {
    let boxed: Box<[u8]> = bytes.to_vec().into_boxed_slice();
    let len = boxed.len();
    if len == 0 {
        return (ptr::null_mut(), 0);
    }
    (Box::into_raw(boxed) as *mut u8, len)
}

/// Free raw parts produced by [`into_raw_bytes`].
///
/// # Safety
/// `data` must be null or come from `into_raw_bytes` with the same `len`.
unsafe fn free_raw_bytes(data: *mut u8, len: usize) {
    if data.is_null() {
        return;
    }
    let slice_ptr = ptr::slice_from_raw_parts_mut(data, len);
    // SAFETY: `data` was allocated by `Box<[u8]>` in `into_raw_bytes`.
    unsafe {
        drop(Box::from_raw(slice_ptr));
    }
}

/// Encode a Person into `out`.
///
/// Any buffer already held by `out` is released first.
///
/// # Safety
/// `name` must be readable for `name_len` bytes (may be null when `name_len == 0`).
/// `out` must be null or a valid pointer to an `RpBuffer`; a non-null `out->data`
/// must have originated from this library.
#[no_mangle]
pub unsafe extern "C" fn rp_person_encode(
    age: u32,
    name: *const u8,
    name_len: usize,
    out: *mut RpBuffer,
) -> RpResult {
    crate::ffi_boundary(RpResult::Internal, || {
        if out.is_null() {
            return error::set_invalid_argument("out cannot be null");
        }
        let Some(name) = (unsafe { bytes_arg(name, name_len, "name") }) else {
            return RpResult::InvalidArgument;
        };

        let encoded = match recpack_codec::encode(&Person::new(age, name.to_vec())) {
            Ok(encoded) => encoded,
            Err(err) => return error::map_codec_error(&err),
        };

        let out_ref = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &mut *out }
        };
        // SAFETY: Existing buffers are allocated by this library.
        unsafe { free_raw_bytes(out_ref.data, out_ref.len) };

        let (data, len) = into_raw_bytes(&encoded);
        out_ref.data = data;
        out_ref.len = len;
        RpResult::Ok
    })
}

/// Decode a Person from `data` into `out`. Trailing bytes are ignored.
///
/// Any name already held by `out` is released first.
///
/// # Safety
/// `data` must be readable for `len` bytes (may be null when `len == 0`).
/// `out` must be null or a valid pointer to an `RpPerson`; a non-null `out->name`
/// must have originated from this library.
#[no_mangle]
pub unsafe extern "C" fn rp_person_decode(
    data: *const u8,
    len: usize,
    out: *mut RpPerson,
) -> RpResult {
    crate::ffi_boundary(RpResult::Internal, || {
        if out.is_null() {
            return error::set_invalid_argument("out cannot be null");
        }
        let Some(src) = (unsafe { bytes_arg(data, len, "data") }) else {
            return RpResult::InvalidArgument;
        };

        let person = match recpack_codec::decode(src) {
            Ok(person) => person,
            Err(err) => return error::map_codec_error(&err),
        };

        let out_ref = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &mut *out }
        };
        // SAFETY: Existing names are allocated by this library.
        unsafe { free_raw_bytes(out_ref.name, out_ref.name_len) };

        let (name, name_len) = into_raw_bytes(&person.name);
        out_ref.age = person.age;
        out_ref.name = name;
        out_ref.name_len = name_len;
        RpResult::Ok
    })
}

/// Free bytes held by an [`RpBuffer`] populated by `rp_person_encode`.
///
/// # Safety
/// `buffer` must be either null or a valid pointer to an `RpBuffer`.
/// If `buffer->data` is non-null, it must have originated from this library.
#[no_mangle]
pub unsafe extern "C" fn rp_buffer_free(buffer: *mut RpBuffer) {
    crate::ffi_boundary((), || {
        if buffer.is_null() {
            return;
        }
        let buffer_ref = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &mut *buffer }
        };
        // SAFETY: `data` was allocated by this library.
        unsafe { free_raw_bytes(buffer_ref.data, buffer_ref.len) };
        *buffer_ref = RpBuffer::default();
    });
}

/// Free the name held by an [`RpPerson`] populated by `rp_person_decode`.
///
/// # Safety
/// `person` must be either null or a valid pointer to an `RpPerson`.
/// If `person->name` is non-null, it must have originated from this library.
#[no_mangle]
pub unsafe extern "C" fn rp_person_free(person: *mut RpPerson) {
    crate::ffi_boundary((), || {
        if person.is_null() {
            return;
        }
        let person_ref = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &mut *person }
        };
        // SAFETY: `name` was allocated by this library.
        unsafe { free_raw_bytes(person_ref.name, person_ref.name_len) };
        *person_ref = RpPerson::default();
    });
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    fn last_error() -> String {
        // SAFETY: rp_last_error returns a pointer to a thread-local CString.
        unsafe { CStr::from_ptr(crate::rp_last_error()) }
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn encode_decode_roundtrip() {
        let name = b"Tom";
        let mut buffer = RpBuffer::default();
        let rc = unsafe { rp_person_encode(30, name.as_ptr(), name.len(), &mut buffer) };
        assert_eq!(rc, RpResult::Ok);
        assert_eq!(buffer.len, 12);

        let mut person = RpPerson::default();
        let rc = unsafe { rp_person_decode(buffer.data, buffer.len, &mut person) };
        assert_eq!(rc, RpResult::Ok);
        assert_eq!(person.age, 30);
        // SAFETY: name/name_len were populated by rp_person_decode.
        let decoded = unsafe { std::slice::from_raw_parts(person.name, person.name_len) };
        assert_eq!(decoded, b"Tom");

        unsafe {
            rp_person_free(&mut person);
            rp_buffer_free(&mut buffer);
        }
        assert!(person.name.is_null());
        assert!(buffer.data.is_null());
    }

    #[test]
    fn encode_reuses_out_buffer() {
        let mut buffer = RpBuffer::default();
        unsafe {
            assert_eq!(rp_person_encode(1, b"a".as_ptr(), 1, &mut buffer), RpResult::Ok);
            assert_eq!(rp_person_encode(2, b"bb".as_ptr(), 2, &mut buffer), RpResult::Ok);
        }
        assert_eq!(buffer.len, 11);
        unsafe { rp_buffer_free(&mut buffer) };
    }

    #[test]
    fn empty_name_decodes_to_null() {
        let mut buffer = RpBuffer::default();
        let mut person = RpPerson::default();
        unsafe {
            assert_eq!(rp_person_encode(9, ptr::null(), 0, &mut buffer), RpResult::Ok);
            assert_eq!(
                rp_person_decode(buffer.data, buffer.len, &mut person),
                RpResult::Ok
            );
        }
        assert_eq!(person.age, 9);
        assert!(person.name.is_null());
        assert_eq!(person.name_len, 0);
        unsafe { rp_buffer_free(&mut buffer) };
    }

    #[test]
    fn encode_rejects_long_name() {
        let name = vec![b'x'; 256];
        let mut buffer = RpBuffer::default();
        let rc = unsafe { rp_person_encode(1, name.as_ptr(), name.len(), &mut buffer) };
        assert_eq!(rc, RpResult::FieldTooLarge);
        assert!(buffer.data.is_null());
        assert!(last_error().contains("too large"));
    }

    #[test]
    fn decode_reports_schema_mismatch() {
        let bytes = [0u8, 0, 0, 0, 1, 0, 0, 0, 0];
        let mut person = RpPerson::default();
        let rc = unsafe { rp_person_decode(bytes.as_ptr(), bytes.len(), &mut person) };
        assert_eq!(rc, RpResult::SchemaMismatch);
        assert!(last_error().contains("schema tag mismatch"));
    }

    #[test]
    fn decode_reports_truncation() {
        let bytes = [0xE6, 0xFD, 0xA8, 0x85, 0x01];
        let mut person = RpPerson::default();
        let rc = unsafe { rp_person_decode(bytes.as_ptr(), bytes.len(), &mut person) };
        assert_eq!(rc, RpResult::TruncatedBuffer);
    }

    #[test]
    fn null_arguments_are_invalid() {
        let mut buffer = RpBuffer::default();
        unsafe {
            assert_eq!(
                rp_person_encode(1, ptr::null(), 3, &mut buffer),
                RpResult::InvalidArgument
            );
            assert_eq!(
                rp_person_encode(1, b"a".as_ptr(), 1, ptr::null_mut()),
                RpResult::InvalidArgument
            );
            assert_eq!(
                rp_person_decode(ptr::null(), 0, ptr::null_mut()),
                RpResult::InvalidArgument
            );
            rp_buffer_free(ptr::null_mut());
            rp_person_free(ptr::null_mut());
        }
    }
}
