//! recpack-ffi: C-ABI exports for the Person record codec.

mod error;
mod person;
mod types;

use std::panic::AssertUnwindSafe;

pub use person::{rp_buffer_free, rp_person_decode, rp_person_encode, rp_person_free};
pub use types::{
    RpBuffer, RpPerson, RpResult, RP_ERR_FIELD_TOO_LARGE, RP_ERR_INTERNAL,
    RP_ERR_INVALID_ARGUMENT, RP_ERR_SCHEMA_MISMATCH, RP_ERR_TRUNCATED_BUFFER, RP_OK,
    RP_PERSON_SCHEMA_TAG,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

#[no_mangle]
pub extern "C" fn rp_init() -> RpResult {
    ffi_boundary(RpResult::Internal, || {
        error::clear_error_state();
        RpResult::Ok
    })
}

#[no_mangle]
pub extern "C" fn rp_cleanup() {
    ffi_boundary((), || {
        error::clear_error_state();
    });
}

#[no_mangle]
pub extern "C" fn rp_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}

/// The schema tag every encoded Person starts with.
#[no_mangle]
pub extern "C" fn rp_person_schema_tag() -> u32 {
    RP_PERSON_SCHEMA_TAG
}
