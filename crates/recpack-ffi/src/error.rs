use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

use recpack_codec::CodecError;

use crate::types::RpResult;

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

pub(crate) fn clear_error_state() {
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::default();
    });
}

pub(crate) fn set_error_message(message: impl Into<String>) {
    let message = message.into();
    let sanitized = message.replace('\0', "?");
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::new(sanitized).unwrap_or_default();
    });
}

pub(crate) fn set_invalid_argument(message: impl Into<String>) -> RpResult {
    set_error_message(message);
    RpResult::InvalidArgument
}

pub(crate) fn set_panic_error() {
    set_error_message("panic across FFI boundary");
}

pub(crate) fn map_codec_error(err: &CodecError) -> RpResult {
    set_error_message(err.to_string());
    match err {
        CodecError::SchemaMismatch { .. } => RpResult::SchemaMismatch,
        CodecError::TruncatedBuffer { .. } => RpResult::TruncatedBuffer,
        CodecError::FieldTooLarge { .. } => RpResult::FieldTooLarge,
        CodecError::TrailingBytes { .. } => RpResult::InvalidArgument,
        CodecError::Io(_) | CodecError::ConnectionClosed => RpResult::Internal,
    }
}

pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|state| state.borrow().as_ptr())
}
