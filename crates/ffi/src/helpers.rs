use std::ffi::CString;

use crate::error::{with_last_error_mut, DefaultWindSimError, WindSimErrorCode, WindSimFfiError};
use crate::instance::WindSimInstance;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl WindSimFfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record `error` in thread-local storage and return its code.
#[inline]
pub(crate) fn track_error(error: &impl WindSimFfiError) -> WindSimErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = WindSimErrorCode::Ok;
    });
}

/// Record the error of a failed result, or clear the last error on success.
pub(crate) fn track_result<T>(result: Result<T, DefaultWindSimError>) -> Result<T, WindSimErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run an FFI body and collapse its result into a return code.
pub(crate) fn handle_ffi_result_error<F>(body: F) -> WindSimErrorCode
where
    F: FnOnce() -> Result<(), DefaultWindSimError>,
{
    match track_result(body()) {
        Ok(()) => WindSimErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow an instance from a caller-supplied pointer.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wind_sim_new`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const WindSimInstance,
) -> Result<&'a WindSimInstance, DefaultWindSimError> {
    // SAFETY: caller guarantees `ptr` is null or points to a live instance
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultWindSimError::null_pointer("ptr"))
}
