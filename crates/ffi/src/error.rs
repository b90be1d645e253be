use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use wind_sim_core::WindSimError;

/// Common interface for errors that cross the FFI boundary.
///
/// - `code()` - the code returned to the caller
/// - `msg()` - the diagnostic message stored for `wind_sim_get_last_error`
pub(crate) trait WindSimFfiError {
    fn code(&self) -> WindSimErrorCode;

    fn msg(&self) -> &str;
}

/// Default [`WindSimFfiError`] carrying a code and a formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultWindSimError {
    code: WindSimErrorCode,
    msg: String,
}

impl DefaultWindSimError {
    /// Null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: WindSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Invalid parameter with a custom message.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: WindSimErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Derived metric outside its guaranteed range.
    pub fn computation(message: String) -> Self {
        Self {
            code: WindSimErrorCode::ComputationError,
            msg: message,
        }
    }
}

impl WindSimFfiError for DefaultWindSimError {
    fn code(&self) -> WindSimErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<WindSimError> for DefaultWindSimError {
    fn from(error: WindSimError) -> Self {
        match error {
            WindSimError::InvalidParameter { .. } => Self::invalid_parameter(error.to_string()),
            WindSimError::ComputationError { .. } => Self::computation(error.to_string()),
        }
    }
}

/// FFI error codes returned by wind simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Null pointer passed where non-null required.
    NullPointer = 1,

    /// A turbine or wind regime parameter failed validation.
    InvalidParameter = 2,

    /// A derived metric left its guaranteed range (e.g. capacity factor outside [0, 1]).
    ComputationError = 3,
}

impl From<DefaultWindSimError> for WindSimErrorCode {
    fn from(error: DefaultWindSimError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The `CString` is owned here so the pointer handed to C stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, WindSimErrorCode)> = const { RefCell::new((None, WindSimErrorCode::Ok)) };
}

pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, WindSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, WindSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// WindSimInstance* sim = nullptr;
/// WindSimErrorCode err = wind_sim_new(turbine, regime, &sim);
/// if (err != WindSimErrorCode::Ok) {
///     const char* error = wind_sim_get_last_error();
///     if (error) {
///         printf("Wind sim creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn wind_sim_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
///
/// Returns `WindSimErrorCode::Ok` (0) if the last call succeeded.
#[no_mangle]
pub extern "C" fn wind_sim_get_last_error_code() -> WindSimErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let invalid: DefaultWindSimError = WindSimError::not_positive("scale", 0.0).into();
        assert_eq!(invalid.code(), WindSimErrorCode::InvalidParameter);
        assert!(invalid.msg().contains("scale"));

        let computation: DefaultWindSimError =
            WindSimError::computation("capacity_factor", 1.5).into();
        assert_eq!(computation.code(), WindSimErrorCode::ComputationError);
        assert!(computation.msg().contains("capacity_factor"));
    }

    #[test]
    fn test_null_pointer_message() {
        let err = DefaultWindSimError::null_pointer("out_len");
        assert_eq!(err.code(), WindSimErrorCode::NullPointer);
        assert_eq!(err.msg(), "Parameter 'out_len' cannot be null");
    }
}
