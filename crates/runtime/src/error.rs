//! Runtime Error Handling
//!
//! Every Rust-level operation returns `Result<_, RuntimeError>`. The C ABI
//! exports cannot, so they park the error in a thread-local slot that
//! generated code can poll:
//!
//! ```ignore
//! let item = pyc_get_int(list, 7);
//! if pyc_has_error() {
//!     let msg = pyc_take_error();
//!     // Handle error...
//! }
//! ```
//!
//! When `PYC_ON_ERROR=exit` is set, exports instead print the diagnostic the
//! legacy C runtime printed and terminate the process.

use crate::config::{ErrorAction, runtime_config};
use crate::value::ValueKind;
use std::cell::RefCell;
use std::ffi::CString;
use std::fmt;
use std::io::Write;
use std::ptr;

/// Which container an index was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    List,
    String,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::List => write!(f, "list"),
            ContainerKind::String => write!(f, "string"),
        }
    }
}

/// Failure of a single container operation
///
/// None of these leave the container they were raised on modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Single-element access outside `[0, length)` after normalization.
    /// `index` is the normalized position.
    IndexOutOfRange {
        container: ContainerKind,
        index: i64,
        length: usize,
    },
    /// Typed accessor used on an element holding a different kind
    TypeMismatch {
        index: i64,
        expected: ValueKind,
        found: ValueKind,
    },
    /// Slice step of zero
    InvalidStep,
    /// Container length does not fit the C `int` the ABI returns
    LengthOverflow {
        container: ContainerKind,
        length: usize,
    },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::IndexOutOfRange {
                container, index, ..
            } => write!(f, "Index {} is out of bounds for {}", index, container),
            RuntimeError::TypeMismatch {
                index, expected, ..
            } => write!(f, "List element {} is not of type {}", index, expected),
            RuntimeError::InvalidStep => write!(f, "slice step cannot be zero"),
            RuntimeError::LengthOverflow { container, length } => {
                write!(f, "{} length {} does not fit in a C int", container, length)
            }
        }
    }
}

/// Where the legacy C runtime wrote a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiagnosticStream {
    Stdout,
    Stderr,
}

impl RuntimeError {
    /// Diagnostic as the legacy C runtime printed it before exiting
    ///
    /// Index errors went to stdout with a newline; type errors went to
    /// stderr without one, using the C type names (`short`, `string`).
    fn legacy_diagnostic(&self) -> (DiagnosticStream, String) {
        match self {
            RuntimeError::IndexOutOfRange { .. } => {
                (DiagnosticStream::Stdout, format!("{}\n", self))
            }
            RuntimeError::TypeMismatch {
                index, expected, ..
            } => (
                DiagnosticStream::Stderr,
                format!(
                    "List element {} is not of type {}",
                    index,
                    expected.legacy_name()
                ),
            ),
            _ => (DiagnosticStream::Stderr, format!("{}\n", self)),
        }
    }
}

impl std::error::Error for RuntimeError {}

thread_local! {
    /// Thread-local storage for the last runtime error message
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };

    /// Cached C string for FFI access (keeps the returned pointer alive)
    static ERROR_CSTRING: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last runtime error message
pub fn set_runtime_error(msg: impl Into<String>) {
    ERROR_CSTRING.with(|cs| *cs.borrow_mut() = None);
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some(msg.into());
    });
}

/// Take (and clear) the last runtime error message
pub fn take_runtime_error() -> Option<String> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

/// Check if there's a pending runtime error
pub fn has_runtime_error() -> bool {
    LAST_ERROR.with(|e| e.borrow().is_some())
}

/// Clear any pending runtime error
pub fn clear_runtime_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
    ERROR_CSTRING.with(|e| *e.borrow_mut() = None);
}

/// Route an error raised inside a C ABI export
///
/// Returns `fallback` after recording the error, unless the runtime is
/// configured to exit on errors.
pub(crate) fn report_ffi_error<T>(op: &str, err: RuntimeError, fallback: T) -> T {
    match runtime_config().on_error {
        ErrorAction::Exit => exit_with_diagnostic(&err),
        ErrorAction::Report => {
            tracing::warn!(op, error = %err, "runtime error reported to caller");
            set_runtime_error(format!("{}: {}", op, err));
            fallback
        }
    }
}

fn exit_with_diagnostic(err: &RuntimeError) -> ! {
    match err.legacy_diagnostic() {
        (DiagnosticStream::Stdout, text) => {
            print!("{}", text);
            let _ = std::io::stdout().flush();
        }
        (DiagnosticStream::Stderr, text) => eprint!("{}", text),
    }
    std::process::exit(1)
}

fn to_cstring(msg: String) -> CString {
    // Replace null bytes with '?' to preserve error content
    let safe: Vec<u8> = msg
        .into_bytes()
        .into_iter()
        .map(|b| if b == 0 { b'?' } else { b })
        .collect();
    CString::new(safe).unwrap_or_default()
}

// FFI-safe error access functions

/// Check if there's a pending runtime error (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn pyc_has_error() -> bool {
    has_runtime_error()
}

/// Take (and clear) the last error, returning it as a C string (FFI-safe)
///
/// Returns null if no error is pending.
///
/// # WARNING: Pointer Lifetime
/// The returned pointer is only valid until the next call to
/// `set_runtime_error`, `take_error`, or `clear_error` on this thread.
#[unsafe(no_mangle)]
pub extern "C" fn pyc_take_error() -> *const std::ffi::c_char {
    match take_runtime_error() {
        Some(msg) => ERROR_CSTRING.with(|cs| {
            let cstring = to_cstring(msg);
            let ptr = cstring.as_ptr();
            *cs.borrow_mut() = Some(cstring);
            ptr
        }),
        None => ptr::null(),
    }
}

/// Clear any pending error (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn pyc_clear_error() {
    clear_runtime_error();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_set_and_take_error() {
        clear_runtime_error();
        assert!(!has_runtime_error());

        set_runtime_error("test error");
        assert!(has_runtime_error());

        let error = take_runtime_error();
        assert_eq!(error, Some("test error".to_string()));
        assert!(!has_runtime_error());
    }

    #[test]
    fn test_clear_error() {
        set_runtime_error("another error");
        assert!(has_runtime_error());

        clear_runtime_error();
        assert!(!has_runtime_error());
        assert!(take_runtime_error().is_none());
    }

    #[test]
    fn test_index_error_message_wording() {
        let err = RuntimeError::IndexOutOfRange {
            container: ContainerKind::List,
            index: -1,
            length: 3,
        };
        assert_eq!(err.to_string(), "Index -1 is out of bounds for list");

        let err = RuntimeError::IndexOutOfRange {
            container: ContainerKind::String,
            index: 5,
            length: 2,
        };
        assert_eq!(err.to_string(), "Index 5 is out of bounds for string");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = RuntimeError::TypeMismatch {
            index: 2,
            expected: ValueKind::Int,
            found: ValueKind::String,
        };
        assert_eq!(err.to_string(), "List element 2 is not of type int");
    }

    #[test]
    fn test_exit_diagnostics_use_legacy_text() {
        let index = RuntimeError::IndexOutOfRange {
            container: ContainerKind::String,
            index: -1,
            length: 3,
        };
        assert_eq!(
            index.legacy_diagnostic(),
            (
                DiagnosticStream::Stdout,
                "Index -1 is out of bounds for string\n".to_string()
            )
        );

        let bool_mismatch = RuntimeError::TypeMismatch {
            index: 4,
            expected: ValueKind::Bool,
            found: ValueKind::Int,
        };
        assert_eq!(
            bool_mismatch.legacy_diagnostic(),
            (
                DiagnosticStream::Stderr,
                "List element 4 is not of type short".to_string()
            )
        );

        let str_mismatch = RuntimeError::TypeMismatch {
            index: -2,
            expected: ValueKind::String,
            found: ValueKind::List,
        };
        assert_eq!(
            str_mismatch.legacy_diagnostic().1,
            "List element -2 is not of type string"
        );
    }

    #[test]
    fn test_length_overflow_message() {
        let err = RuntimeError::LengthOverflow {
            container: ContainerKind::List,
            length: 1 << 31,
        };
        assert_eq!(
            err.to_string(),
            "list length 2147483648 does not fit in a C int"
        );
    }

    #[test]
    fn test_take_error_ffi() {
        clear_runtime_error();
        assert!(pyc_take_error().is_null());

        set_runtime_error("bad\0index");
        assert!(pyc_has_error());
        let ptr = pyc_take_error();
        assert!(!ptr.is_null());
        let msg = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap();
        assert_eq!(msg, "bad?index");
        assert!(!pyc_has_error());
    }

    #[test]
    fn test_report_ffi_error_records_message() {
        clear_runtime_error();
        let value = report_ffi_error("slice_list", RuntimeError::InvalidStep, 0);
        assert_eq!(value, 0);
        assert_eq!(
            take_runtime_error(),
            Some("slice_list: slice step cannot be zero".to_string())
        );
    }
}
