//! String operations for generated code
//!
//! These functions are exported with C ABI for the transpiler's output to
//! call. Strings are opaque handles (see [`crate::handle`]); a character is a
//! C `char`, stored and returned byte for byte.
//!
//! Every operation that produces a string (`concat`, indexing, slicing)
//! returns a handle to a brand new buffer.

use crate::error::{ContainerKind, report_ffi_error};
use crate::handle::{handle_ref, into_handle, length_to_c, release_handle};
use crate::pystring::{PyString, SharedString, shared_string};
use std::ffi::{c_char, c_int};
use std::ptr;

/// Create an empty string
///
/// C: `PyStr *pyc_new_string(void)`
#[unsafe(no_mangle)]
pub extern "C" fn pyc_new_string() -> *mut SharedString {
    into_handle(shared_string(PyString::new()))
}

/// Release a string handle
///
/// # Safety
/// `s` must be null or a live string handle; it must not be used afterwards
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_string_free(s: *mut SharedString) {
    unsafe { release_handle(s) }
}

/// Append one character
///
/// # Safety
/// `s` must be a live string handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_string_insert(s: *const SharedString, ch: c_char) {
    let s = unsafe { handle_ref(s, "string_insert") };
    s.borrow_mut().push(ch as u8);
}

/// Length in characters
///
/// # Error Handling
/// - Length above `INT_MAX`: reports the error, returns 0
///
/// # Safety
/// `s` must be a live string handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_string_length(s: *const SharedString) -> c_int {
    let s = unsafe { handle_ref(s, "string_length") };
    length_to_c("string_length", ContainerKind::String, s.borrow().len())
}

/// New string: `a` followed by `b`
///
/// # Safety
/// `a` and `b` must be live string handles
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_concat_strings(
    a: *const SharedString,
    b: *const SharedString,
) -> *mut SharedString {
    let a = unsafe { handle_ref(a, "concat_strings") };
    let b = unsafe { handle_ref(b, "concat_strings") };
    let joined = a.borrow().concat(&b.borrow());
    into_handle(shared_string(joined))
}

/// New one-character string holding `s[pos]`
///
/// # Error Handling
/// - Out of bounds: reports the error, returns null
///
/// # Safety
/// `s` must be a live string handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_get_string_from_string(
    s: *const SharedString,
    pos: c_int,
) -> *mut SharedString {
    let s = unsafe { handle_ref(s, "get_char") };
    let ch = s.borrow().char_at(pos as i64);
    match ch {
        Ok(ch) => into_handle(shared_string(ch)),
        Err(e) => report_ffi_error("get_char", e, ptr::null_mut()),
    }
}

/// `s[start:end:step]`
///
/// # Error Handling
/// - `step == 0`: reports the error, returns null
///
/// # Safety
/// `s` must be a live string handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_slice_string(
    s: *const SharedString,
    start: c_int,
    end: c_int,
    step: c_int,
) -> *mut SharedString {
    let s = unsafe { handle_ref(s, "slice_string") };
    let sliced = s.borrow().slice(start as i64, end as i64, step as i64);
    match sliced {
        Ok(sliced) => into_handle(shared_string(sliced)),
        Err(e) => report_ffi_error("slice_string", e, ptr::null_mut()),
    }
}
