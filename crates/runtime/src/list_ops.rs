//! List operations for generated code
//!
//! These functions are exported with C ABI for the transpiler's output to
//! call. Lists are passed around as opaque handles (see [`crate::handle`]).
//!
//! # Error Handling
//!
//! Index errors, type mismatches and zero slice steps are routed through
//! the runtime error channel: by default the error is recorded (check with
//! `pyc_has_error`) and a neutral value is returned (`0`, `false`, or a null
//! handle). With `PYC_ON_ERROR=exit` the process prints the diagnostic and
//! exits, like the legacy C runtime did.
//!
//! # Examples
//!
//! ```c
//! PyList *xs = pyc_new_list();
//! pyc_push_int(xs, 10);
//! pyc_push_int(xs, 20);
//! int last = pyc_get_int(xs, -1);          // 20
//! PyList *rev = pyc_slice_list(xs, 0, 2147483647, -1);
//! ```

use crate::error::{ContainerKind, report_ffi_error};
use crate::handle::{handle_ref, into_handle, length_to_c, release_handle};
use crate::list::{PyList, SharedList, extend_shared, shared_list};
use crate::pystring::SharedString;
use crate::value::FromValue;
use std::ffi::{c_int, c_short};
use std::ptr;
use std::rc::Rc;

/// Typed element access shared by the `pyc_get_*` exports
unsafe fn get_typed<T: FromValue>(op: &str, list: *const SharedList, pos: c_int) -> Option<T> {
    let list = unsafe { handle_ref(list, op) };
    match list.borrow().get_as::<T>(pos as i64) {
        Ok(v) => Some(v),
        Err(e) => report_ffi_error(op, e, None),
    }
}

/// Create an empty list
///
/// C: `PyList *pyc_new_list(void)`
#[unsafe(no_mangle)]
pub extern "C" fn pyc_new_list() -> *mut SharedList {
    into_handle(shared_list(PyList::new()))
}

/// Release a list handle
///
/// Elements and other handles keep the list alive if they still refer to it.
///
/// # Safety
/// `list` must be null or a live list handle; it must not be used afterwards
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_list_free(list: *mut SharedList) {
    unsafe { release_handle(list) }
}

/// Number of elements
///
/// # Error Handling
/// - Length above `INT_MAX`: reports the error, returns 0
///
/// # Safety
/// `list` must be a live list handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_list_length(list: *const SharedList) -> c_int {
    let list = unsafe { handle_ref(list, "list_length") };
    length_to_c("list_length", ContainerKind::List, list.borrow().len())
}

/// Append an integer
///
/// # Safety
/// `list` must be a live list handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_push_int(list: *const SharedList, value: c_int) {
    let list = unsafe { handle_ref(list, "push_int") };
    list.borrow_mut().push_int(value);
}

/// Append a boolean
///
/// Booleans travel as `short` in generated code; any non-zero value is true.
///
/// # Safety
/// `list` must be a live list handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_push_bool(list: *const SharedList, value: c_short) {
    let list = unsafe { handle_ref(list, "push_bool") };
    list.borrow_mut().push_bool(value != 0);
}

/// Append a reference to another list (not a copy)
///
/// # Safety
/// `list` and `value` must be live list handles
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_push_list(list: *const SharedList, value: *const SharedList) {
    let list = unsafe { handle_ref(list, "push_list") };
    let value = Rc::clone(unsafe { handle_ref(value, "push_list") });
    list.borrow_mut().push_list(&value);
}

/// Append a reference to a string (not a copy)
///
/// # Safety
/// `list` must be a live list handle and `value` a live string handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_push_string(list: *const SharedList, value: *const SharedString) {
    let list = unsafe { handle_ref(list, "push_string") };
    let value = unsafe { handle_ref(value, "push_string") };
    list.borrow_mut().push_string(value);
}

/// Append every element of `from` to `to`
///
/// `to` and `from` may be the same list.
///
/// # Safety
/// `to` and `from` must be live list handles
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_extend_list(to: *const SharedList, from: *const SharedList) {
    let to = unsafe { handle_ref(to, "extend_list") };
    let from = unsafe { handle_ref(from, "extend_list") };
    extend_shared(to, from);
}

/// New list: elements of `a` followed by elements of `b`
///
/// # Safety
/// `a` and `b` must be live list handles
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_concat_lists(
    a: *const SharedList,
    b: *const SharedList,
) -> *mut SharedList {
    let a = unsafe { handle_ref(a, "concat_lists") };
    let b = unsafe { handle_ref(b, "concat_lists") };
    let joined = a.borrow().concat(&b.borrow());
    into_handle(shared_list(joined))
}

/// Integer element at `pos`
///
/// # Error Handling
/// - Out of bounds: reports the error, returns 0
/// - Element is not an int: reports the error, returns 0
///
/// # Safety
/// `list` must be a live list handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_get_int(list: *const SharedList, pos: c_int) -> c_int {
    unsafe { get_typed::<i32>("get_int", list, pos) }.unwrap_or(0)
}

/// Boolean element at `pos`, as `1` or `0`
///
/// # Error Handling
/// - Out of bounds: reports the error, returns 0
/// - Element is not a bool: reports the error, returns 0
///
/// # Safety
/// `list` must be a live list handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_get_bool(list: *const SharedList, pos: c_int) -> c_short {
    unsafe { get_typed::<bool>("get_bool", list, pos) }.map_or(0, c_short::from)
}

/// New handle to the nested list at `pos`
///
/// # Error Handling
/// - Out of bounds or not a list: reports the error, returns null
///
/// # Safety
/// `list` must be a live list handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_get_list(list: *const SharedList, pos: c_int) -> *mut SharedList {
    match unsafe { get_typed::<SharedList>("get_list", list, pos) } {
        Some(nested) => into_handle(nested),
        None => ptr::null_mut(),
    }
}

/// New handle to the string at `pos`
///
/// # Error Handling
/// - Out of bounds or not a string: reports the error, returns null
///
/// # Safety
/// `list` must be a live list handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_get_string_from_list(
    list: *const SharedList,
    pos: c_int,
) -> *mut SharedString {
    match unsafe { get_typed::<SharedString>("get_string", list, pos) } {
        Some(s) => into_handle(s),
        None => ptr::null_mut(),
    }
}

/// `list[start:end:step]`
///
/// Omitted source bounds arrive as `0`, `2147483647` and `1`.
///
/// # Error Handling
/// - `step == 0`: reports the error, returns null
///
/// # Safety
/// `list` must be a live list handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_slice_list(
    list: *const SharedList,
    start: c_int,
    end: c_int,
    step: c_int,
) -> *mut SharedList {
    let list = unsafe { handle_ref(list, "slice_list") };
    let sliced = list.borrow().slice(start as i64, end as i64, step as i64);
    match sliced {
        Ok(sliced) => into_handle(shared_list(sliced)),
        Err(e) => report_ffi_error("slice_list", e, ptr::null_mut()),
    }
}
