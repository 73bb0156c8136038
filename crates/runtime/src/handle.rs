//! Opaque container handles for the C ABI
//!
//! Generated code sees a list or string as a pointer to a boxed
//! `Rc<RefCell<_>>`. Every handle returned by an export owns one strong
//! reference, so a container stays alive as long as any handle or any list
//! element refers to it. `pyc_list_free` / `pyc_string_free` release a handle.

use crate::error::{ContainerKind, RuntimeError, report_ffi_error};
use std::cell::RefCell;
use std::ffi::c_int;
use std::rc::Rc;

/// Move a shared container into a new C handle
pub(crate) fn into_handle<T>(shared: Rc<RefCell<T>>) -> *mut Rc<RefCell<T>> {
    Box::into_raw(Box::new(shared))
}

/// Borrow the shared container behind a handle
///
/// # Safety
/// `ptr` must be null or a live handle produced by [`into_handle`].
pub(crate) unsafe fn handle_ref<'a, T>(ptr: *const Rc<RefCell<T>>, op: &str) -> &'a Rc<RefCell<T>> {
    if ptr.is_null() {
        panic!("{}: null handle", op);
    }
    unsafe { &*ptr }
}

/// Release a handle; the container is dropped once nothing else refers to it
///
/// # Safety
/// `ptr` must be null or a live handle produced by [`into_handle`], and must
/// not be used again afterwards.
pub(crate) unsafe fn release_handle<T>(ptr: *mut Rc<RefCell<T>>) {
    if !ptr.is_null() {
        drop(unsafe { Box::from_raw(ptr) });
    }
}

/// Container length as the C `int` the ABI returns
///
/// Lengths beyond `INT_MAX` are reported and come back as 0.
pub(crate) fn length_to_c(op: &str, container: ContainerKind, length: usize) -> c_int {
    match c_int::try_from(length) {
        Ok(n) => n,
        Err(_) => report_ffi_error(op, RuntimeError::LengthOverflow { container, length }, 0),
    }
}
