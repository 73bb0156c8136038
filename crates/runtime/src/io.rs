//! Print operations for generated code
//!
//! These functions are exported with C ABI for the transpiler's output to
//! call. Each one implements `print(x)` for one static type: the rendering
//! of `x` followed by a newline on stdout. See [`crate::print`] for the
//! format.
//!
//! A failed write to stdout is recorded in the runtime error channel.

use crate::error::set_runtime_error;
use crate::handle::handle_ref;
use crate::list::SharedList;
use crate::print::{Render, print};
use crate::pystring::SharedString;
use std::ffi::{c_int, c_short};

fn print_or_record<T: Render + ?Sized>(op: &str, value: &T) {
    if let Err(e) = print(value) {
        set_runtime_error(format!("{}: {}", op, e));
    }
}

/// `print(int)`
#[unsafe(no_mangle)]
pub extern "C" fn pyc_print_int(value: c_int) {
    print_or_record("print_int", &value);
}

/// `print(bool)`; any non-zero value prints `True`
#[unsafe(no_mangle)]
pub extern "C" fn pyc_print_bool(value: c_short) {
    print_or_record("print_bool", &(value != 0));
}

/// `print(list)`
///
/// # Safety
/// `list` must be a live list handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_print_list(list: *const SharedList) {
    let list = unsafe { handle_ref(list, "print_list") };
    print_or_record("print_list", list);
}

/// `print(str)`
///
/// # Safety
/// `s` must be a live string handle
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pyc_print_string(s: *const SharedString) {
    let s = unsafe { handle_ref(s, "print_string") };
    print_or_record("print_string", s);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{clear_runtime_error, has_runtime_error};
    use crate::list_ops::{pyc_list_free, pyc_new_list, pyc_push_int};
    use crate::string_ops::{pyc_new_string, pyc_string_free};

    #[test]
    fn test_print_exports_do_not_record_errors() {
        clear_runtime_error();
        let list = pyc_new_list();
        let s = pyc_new_string();
        unsafe {
            pyc_push_int(list, 1);
            pyc_print_int(42);
            pyc_print_bool(0);
            pyc_print_list(list);
            pyc_print_string(s);
            pyc_list_free(list);
            pyc_string_free(s);
        }
        assert!(!has_runtime_error());
    }
}
