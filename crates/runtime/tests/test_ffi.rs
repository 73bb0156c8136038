//! End-to-end use of the C ABI, the way transpiled programs drive it
//!
//! Handles are `*mut Rc<RefCell<_>>`, so the tests peek at contents by
//! dereferencing them and rendering through the Rust API.

use pyc_runtime::{
    SharedList, SharedString, clear_error, concat_lists, concat_strings, extend_list, get_bool,
    get_int, get_list, get_string_from_list, get_string_from_string, has_error, list_free,
    list_length, new_list, new_string, push_bool, push_int, push_list, push_string,
    render_to_bytes, runtime_init, slice_list, slice_string, string_free, string_insert,
    string_length, take_error,
};
use std::ffi::{CStr, c_char};

const OMITTED_END: i32 = i32::MAX;

unsafe fn rendered_list(list: *const SharedList) -> Vec<u8> {
    render_to_bytes(unsafe { &*list })
}

unsafe fn rendered_string(s: *const SharedString) -> Vec<u8> {
    render_to_bytes(unsafe { &*s })
}

fn string_from(text: &str) -> *mut SharedString {
    let s = new_string();
    for b in text.bytes() {
        unsafe { string_insert(s, b as c_char) };
    }
    s
}

fn pending_error() -> Option<String> {
    let ptr = take_error();
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

#[test]
fn test_build_and_render_mixed_list() {
    runtime_init();
    unsafe {
        // x = [1, True, "ab", [2]]
        let inner = new_list();
        push_int(inner, 2);
        let s = string_from("ab");

        let x = new_list();
        push_int(x, 1);
        push_bool(x, 1);
        push_string(x, s);
        push_list(x, inner);

        assert_eq!(list_length(x), 4);
        assert_eq!(rendered_list(x), b"[1, True, ab, [2]]");

        list_free(inner);
        string_free(s);
        // x still owns the nested payloads
        assert_eq!(rendered_list(x), b"[1, True, ab, [2]]");
        list_free(x);
    }
}

#[test]
fn test_typed_reads() {
    clear_error();
    unsafe {
        let inner = new_list();
        let s = string_from("hi");
        let x = new_list();
        push_int(x, 7);
        push_bool(x, 0);
        push_string(x, s);
        push_list(x, inner);

        assert_eq!(get_int(x, 0), 7);
        assert_eq!(get_bool(x, 1), 0);
        assert_eq!(get_int(x, -4), 7);

        let got = get_string_from_list(x, -2);
        assert_eq!(rendered_string(got), b"hi");
        let nested = get_list(x, 3);
        assert_eq!(list_length(nested), 0);
        assert!(!has_error());

        string_free(got);
        list_free(nested);
        string_free(s);
        list_free(inner);
        list_free(x);
    }
}

#[test]
fn test_errors_are_reported_not_fatal() {
    clear_error();
    unsafe {
        let x = new_list();
        push_int(x, 1);
        push_int(x, 2);
        push_int(x, 3);

        assert_eq!(get_int(x, 3), 0);
        assert!(has_error());
        assert_eq!(
            pending_error().as_deref(),
            Some("get_int: Index 3 is out of bounds for list")
        );
        assert!(!has_error());

        assert_eq!(get_bool(x, 0), 0);
        assert_eq!(
            pending_error().as_deref(),
            Some("get_bool: List element 0 is not of type bool")
        );

        assert!(get_string_from_list(x, 1).is_null());
        assert!(pending_error().is_some());

        assert!(slice_list(x, 0, 3, 0).is_null());
        assert_eq!(
            pending_error().as_deref(),
            Some("slice_list: slice step cannot be zero")
        );

        // The list is untouched by the failures
        assert_eq!(rendered_list(x), b"[1, 2, 3]");
        list_free(x);
    }
    assert!(pending_error().is_none());
}

#[test]
fn test_list_slicing_with_omitted_bounds() {
    unsafe {
        let x = new_list();
        for v in [10, 20, 30, 40, 50] {
            push_int(x, v);
        }

        // x[::-1]
        let rev = slice_list(x, 0, OMITTED_END, -1);
        assert_eq!(rendered_list(rev), b"[50, 40, 30, 20, 10]");

        // x[::2]
        let evens = slice_list(x, 0, OMITTED_END, 2);
        assert_eq!(rendered_list(evens), b"[10, 30, 50]");

        // x[-2:5] starts from the front
        let clamped = slice_list(x, -2, 5, 1);
        assert_eq!(rendered_list(clamped), b"[10, 20, 30, 40, 50]");

        // x[1:-1]
        let middle = slice_list(x, 1, -1, 1);
        assert_eq!(rendered_list(middle), b"[20, 30, 40]");

        for handle in [rev, evens, clamped, middle, x] {
            list_free(handle);
        }
    }
}

#[test]
fn test_concat_and_extend() {
    unsafe {
        let a = new_list();
        push_int(a, 1);
        let b = new_list();
        push_bool(b, 1);

        let c = concat_lists(a, b);
        assert_eq!(rendered_list(c), b"[1, True]");

        extend_list(a, b);
        extend_list(a, a);
        assert_eq!(rendered_list(a), b"[1, True, 1, True]");
        assert_eq!(rendered_list(b), b"[True]");

        list_free(a);
        list_free(b);
        list_free(c);
    }
}

#[test]
fn test_nested_mutation_visible_through_container() {
    unsafe {
        let inner = new_list();
        let s = new_string();
        let x = new_list();
        push_list(x, inner);
        push_string(x, s);

        push_int(inner, 5);
        string_insert(s, b'q' as c_char);

        assert_eq!(rendered_list(x), b"[[5], q]");

        list_free(inner);
        string_free(s);
        list_free(x);
    }
}

#[test]
fn test_string_operations() {
    clear_error();
    unsafe {
        let hello = string_from("hello");
        let world = string_from(" world");

        let joined = concat_strings(hello, world);
        assert_eq!(string_length(joined), 11);
        assert_eq!(rendered_string(joined), b"hello world");
        assert_eq!(rendered_string(hello), b"hello");

        let first = get_string_from_string(joined, 0);
        let last = get_string_from_string(joined, -1);
        assert_eq!(rendered_string(first), b"h");
        assert_eq!(rendered_string(last), b"d");

        let rev = slice_string(hello, 0, OMITTED_END, -1);
        assert_eq!(rendered_string(rev), b"olleh");

        assert!(get_string_from_string(hello, -6).is_null());
        assert_eq!(
            pending_error().as_deref(),
            Some("get_char: Index -1 is out of bounds for string")
        );

        for handle in [hello, world, joined, first, last, rev] {
            string_free(handle);
        }
    }
}

#[test]
fn test_free_null_is_noop() {
    unsafe {
        list_free(std::ptr::null_mut());
        string_free(std::ptr::null_mut());
    }
}
