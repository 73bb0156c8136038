//! pyc runtime: Python-style lists and strings for transpiled code
//!
//! Key design principles:
//! - PyString: growable byte string, copied on concatenation and slicing
//! - Value: tagged element (int, bool, shared list, shared string)
//! - PyList: singly-linked list of Values; nested lists and strings are shared
//! - slicing: one indexing/slicing algorithm for both containers
//!
//! Rust callers use the types directly and get `Result`s back. Generated C
//! code links the `pyc_*` exports and polls the error channel.

pub mod config;
pub mod error;
pub mod handle;
pub mod io;
pub mod list;
pub mod list_ops;
pub mod logging;
pub mod print;
pub mod pystring;
pub mod serialize;
pub mod slicing;
pub mod string_ops;
pub mod value;

// Re-export key types and functions
pub use error::{ContainerKind, RuntimeError};
pub use list::{PyList, SharedList, extend_shared, shared_list};
pub use print::{Render, print, render_to_bytes};
pub use pystring::{PyString, SharedString, shared_string};
pub use slicing::{DEFAULT_SLICE_END, Sequence, SliceBounds};
pub use value::{FromValue, Value, ValueKind};

// Serialization types (for snapshots/exchange with external systems)
pub use serialize::{SerializeError, TypedValue, ValueSerialize};

// Configuration
pub use config::{ErrorAction, RuntimeConfig, runtime_config};

// List operations (exported for linking with generated code)
pub use list_ops::{
    pyc_concat_lists as concat_lists, pyc_extend_list as extend_list, pyc_get_bool as get_bool,
    pyc_get_int as get_int, pyc_get_list as get_list,
    pyc_get_string_from_list as get_string_from_list, pyc_list_free as list_free,
    pyc_list_length as list_length, pyc_new_list as new_list, pyc_push_bool as push_bool,
    pyc_push_int as push_int, pyc_push_list as push_list, pyc_push_string as push_string,
    pyc_slice_list as slice_list,
};

// String operations (exported for linking with generated code)
pub use string_ops::{
    pyc_concat_strings as concat_strings, pyc_get_string_from_string as get_string_from_string,
    pyc_new_string as new_string, pyc_slice_string as slice_string,
    pyc_string_free as string_free, pyc_string_insert as string_insert,
    pyc_string_length as string_length,
};

// Print operations (exported for linking with generated code)
pub use io::{
    pyc_print_bool as print_bool, pyc_print_int as print_int, pyc_print_list as print_list,
    pyc_print_string as print_string,
};

// Error channel and startup (exported for linking with generated code)
pub use error::{pyc_clear_error as clear_error, pyc_has_error as has_error, pyc_take_error as take_error};
pub use logging::pyc_runtime_init as runtime_init;
