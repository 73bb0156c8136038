//! PyString - growable string buffer
//!
//! A character is one byte, exactly as the legacy C runtime stored it.
//! Indexing, slicing and rendering all work byte for byte, so output of a
//! generated program matches the legacy output even for non-ASCII text.
//!
//! Buffers are values: `concat`, `slice` and `char_at` always return a new,
//! independent buffer. Sharing happens only through [`SharedString`] handles
//! stored in lists.

use crate::error::{ContainerKind, RuntimeError};
use crate::slicing::{self, Sequence, SliceBounds};
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Reference-counted handle to a string stored in (possibly several) lists
pub type SharedString = Rc<RefCell<PyString>>;

/// Wrap a buffer into a shareable handle
pub fn shared_string(s: PyString) -> SharedString {
    Rc::new(RefCell::new(s))
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct PyString {
    data: Vec<u8>,
}

impl PyString {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Length in characters (bytes)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Text view; invalid UTF-8 sequences become U+FFFD
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Append one character
    pub fn push(&mut self, ch: u8) {
        self.data.push(ch);
    }

    /// Append every byte of `s`
    pub fn push_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// New buffer holding `self` followed by `other`
    pub fn concat(&self, other: &PyString) -> PyString {
        let mut data = Vec::with_capacity(self.len() + other.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        PyString { data }
    }

    /// One-character buffer at `pos` (negative counts from the end)
    pub fn char_at(&self, pos: i64) -> Result<PyString, RuntimeError> {
        let ch = self.item(pos)?;
        Ok(PyString { data: vec![ch] })
    }

    /// Python-style slice, see [`crate::slicing`] for the bound rules
    pub fn slice(&self, start: i64, end: i64, step: i64) -> Result<PyString, RuntimeError> {
        slicing::slice(self, start, end, step)
    }

    pub fn slice_with(&self, bounds: SliceBounds) -> Result<PyString, RuntimeError> {
        slicing::slice_with(self, bounds)
    }
}

impl Sequence for PyString {
    type Item = u8;

    const CONTAINER: ContainerKind = ContainerKind::String;

    fn seq_len(&self) -> usize {
        self.data.len()
    }

    fn item_at(&self, pos: usize) -> u8 {
        self.data[pos]
    }

    fn from_items(items: Vec<u8>) -> Self {
        PyString { data: items }
    }
}

impl From<&str> for PyString {
    fn from(s: &str) -> Self {
        PyString {
            data: s.as_bytes().to_vec(),
        }
    }
}

impl From<String> for PyString {
    fn from(s: String) -> Self {
        PyString {
            data: s.into_bytes(),
        }
    }
}

impl From<&[u8]> for PyString {
    fn from(bytes: &[u8]) -> Self {
        PyString {
            data: bytes.to_vec(),
        }
    }
}

impl From<Vec<u8>> for PyString {
    fn from(data: Vec<u8>) -> Self {
        PyString { data }
    }
}

impl FromIterator<u8> for PyString {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        PyString {
            data: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for PyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PyString({:?})", self.to_string_lossy())
    }
}
