//! PyList - heterogeneous singly-linked list
//!
//! The spine is a chain of uniquely owned boxed nodes; elements are
//! [`Value`]s. New elements are always linked after the current tail, so
//! traversal order is insertion order.
//!
//! # Sharing
//!
//! Pushing a list or string stores a new reference to the same payload,
//! never a copy. `extend`, `concat`, `slice` and `Clone` copy the spine only:
//! the new list holds the same nested payloads as the source.

use crate::error::{ContainerKind, RuntimeError};
use crate::pystring::SharedString;
use crate::slicing::{self, Sequence, SliceBounds, SlicePositions, normalize_index};
use crate::value::{FromValue, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Reference-counted handle to a list; what nested list elements hold
pub type SharedList = Rc<RefCell<PyList>>;

/// Wrap a list into a shareable handle
pub fn shared_list(list: PyList) -> SharedList {
    Rc::new(RefCell::new(list))
}

struct Node {
    value: Value,
    next: Option<Box<Node>>,
}

pub struct PyList {
    length: usize,
    head: Option<Box<Node>>,
}

impl PyList {
    /// Create an empty list
    pub fn new() -> Self {
        PyList {
            length: 0,
            head: None,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.length,
        }
    }

    /// Link `values` after the tail, in order
    fn append_values<I: IntoIterator<Item = Value>>(&mut self, values: I) {
        let mut slot = &mut self.head;
        while let Some(node) = slot {
            slot = &mut node.next;
        }

        let mut added = 0;
        for value in values {
            let node = slot.insert(Box::new(Node { value, next: None }));
            slot = &mut node.next;
            added += 1;
        }
        self.length += added;
    }

    /// Append any value; the Rust type of the argument picks the tag
    pub fn push(&mut self, value: impl Into<Value>) {
        self.append_values(std::iter::once(value.into()));
    }

    pub fn push_int(&mut self, v: i32) {
        self.push(Value::Int(v));
    }

    pub fn push_bool(&mut self, v: bool) {
        self.push(Value::Bool(v));
    }

    /// Append a reference to `v`; the string is not copied
    pub fn push_string(&mut self, v: &SharedString) {
        self.push(Value::String(Rc::clone(v)));
    }

    /// Append a reference to `v`; the list is not copied
    pub fn push_list(&mut self, v: &SharedList) {
        self.push(Value::List(Rc::clone(v)));
    }

    /// Append every element of `src`; `src` is left untouched
    pub fn extend(&mut self, src: &PyList) {
        self.append_values(src.iter().cloned());
    }

    /// New list holding the elements of `self` followed by those of `other`
    pub fn concat(&self, other: &PyList) -> PyList {
        let mut list = PyList::new();
        list.extend(self);
        list.extend(other);
        list
    }

    /// Element at `pos` (negative counts from the end)
    pub fn get(&self, pos: i64) -> Result<&Value, RuntimeError> {
        let index = normalize_index(pos, self.length, ContainerKind::List)?;
        self.iter()
            .nth(index)
            .ok_or(RuntimeError::IndexOutOfRange {
                container: ContainerKind::List,
                index: index as i64,
                length: self.length,
            })
    }

    /// Element at `pos`, required to be of kind `T`
    pub fn get_as<T: FromValue>(&self, pos: i64) -> Result<T, RuntimeError> {
        let value = self.get(pos)?;
        T::from_value(value).ok_or(RuntimeError::TypeMismatch {
            index: pos,
            expected: T::KIND,
            found: value.kind(),
        })
    }

    pub fn get_int(&self, pos: i64) -> Result<i32, RuntimeError> {
        self.get_as(pos)
    }

    pub fn get_bool(&self, pos: i64) -> Result<bool, RuntimeError> {
        self.get_as(pos)
    }

    /// Shared handle to the nested list at `pos`
    pub fn get_list(&self, pos: i64) -> Result<SharedList, RuntimeError> {
        self.get_as(pos)
    }

    /// Shared handle to the string at `pos`
    pub fn get_string(&self, pos: i64) -> Result<SharedString, RuntimeError> {
        self.get_as(pos)
    }

    /// Python-style slice, see [`crate::slicing`] for the bound rules
    pub fn slice(&self, start: i64, end: i64, step: i64) -> Result<PyList, RuntimeError> {
        slicing::slice(self, start, end, step)
    }

    pub fn slice_with(&self, bounds: SliceBounds) -> Result<PyList, RuntimeError> {
        slicing::slice_with(self, bounds)
    }
}

/// Extend one shared list with another, which may be the same list
///
/// `xs += xs` appends a snapshot of the original elements.
pub fn extend_shared(dest: &SharedList, src: &SharedList) {
    if Rc::ptr_eq(dest, src) {
        let snapshot: Vec<Value> = dest.borrow().iter().cloned().collect();
        dest.borrow_mut().append_values(snapshot);
    } else {
        dest.borrow_mut().extend(&src.borrow());
    }
}

impl Sequence for PyList {
    type Item = Value;

    const CONTAINER: ContainerKind = ContainerKind::List;

    fn seq_len(&self) -> usize {
        self.length
    }

    fn item_at(&self, pos: usize) -> Value {
        let mut node = self.head.as_deref();
        for _ in 0..pos {
            node = node.and_then(|n| n.next.as_deref());
        }
        match node {
            Some(n) => n.value.clone(),
            None => unreachable!("slice position {} beyond list of {}", pos, self.length),
        }
    }

    fn gather(&self, positions: SlicePositions) -> Vec<Value> {
        // One walk of the spine instead of one walk per position
        let spine: Vec<&Value> = self.iter().collect();
        positions.map(|pos| spine[pos].clone()).collect()
    }

    fn from_items(items: Vec<Value>) -> Self {
        items.into_iter().collect()
    }
}

impl Default for PyList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PyList {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl PartialEq for PyList {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl fmt::Debug for PyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Value> for PyList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut list = PyList::new();
        list.append_values(iter);
        list
    }
}

impl Drop for PyList {
    fn drop(&mut self) {
        // Unlink node by node so long lists don't recurse through Box drops
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

/// Borrowing iterator over list elements, in insertion order
pub struct Iter<'a> {
    next: Option<&'a Node>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        let node = self.next?;
        self.next = node.next.as_deref();
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a PyList {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
