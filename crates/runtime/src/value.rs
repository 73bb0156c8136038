use crate::list::{PyList, SharedList, shared_list};
use crate::pystring::{PyString, SharedString, shared_string};
use std::fmt;
use std::rc::Rc;

/// Kind of a [`Value`], used in type errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Bool,
    List,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::List => "list",
            ValueKind::String => "str",
        };
        write!(f, "{}", name)
    }
}

impl ValueKind {
    /// Type name the legacy C runtime used in its diagnostics
    pub fn legacy_name(&self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Bool => "short",
            ValueKind::List => "list",
            ValueKind::String => "string",
        }
    }
}

/// Value: one element of a list
///
/// Scalars are stored inline and copied. Lists and strings are stored as
/// shared handles: pushing the same handle into two lists, or slicing a list,
/// yields containers that see each other's later mutations of that payload.
///
/// Equality compares contents, recursively, not handle identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Bool(bool),
    List(SharedList),
    String(SharedString),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::List(_) => ValueKind::List,
            Value::String(_) => ValueKind::String,
        }
    }

    /// True if both values hold the same shared payload (scalars never do)
    pub fn shares_payload_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::String(a), Value::String(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<SharedList> for Value {
    fn from(v: SharedList) -> Self {
        Value::List(v)
    }
}

impl From<&SharedList> for Value {
    fn from(v: &SharedList) -> Self {
        Value::List(Rc::clone(v))
    }
}

impl From<SharedString> for Value {
    fn from(v: SharedString) -> Self {
        Value::String(v)
    }
}

impl From<&SharedString> for Value {
    fn from(v: &SharedString) -> Self {
        Value::String(Rc::clone(v))
    }
}

impl From<PyList> for Value {
    fn from(v: PyList) -> Self {
        Value::List(shared_list(v))
    }
}

impl From<PyString> for Value {
    fn from(v: PyString) -> Self {
        Value::String(shared_string(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(shared_string(PyString::from(v)))
    }
}

/// Typed extraction from a [`Value`]
///
/// Drives the typed list getters: `list.get_as::<i32>(0)` and friends. List
/// and string extraction hands back a new reference to the shared payload.
pub trait FromValue: Sized {
    const KIND: ValueKind;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for SharedList {
    const KIND: ValueKind = ValueKind::List;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(v) => Some(Rc::clone(v)),
            _ => None,
        }
    }
}

impl FromValue for SharedString {
    const KIND: ValueKind = ValueKind::String;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(Rc::clone(v)),
            _ => None,
        }
    }
}
