//! Snapshots of runtime values
//!
//! `TypedValue` is an owned, serializable mirror of [`Value`]. Converting a
//! value tree into a `TypedValue` captures its contents at that moment;
//! converting back builds brand new containers that share nothing with the
//! original, which makes the round trip a deep copy.
//!
//! # Use Cases
//!
//! - Comparing the state of a generated program against recorded expectations
//! - Handing container contents to another process
//!
//! Uses bincode for compact binary encoding.

use crate::list::{PyList, shared_list};
use crate::pystring::{PyString, shared_string};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Error during serialization/deserialization
#[derive(Debug)]
pub enum SerializeError {
    /// Bincode encoding/decoding error (preserves original error for debugging)
    BincodeError(Box<bincode::Error>),
    /// A list that contains itself, directly or through nesting
    CyclicList,
}

impl std::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializeError::BincodeError(e) => write!(f, "Bincode error: {}", e),
            SerializeError::CyclicList => write!(f, "Cannot snapshot a list that contains itself"),
        }
    }
}

impl std::error::Error for SerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializeError::BincodeError(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<bincode::Error> for SerializeError {
    fn from(e: bincode::Error) -> Self {
        SerializeError::BincodeError(Box::new(e))
    }
}

/// Serializable representation of runtime values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TypedValue {
    Int(i32),
    Bool(bool),
    /// Raw characters, not necessarily UTF-8
    String(Vec<u8>),
    List(Vec<TypedValue>),
}

impl TypedValue {
    /// Capture the current contents of a runtime value
    pub fn from_value(value: &Value) -> Result<Self, SerializeError> {
        let mut open_lists = Vec::new();
        Self::capture(value, &mut open_lists)
    }

    /// Capture a whole list
    pub fn from_list(list: &PyList) -> Result<Self, SerializeError> {
        let mut open_lists = vec![list as *const PyList];
        Self::capture_list(list, &mut open_lists)
    }

    // `open_lists` holds the lists currently being captured, to detect cycles
    fn capture(value: &Value, open_lists: &mut Vec<*const PyList>) -> Result<Self, SerializeError> {
        match value {
            Value::Int(v) => Ok(TypedValue::Int(*v)),
            Value::Bool(v) => Ok(TypedValue::Bool(*v)),
            Value::String(s) => Ok(TypedValue::String(s.borrow().as_bytes().to_vec())),
            Value::List(list) => {
                if open_lists.contains(&list.as_ptr().cast_const()) {
                    return Err(SerializeError::CyclicList);
                }
                open_lists.push(list.as_ptr().cast_const());
                let captured = Self::capture_list(&list.borrow(), open_lists);
                open_lists.pop();
                captured
            }
        }
    }

    fn capture_list(
        list: &PyList,
        open_lists: &mut Vec<*const PyList>,
    ) -> Result<Self, SerializeError> {
        let mut items = Vec::with_capacity(list.len());
        for item in list.iter() {
            items.push(Self::capture(item, open_lists)?);
        }
        Ok(TypedValue::List(items))
    }

    /// Build fresh runtime containers from this snapshot
    pub fn to_value(&self) -> Value {
        match self {
            TypedValue::Int(v) => Value::Int(*v),
            TypedValue::Bool(v) => Value::Bool(*v),
            TypedValue::String(bytes) => {
                Value::String(shared_string(PyString::from(bytes.as_slice())))
            }
            TypedValue::List(items) => {
                Value::List(shared_list(items.iter().map(TypedValue::to_value).collect()))
            }
        }
    }

    /// Serialize to binary format (bincode)
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        bincode::serialize(self).map_err(SerializeError::from)
    }

    /// Deserialize from binary format (bincode)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        bincode::deserialize(bytes).map_err(SerializeError::from)
    }
}

/// Extension trait for Value to add serialization methods
pub trait ValueSerialize {
    /// Convert to serializable TypedValue
    fn to_typed(&self) -> Result<TypedValue, SerializeError>;

    /// Serialize directly to bytes
    fn to_bytes(&self) -> Result<Vec<u8>, SerializeError>;
}

impl ValueSerialize for Value {
    fn to_typed(&self) -> Result<TypedValue, SerializeError> {
        TypedValue::from_value(self)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        TypedValue::from_value(self)?.to_bytes()
    }
}

impl ValueSerialize for PyList {
    fn to_typed(&self) -> Result<TypedValue, SerializeError> {
        TypedValue::from_list(self)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        TypedValue::from_list(self)?.to_bytes()
    }
}
