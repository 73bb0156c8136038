//! Rendering of runtime values
//!
//! The text produced here is compared byte for byte against the output of
//! the legacy C runtime, so the format is fixed:
//!
//! - integers in decimal
//! - booleans as `True` / `False`
//! - strings as their raw characters, no quotes, also inside lists
//! - lists as `[` elements joined by `, ` `]`, nested lists recursively
//!
//! Rendering only reads; it never mutates or reshapes a container.

use crate::list::PyList;
use crate::pystring::PyString;
use crate::value::Value;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Anything `print` accepts
pub trait Render {
    fn render(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl Render for i32 {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl Render for bool {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(if *self { b"True" } else { b"False" })
    }
}

impl Render for PyString {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.as_bytes())
    }
}

impl Render for PyList {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"[")?;
        for (i, value) in self.iter().enumerate() {
            if i != 0 {
                out.write_all(b", ")?;
            }
            value.render(out)?;
        }
        out.write_all(b"]")
    }
}

impl Render for Value {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Value::Int(v) => v.render(out),
            Value::Bool(v) => v.render(out),
            Value::List(v) => v.borrow().render(out),
            Value::String(v) => v.borrow().render(out),
        }
    }
}

impl<T: Render> Render for Rc<RefCell<T>> {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        self.borrow().render(out)
    }
}

/// Render into a fresh byte buffer
pub fn render_to_bytes<T: Render + ?Sized>(value: &T) -> Vec<u8> {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = value.render(&mut buf);
    buf
}

/// Render followed by a newline, the way `print(x)` does
pub fn print_to<T: Render + ?Sized>(value: &T, out: &mut dyn Write) -> io::Result<()> {
    value.render(out)?;
    out.write_all(b"\n")
}

/// `print(x)` on stdout
pub fn print<T: Render + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    print_to(value, &mut lock)?;
    lock.flush()
}

fn fmt_rendered<T: Render + ?Sized>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&String::from_utf8_lossy(&render_to_bytes(value)))
}

impl fmt::Display for PyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_rendered(self, f)
    }
}

impl fmt::Display for PyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_rendered(self, f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_rendered(self, f)
    }
}
