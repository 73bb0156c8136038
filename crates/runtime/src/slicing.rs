//! Indexing and slicing shared by lists and strings
//!
//! Two normalization policies live here and they are deliberately different:
//!
//! - Single-element access: `pos < 0` becomes `length + pos`, then the
//!   position must fall in `[0, length)`.
//! - Slicing: a negative `start` is clamped to `0` (it is NOT offset from the
//!   end), a negative `end` is offset from the end, and `end` is clamped to
//!   `length`. Slicing never fails on out-of-range bounds, only on a zero step.
//!
//! Generated code relies on the slicing quirk: `xs[-2:5]` on a five element
//! list yields the whole list.

use crate::error::{ContainerKind, RuntimeError};

/// End bound the transpiler substitutes for an omitted `end` (`xs[a:]`)
pub const DEFAULT_SLICE_END: i64 = i32::MAX as i64;

/// Normalize a single-element position against a sequence length
pub fn normalize_index(
    pos: i64,
    length: usize,
    container: ContainerKind,
) -> Result<usize, RuntimeError> {
    let len = length as i64;
    let pos = if pos < 0 { len + pos } else { pos };
    if pos < 0 || pos >= len {
        return Err(RuntimeError::IndexOutOfRange {
            container,
            index: pos,
            length,
        });
    }
    Ok(pos as usize)
}

/// Slice parts as written in source; omitted parts take the transpiler defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceBounds {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: Option<i64>,
}

impl SliceBounds {
    pub fn new(start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Self {
        Self { start, end, step }
    }

    /// `(start, end, step)` with defaults `0`, [`DEFAULT_SLICE_END`], `1`
    pub fn resolve(&self) -> (i64, i64, i64) {
        (
            self.start.unwrap_or(0),
            self.end.unwrap_or(DEFAULT_SLICE_END),
            self.step.unwrap_or(1),
        )
    }
}

/// Positions visited by a slice, in visitation order
///
/// Every yielded position is a valid index into the sequence the iterator
/// was built for.
#[derive(Debug, Clone)]
pub struct SlicePositions {
    next: Option<i64>,
    start: i64,
    end: i64,
    step: i64,
}

impl Iterator for SlicePositions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let i = self.next?;
        let in_range = if self.step < 0 {
            i >= self.start
        } else {
            i < self.end
        };
        if !in_range {
            self.next = None;
            return None;
        }
        self.next = i.checked_add(self.step);
        Some(i as usize)
    }
}

/// Normalize raw slice bounds and produce the positions to visit
pub fn slice_positions(
    length: usize,
    start: i64,
    end: i64,
    step: i64,
) -> Result<SlicePositions, RuntimeError> {
    if step == 0 {
        return Err(RuntimeError::InvalidStep);
    }
    let len = length as i64;
    let start = start.max(0);
    // An end still negative after offsetting selects nothing, same as 0
    let end = if end < 0 { (len + end).max(0) } else { end.min(len) };
    let first = if step < 0 { end - 1 } else { start };
    Ok(SlicePositions {
        next: Some(first),
        start,
        end,
        step,
    })
}

/// A container the slicing engine can read from and build
pub trait Sequence: Sized {
    type Item;

    const CONTAINER: ContainerKind;

    fn seq_len(&self) -> usize;

    /// Element at `pos`; `pos` is always in `[0, seq_len())`
    fn item_at(&self, pos: usize) -> Self::Item;

    fn from_items(items: Vec<Self::Item>) -> Self;

    /// Collect the elements at `positions`
    ///
    /// Containers without O(1) positional access override this.
    fn gather(&self, positions: SlicePositions) -> Vec<Self::Item> {
        positions.map(|pos| self.item_at(pos)).collect()
    }

    /// Single-element access with negative-from-end normalization
    fn item(&self, pos: i64) -> Result<Self::Item, RuntimeError> {
        let pos = normalize_index(pos, self.seq_len(), Self::CONTAINER)?;
        Ok(self.item_at(pos))
    }
}

/// Slice any [`Sequence`] into a new, independent container
pub fn slice<S: Sequence>(seq: &S, start: i64, end: i64, step: i64) -> Result<S, RuntimeError> {
    let positions = slice_positions(seq.seq_len(), start, end, step)?;
    Ok(S::from_items(seq.gather(positions)))
}

/// Slice using source-level bounds, filling in omitted parts
pub fn slice_with<S: Sequence>(seq: &S, bounds: SliceBounds) -> Result<S, RuntimeError> {
    let (start, end, step) = bounds.resolve();
    slice(seq, start, end, step)
}
