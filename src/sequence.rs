//! The sequence abstraction the sort operates on.
//!
//! The engine never assumes that an element lives at an address it may hand out. It reads
//! elements through [`Sequence::at`], compares them, swaps them and relocates them into its own
//! buffer and back. That is enough to sort plain slices, proxies such as zipped slices, and
//! sequences that can only be walked forward.

use std::ptr;

use crate::strategy::{RandomAccess, Strategy};

/// A mutable, fixed length sequence that can be sorted in place.
///
/// # Safety
///
/// The engine relies on the following for memory safety, implementors must uphold them:
///
/// - Starting at [`begin`](Sequence::begin) and calling [`step`](Sequence::step) `len() - 1`
///   times visits every element exactly once. Calling `step` on the last element yields a
///   past-the-end position that is never dereferenced.
/// - Positions stay attached to the same slot for the whole sort, moving values around does not
///   invalidate them.
/// - `read` bitwise moves the value out of a valid position and `write` moves a value into it,
///   neither of them panics.
/// - `len` does not change while the sequence is borrowed by the sort.
pub unsafe trait Sequence {
    /// An opaque cursor into the sequence.
    type Pos: Copy + Eq;

    /// The owned form of an element, as stored in the merge buffer.
    type Value;

    /// What comparisons see. A true reference for slices, a proxy for zipped sequences.
    type Ref<'a>: Copy
    where
        Self: 'a;

    /// The traversal capability of the sequence, selects the sort strategy at compile time.
    type Strategy: Strategy<Self>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the first element.
    fn begin(&self) -> Self::Pos;

    /// Position following `pos`.
    fn step(&self, pos: Self::Pos) -> Self::Pos;

    fn at(&self, pos: Self::Pos) -> Self::Ref<'_>;

    /// Views a relocated value the same way [`at`](Sequence::at) views an element in place.
    fn view<'v>(value: &'v Self::Value) -> Self::Ref<'v>
    where
        Self: 'v;

    fn swap_at(&mut self, a: Self::Pos, b: Self::Pos);

    /// Moves the value at `pos` out of the sequence.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid, currently occupied position. Afterwards the slot is logically
    /// uninitialized until it is refilled with [`write`](Sequence::write).
    unsafe fn read(&mut self, pos: Self::Pos) -> Self::Value;

    /// Moves `value` into the slot at `pos` without dropping its previous content.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position whose value was previously moved out with
    /// [`read`](Sequence::read).
    unsafe fn write(&mut self, pos: Self::Pos, value: Self::Value);
}

/// A sequence whose positions are plain indices, allowing O(1) jumps and distances.
///
/// # Safety
///
/// Same requirements as [`Sequence`], additionally `begin` must be `0` and `step(i)` must be
/// `i + 1`, so every index in `0..len()` is a valid position.
pub unsafe trait RandomAccessSequence: Sequence<Pos = usize> {}

// SAFETY: Indices in `0..len` address the slice elements, `read` and `write` are plain
// bitwise moves.
unsafe impl<T> Sequence for [T] {
    type Pos = usize;
    type Value = T;
    type Ref<'a> = &'a T
    where
        Self: 'a;
    type Strategy = RandomAccess;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn begin(&self) -> usize {
        0
    }

    #[inline]
    fn step(&self, pos: usize) -> usize {
        pos + 1
    }

    #[inline]
    fn at(&self, pos: usize) -> &T {
        &self[pos]
    }

    #[inline]
    fn view<'v>(value: &'v T) -> &'v T
    where
        Self: 'v,
    {
        value
    }

    #[inline]
    fn swap_at(&mut self, a: usize, b: usize) {
        self.swap(a, b);
    }

    #[inline]
    unsafe fn read(&mut self, pos: usize) -> T {
        debug_assert!(pos < <[T]>::len(self));
        // SAFETY: The caller guarantees `pos` is in bounds and occupied.
        unsafe { ptr::read(self.as_ptr().add(pos)) }
    }

    #[inline]
    unsafe fn write(&mut self, pos: usize, value: T) {
        debug_assert!(pos < <[T]>::len(self));
        // SAFETY: The caller guarantees `pos` is in bounds and its old value was moved out.
        unsafe { ptr::write(self.as_mut_ptr().add(pos), value) }
    }
}

// SAFETY: See the `Sequence` impl above, positions are indices.
unsafe impl<T> RandomAccessSequence for [T] {}
