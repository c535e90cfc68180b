//! Capability dependent building blocks.
//!
//! Every [`Sequence`] names its traversal capability through [`Sequence::Strategy`], one of the
//! zero-sized tags [`Forward`] or [`RandomAccess`]. The tag decides at compile time how the
//! engine moves through the sequence:
//!
//! - `Forward` only ever steps one position at a time. Reversals and insertions are done with
//!   in-place rotations, and a merge whose right run is the shorter one rotates the runs first so
//!   it can still run front to back.
//! - `RandomAccess` uses index arithmetic, shifts elements directly and merges backwards when the
//!   right run is the shorter one.
//!
//! Run detection, binary insertion, scheduling and the forward merge loop are shared and only
//! reach the sequence through these hooks.

use std::collections::{TryReserveError, VecDeque};

use crate::compare::Compare;
use crate::merge;
use crate::sequence::{RandomAccessSequence, Sequence};

mod private {
    pub trait Sealed {}
}

/// Sequential, step-by-step traversal.
#[derive(Clone, Copy, Debug)]
pub enum Forward {}

/// O(1) positional access through indices.
#[derive(Clone, Copy, Debug)]
pub enum RandomAccess {}

impl private::Sealed for Forward {}
impl private::Sealed for RandomAccess {}

/// The capability specific part of the sort, see the module documentation.
///
/// This trait is sealed, a sequence picks one of the provided implementations.
pub trait Strategy<S: Sequence + ?Sized>: private::Sealed {
    const NAME: &'static str;

    /// Returns the position `n` steps after `pos`.
    fn advance(seq: &S, pos: S::Pos, n: usize) -> S::Pos;

    /// Reverses the `len` elements starting at `start`.
    fn reverse(seq: &mut S, start: S::Pos, len: usize);

    /// Moves the element at `from`, which sits `from_idx` steps after `start`, to the position
    /// `to_idx` steps after `start`. The elements in between move up by one.
    fn insert(seq: &mut S, start: S::Pos, to_idx: usize, from: S::Pos, from_idx: usize);

    /// Merges the adjacent non-decreasing runs `[a_start, a_start + a_len)` and
    /// `[b_start, b_start + b_len)`, with `b_start` directly following the first run.
    ///
    /// Takes the current gallop threshold and returns the adapted one.
    fn merge<C: Compare<S>>(
        seq: &mut S,
        a_start: S::Pos,
        a_len: usize,
        b_start: S::Pos,
        b_len: usize,
        buf: &mut VecDeque<S::Value>,
        is_less: &mut C,
        min_gallop: usize,
    ) -> Result<usize, TryReserveError>;
}

/// Name of the strategy the sort selects for `S`, `"forward"` or `"random_access"`.
pub fn strategy_name<S: Sequence + ?Sized>() -> &'static str {
    <S::Strategy as Strategy<S>>::NAME
}

/// Returns the position `n` steps after `pos`, with the cost model of the strategy of `S`.
#[inline]
pub(crate) fn advance<S: Sequence + ?Sized>(seq: &S, pos: S::Pos, n: usize) -> S::Pos {
    <S::Strategy as Strategy<S>>::advance(seq, pos, n)
}

impl<S: Sequence + ?Sized> Strategy<S> for Forward {
    const NAME: &'static str = "forward";

    #[inline]
    fn advance(seq: &S, mut pos: S::Pos, n: usize) -> S::Pos {
        for _ in 0..n {
            pos = seq.step(pos);
        }
        pos
    }

    fn reverse(seq: &mut S, start: S::Pos, len: usize) {
        // rev(XY) == rev(Y) rev(X), built bottom up from rotations. O(len * log(len)) swaps and
        // a recursion depth of log2(len).
        match len {
            0 | 1 => {}
            2 => {
                let second = seq.step(start);
                seq.swap_at(start, second);
            }
            _ => {
                let half = len / 2;
                let mid = Self::advance(seq, start, half);
                Self::reverse(seq, start, half);
                Self::reverse(seq, mid, len - half);
                let end = Self::advance(seq, mid, len - half);
                rotate(seq, start, mid, end);
            }
        }
    }

    fn insert(seq: &mut S, start: S::Pos, to_idx: usize, from: S::Pos, _from_idx: usize) {
        // Swapping every slot of the gap with `from` walks the gap one step to the right while
        // the inserted element lands at the front.
        let mut pos = Self::advance(seq, start, to_idx);
        while pos != from {
            seq.swap_at(pos, from);
            pos = seq.step(pos);
        }
    }

    fn merge<C: Compare<S>>(
        seq: &mut S,
        a_start: S::Pos,
        a_len: usize,
        b_start: S::Pos,
        b_len: usize,
        buf: &mut VecDeque<S::Value>,
        is_less: &mut C,
        min_gallop: usize,
    ) -> Result<usize, TryReserveError> {
        let Some((a_start, a_len, b_len)) =
            merge::trim_runs(seq, a_start, a_len, b_start, b_len, is_less)
        else {
            return Ok(min_gallop);
        };

        buf.try_reserve(a_len.min(b_len))?;

        if a_len <= b_len {
            Ok(merge::merge_forward::<S, C, true>(
                seq, a_start, a_len, b_len, buf, is_less, min_gallop,
            ))
        } else {
            // Bring the shorter right run to the front, then merge it from the buffer against
            // the left run that now follows it. Rotating keeps both runs in their order.
            let b_end = Self::advance(seq, b_start, b_len);
            rotate(seq, a_start, b_start, b_end);
            Ok(merge::merge_forward::<S, C, false>(
                seq, a_start, b_len, a_len, buf, is_less, min_gallop,
            ))
        }
    }
}

impl<S: RandomAccessSequence + ?Sized> Strategy<S> for RandomAccess {
    const NAME: &'static str = "random_access";

    #[inline]
    fn advance(_seq: &S, pos: usize, n: usize) -> usize {
        pos + n
    }

    fn reverse(seq: &mut S, start: usize, len: usize) {
        let mut lo = start;
        let mut hi = start + len;
        while lo + 1 < hi {
            hi -= 1;
            seq.swap_at(lo, hi);
            lo += 1;
        }
    }

    fn insert(seq: &mut S, start: usize, to_idx: usize, _from: usize, from_idx: usize) {
        let to = start + to_idx;
        let from = start + from_idx;
        debug_assert!(to <= from && from < seq.len());

        // SAFETY: `to..=from` is in bounds. Exactly one slot is vacant at any time and it is
        // refilled before returning. Nothing in between can panic, `read` and `write` never do.
        unsafe {
            let value = seq.read(from);
            let mut hole = from;
            while hole > to {
                let shifted = seq.read(hole - 1);
                seq.write(hole, shifted);
                hole -= 1;
            }
            seq.write(to, value);
        }
    }

    fn merge<C: Compare<S>>(
        seq: &mut S,
        a_start: usize,
        a_len: usize,
        b_start: usize,
        b_len: usize,
        buf: &mut VecDeque<S::Value>,
        is_less: &mut C,
        min_gallop: usize,
    ) -> Result<usize, TryReserveError> {
        let Some((a_start, a_len, b_len)) =
            merge::trim_runs(seq, a_start, a_len, b_start, b_len, is_less)
        else {
            return Ok(min_gallop);
        };

        buf.try_reserve(a_len.min(b_len))?;

        if a_len <= b_len {
            Ok(merge::merge_forward::<S, C, true>(
                seq, a_start, a_len, b_len, buf, is_less, min_gallop,
            ))
        } else {
            Ok(merge::merge_hi(
                seq, a_start, a_len, b_len, buf, is_less, min_gallop,
            ))
        }
    }
}

/// Rotates `[first, last)` so the element at `middle` becomes the first one, using only forward
/// steps and swaps.
pub(crate) fn rotate<S: Sequence + ?Sized>(
    seq: &mut S,
    mut first: S::Pos,
    mut middle: S::Pos,
    last: S::Pos,
) {
    while first != middle && middle != last {
        let mut read = middle;
        let mut next_read = first;
        while read != last {
            if first == next_read {
                next_read = read;
            }
            seq.swap_at(first, read);
            first = seq.step(first);
            read = seq.step(read);
        }
        // `[first, last)` is the not yet rotated remainder, with `next_read` as its new middle.
        middle = next_read;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequential::Sequential;

    #[test]
    fn names() {
        assert_eq!(strategy_name::<[u8]>(), "random_access");
        assert_eq!(strategy_name::<Sequential<'static, [u8]>>(), "forward");
    }

    #[test]
    fn rotate_matches_std() {
        for len in 0..12 {
            for mid in 0..=len {
                let mut v: Vec<usize> = (0..len).collect();
                rotate(v.as_mut_slice(), 0, mid, len);

                let mut expected: Vec<usize> = (0..len).collect();
                expected.rotate_left(mid);
                assert_eq!(v, expected, "len={len} mid={mid}");
            }
        }
    }

    #[test]
    fn forward_reverse() {
        for len in 0..40 {
            let mut v: Vec<usize> = (0..len).collect();
            <Forward as Strategy<[usize]>>::reverse(v.as_mut_slice(), 0, len);
            let expected: Vec<usize> = (0..len).rev().collect();
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn random_access_reverse_sub_range() {
        let mut v = vec![0, 1, 2, 3, 4, 5, 6];
        <RandomAccess as Strategy<[i32]>>::reverse(v.as_mut_slice(), 2, 4);
        assert_eq!(v, [0, 1, 5, 4, 3, 2, 6]);
    }

    #[test]
    fn insert_both_strategies() {
        for to in 0..6 {
            let mut expected = vec!['a', 'b', 'c', 'd', 'e', 'f'];
            let moved = expected.remove(5);
            expected.insert(to, moved);

            let mut forward = vec!['a', 'b', 'c', 'd', 'e', 'f'];
            <Forward as Strategy<[char]>>::insert(forward.as_mut_slice(), 0, to, 5, 5);
            assert_eq!(forward, expected);

            let mut random = vec!['a', 'b', 'c', 'd', 'e', 'f'];
            <RandomAccess as Strategy<[char]>>::insert(random.as_mut_slice(), 0, to, 5, 5);
            assert_eq!(random, expected);
        }
    }
}
