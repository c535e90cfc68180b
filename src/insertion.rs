//! Binary insertion sort, used to extend short natural runs to the minimum run length.

use crate::compare::Compare;
use crate::sequence::Sequence;
use crate::strategy::{advance, Strategy};

/// Sequences shorter than this are sorted by a single binary insertion pass, without merging.
pub const MIN_MERGE: usize = 64;

/// Computes the minimum run length for a sequence of `n` elements.
///
/// Short natural runs get extended to this length. The result is chosen so that `n / minrun` is
/// a power of two or slightly below one, which keeps the final merges balanced. For
/// `n < MIN_MERGE` this is `n` itself.
#[inline]
pub fn min_run_length(mut n: usize) -> usize {
    // Becomes 1 if any of the shifted off bits is set.
    let mut r = 0;
    while n >= MIN_MERGE {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

/// Sorts the `len` elements starting at `start`, of which the first `sorted` are already
/// non-decreasing.
///
/// Each remaining element is inserted at the rightmost position that keeps the prefix sorted,
/// found by binary search. This makes the sort stable and costs `O(log len)` comparisons per
/// element, element moves are up to the strategy.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn binary_insertion_sort<S, C>(
    seq: &mut S,
    start: S::Pos,
    len: usize,
    sorted: usize,
    cmp: &mut C,
) where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    debug_assert!(sorted <= len);
    let sorted = sorted.max(1);
    if sorted >= len {
        return;
    }

    let mut pivot = advance(seq, start, sorted);
    for i in sorted..len {
        // Upper bound of the pivot within `[start, start + i)`.
        let mut lo = 0;
        let mut hi = i;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let mid_pos = advance(seq, start, mid);
            if cmp.is_less(seq.at(pivot), seq.at(mid_pos)) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        if lo < i {
            <S::Strategy as Strategy<S>>::insert(seq, start, lo, pivot, i);
        }
        pivot = seq.step(pivot);
    }
}
