//! Run detection.

use crate::compare::Compare;
use crate::sequence::Sequence;
use crate::strategy::Strategy;

/// Returns the length of the run that starts at `start`, looking at no more than `remaining`
/// elements.
///
/// A run is either non-decreasing or strictly descending. Descending runs are reversed in place
/// before returning, so the result is always a non-decreasing run. Reversing a strictly
/// descending run cannot reorder equal elements, which keeps the sort stable.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn count_run<S, C>(seq: &mut S, start: S::Pos, remaining: usize, cmp: &mut C) -> usize
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    debug_assert!(remaining > 0);
    if remaining == 1 {
        return 1;
    }

    let mut prev = start;
    let mut next = seq.step(start);
    let descending = cmp.is_less(seq.at(next), seq.at(prev));

    let mut len = 2;
    while len < remaining {
        prev = next;
        next = seq.step(next);
        let next_is_less = cmp.is_less(seq.at(next), seq.at(prev));
        if next_is_less != descending {
            break;
        }
        len += 1;
    }

    if descending {
        <S::Strategy as Strategy<S>>::reverse(seq, start, len);
    }

    len
}

/// Whether the `len` elements starting at `start` are non-decreasing.
#[cfg(feature = "audit")]
pub(crate) fn is_sorted_run<S, C>(seq: &S, start: S::Pos, len: usize, cmp: &mut C) -> bool
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    let mut prev = start;
    for _ in 1..len {
        let next = seq.step(prev);
        if cmp.is_less(seq.at(next), seq.at(prev)) {
            return false;
        }
        prev = next;
    }
    true
}
