//! The sort driver: finds runs, extends the short ones and merges them on a balanced schedule.

use std::collections::{TryReserveError, VecDeque};

use crate::compare::Compare;
use crate::insertion::{binary_insertion_sort, min_run_length, MIN_MERGE};
use crate::merge::MIN_GALLOP;
use crate::run::count_run;
use crate::sequence::Sequence;
use crate::stack::{Phase, Run, RunStack};
use crate::strategy::{advance, Strategy};

/// Stable sort of the whole sequence.
///
/// Fails only if the merge buffer or the run stack cannot be allocated, in which case the
/// sequence holds its original elements in an unspecified order.
pub(crate) fn timsort<S, C>(seq: &mut S, cmp: &mut C) -> Result<(), TryReserveError>
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    let len = seq.len();
    if len < 2 {
        // These inputs are always sorted.
        return Ok(());
    }

    let begin = seq.begin();

    if len < MIN_MERGE {
        // A single extended run, no merging and no allocation.
        let run_len = count_run(seq, begin, len, cmp);
        binary_insertion_sort(seq, begin, len, run_len, cmp);
        return Ok(());
    }

    let min_run = min_run_length(len);
    let mut buf = VecDeque::new();
    let mut runs = RunStack::new();
    let mut min_gallop = MIN_GALLOP;

    let mut start = begin;
    let mut remaining = len;
    while remaining > 0 {
        let mut run_len = count_run(seq, start, remaining, cmp);
        if run_len < min_run {
            let forced = min_run.min(remaining);
            binary_insertion_sort(seq, start, forced, run_len, cmp);
            run_len = forced;
        }

        runs.push(Run {
            start,
            len: run_len,
        })?;
        start = advance(seq, start, run_len);
        remaining -= run_len;

        collapse(
            seq,
            &mut runs,
            Phase::Collecting,
            &mut buf,
            cmp,
            &mut min_gallop,
        )?;
        audit!(runs.is_balanced(), "run stack out of balance");
    }

    collapse(
        seq,
        &mut runs,
        Phase::Flushing,
        &mut buf,
        cmp,
        &mut min_gallop,
    )?;

    // Finally, exactly one run must remain in the stack.
    debug_assert!(runs.single().map_or(false, |run| run.len == len));
    Ok(())
}

/// Merges runs until the stack no longer asks for it.
fn collapse<S, C>(
    seq: &mut S,
    runs: &mut RunStack<S::Pos>,
    phase: Phase,
    buf: &mut VecDeque<S::Value>,
    cmp: &mut C,
    min_gallop: &mut usize,
) -> Result<(), TryReserveError>
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    while let Some(r) = runs.next_merge(phase) {
        let (left, right) = runs.pair(r);
        audit!(
            crate::run::is_sorted_run(seq, left.start, left.len, cmp)
                && crate::run::is_sorted_run(seq, right.start, right.len, cmp),
            "merging unsorted runs of length {} and {}",
            left.len,
            right.len
        );

        *min_gallop = <S::Strategy as Strategy<S>>::merge(
            seq,
            left.start,
            left.len,
            right.start,
            right.len,
            buf,
            cmp,
            *min_gallop,
        )?;
        runs.merged(r);
    }
    Ok(())
}

/// Merges the non-decreasing runs `[0, mid)` and `[mid, len)` of the sequence.
pub(crate) fn timmerge<S, C>(seq: &mut S, mid: usize, cmp: &mut C) -> Result<(), TryReserveError>
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    let len = seq.len();
    assert!(
        mid <= len,
        "merge point {mid} out of range for a sequence of length {len}"
    );
    if mid == 0 || mid == len {
        return Ok(());
    }

    let begin = seq.begin();
    let b_start = advance(seq, begin, mid);
    audit!(
        crate::run::is_sorted_run(seq, begin, mid, cmp)
            && crate::run::is_sorted_run(seq, b_start, len - mid, cmp),
        "merge input is not two sorted runs"
    );

    let mut buf = VecDeque::new();
    <S::Strategy as Strategy<S>>::merge(
        seq,
        begin,
        mid,
        b_start,
        len - mid,
        &mut buf,
        cmp,
        MIN_GALLOP,
    )?;
    Ok(())
}
