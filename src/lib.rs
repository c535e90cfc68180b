//! Stable, adaptive TimSort over arbitrary mutable sequences.
//!
//! The sort finds the runs that are already in the input, extends short ones with binary
//! insertion sort and merges them on a schedule that keeps the run stack balanced. Merges trim
//! away what is already in place and switch to galloping when one run keeps winning. The result
//! is `O(n log n)` comparisons in the worst case and `n - 1` on sorted input.
//!
//! The engine works on anything implementing [`Sequence`]:
//!
//! - slices, through [`sort`], [`sort_by`], [`sort_by_key`] and [`sort_by_less`].
//! - several slices sorted in lockstep, through [`Zip2`] and [`Zip3`].
//! - any sequence viewed as forward-only, through [`Sequential`].
//! - user types implementing [`Sequence`], through [`sort_seq`] and [`try_sort_seq`].
//!
//! ```
//! let mut ids = [30, 10, 20];
//! let mut names = ["c", "a", "b"];
//! timsort::Zip2::new(&mut ids, &mut names).sort_by_key(|(id, _)| *id);
//! assert_eq!(names, ["a", "b", "c"]);
//! ```

use std::cmp::Ordering;
use std::collections::TryReserveError;

/// Asserts an internal invariant when the `audit` feature is enabled. Compiles to nothing
/// otherwise, the condition is not evaluated.
macro_rules! audit {
    ($cond:expr, $($arg:tt)+) => {
        #[cfg(feature = "audit")]
        assert!($cond, $($arg)+);
    };
}

mod compare;
mod insertion;
mod merge;
mod run;
mod sequence;
mod sequential;
mod sort;
mod stack;
mod strategy;
mod zip;

pub use compare::{ByKey, Compare, KeyOrder, LessThan, Ordered};
pub use insertion::{min_run_length, MIN_MERGE};
pub use merge::MIN_GALLOP;
pub use sequence::{RandomAccessSequence, Sequence};
pub use sequential::Sequential;
pub use strategy::{strategy_name, Forward, RandomAccess, Strategy};
pub use zip::{Zip2, Zip3};

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    sort_seq(v, Ordered);
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_seq(v, LessThan(|a: &T, b: &T| compare(a, b) == Ordering::Less));
}

/// Sorts by the key `f` extracts. The key is extracted again for every comparison.
#[inline]
pub fn sort_by_key<T, K, F>(v: &mut [T], f: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    sort_seq(v, ByKey::<F, Ordered, K>::new(f, Ordered));
}

/// Sorts with a strict weak ordering given as `is_less` predicate.
#[inline]
pub fn sort_by_less<T, F>(v: &mut [T], is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    sort_seq(v, LessThan(is_less));
}

/// Sorts any sequence with the given ordering.
///
/// # Panics
///
/// Panics if the merge buffer cannot be allocated, see [`try_sort_seq`]. A panic in `cmp` is
/// propagated after every element was put back, the sequence is then a permutation of its input.
pub fn sort_seq<S, C>(seq: &mut S, cmp: C)
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    if let Err(err) = try_sort_seq(seq, cmp) {
        panic!("timsort: allocating the merge state failed: {err}");
    }
}

/// Sorts any sequence with the given ordering, reporting allocation failures.
///
/// On error the sequence holds its original elements in an unspecified order.
pub fn try_sort_seq<S, C>(seq: &mut S, mut cmp: C) -> Result<(), TryReserveError>
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    sort::timsort(seq, &mut cmp)
}

/// Merges the sorted halves `v[..mid]` and `v[mid..]` in place, stable.
///
/// # Panics
///
/// Panics if `mid > v.len()`.
#[inline]
pub fn merge<T>(v: &mut [T], mid: usize)
where
    T: Ord,
{
    merge_seq(v, mid, Ordered);
}

/// Like [`merge`], with a custom comparison. Both halves must be sorted by `compare`.
#[inline]
pub fn merge_by<T, F>(v: &mut [T], mid: usize, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    merge_seq(
        v,
        mid,
        LessThan(|a: &T, b: &T| compare(a, b) == Ordering::Less),
    );
}

/// Merges the sorted runs `[0, mid)` and `[mid, len)` of any sequence.
///
/// # Panics
///
/// Panics if `mid > seq.len()` or the merge buffer cannot be allocated.
pub fn merge_seq<S, C>(seq: &mut S, mid: usize, cmp: C)
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    if let Err(err) = try_merge_seq(seq, mid, cmp) {
        panic!("timsort: allocating the merge buffer failed: {err}");
    }
}

/// Like [`merge_seq`], reporting allocation failures.
pub fn try_merge_seq<S, C>(seq: &mut S, mid: usize, mut cmp: C) -> Result<(), TryReserveError>
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    sort::timmerge(seq, mid, &mut cmp)
}

#[cfg(test)]
mod tests {
    #[test]
    fn sort_by_less_descending_keeps_ties() {
        let mut v = [(1, 'a'), (3, 'a'), (2, 'a'), (3, 'b'), (1, 'b'), (2, 'b')];
        super::sort_by_less(&mut v, |x, y| x.0 > y.0);
        assert_eq!(
            v,
            [(3, 'a'), (3, 'b'), (2, 'a'), (2, 'b'), (1, 'a'), (1, 'b')]
        );

        let mut long: Vec<u32> = (0..500).map(|x| (x * 37) % 101).collect();
        super::sort_by_less(&mut long, |x, y| x > y);
        assert!(long.windows(2).all(|w| w[0] >= w[1]));
    }
}
