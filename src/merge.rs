//! The adaptive merge.
//!
//! Merges two adjacent non-decreasing runs A and B. First the parts of both runs that are already
//! in their final place are trimmed off, then the shorter of the remaining runs is moved into the
//! buffer and merged back against the longer one.
//!
//! The merge starts out comparing one element at a time. Once one side wins `min_gallop` times in
//! a row it switches to galloping: exponential probing followed by a binary search finds how many
//! elements in a row come from the same side, and those are moved in bulk. Every productive
//! galloping round lowers `min_gallop`, falling back to one-at-a-time mode raises it. That way
//! data with long blocks gallops early and random data stays in the cheaper mode.

use std::collections::VecDeque;

use crate::compare::Compare;
use crate::sequence::{RandomAccessSequence, Sequence};
use crate::strategy::advance;

/// Initial number of consecutive wins of one run before a merge starts galloping.
pub const MIN_GALLOP: usize = 7;

/// Returns the number of leading indices in `0..len` for which `pred` holds.
///
/// `pred` must hold for some prefix of `0..len` and fail for the rest. Probes `0, 1, 3, 7, ...`
/// until `pred` fails, then binary searches the last gap, so finding `k` takes `O(log k)` calls.
#[inline]
pub(crate) fn gallop(len: usize, mut pred: impl FnMut(usize) -> bool) -> usize {
    if len == 0 || !pred(0) {
        return 0;
    }

    // `pred(lo)` holds, the next step doubles the distance.
    let mut lo = 0;
    let mut ofs = 1;
    loop {
        let hi = lo + ofs;
        if hi >= len {
            break;
        }
        if !pred(hi) {
            return binary_count(lo + 1, hi, pred);
        }
        lo = hi;
        ofs = ofs.saturating_mul(2);
    }

    binary_count(lo + 1, len, pred)
}

/// First index in `lo..hi` where `pred` fails, `hi` if it holds everywhere.
#[inline]
fn binary_count(mut lo: usize, mut hi: usize, mut pred: impl FnMut(usize) -> bool) -> usize {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Excludes the elements of both runs that already sit in their final place.
///
/// Returns the new start and length of A and the new length of B, B keeps its start. Returns
/// `None` if the runs are already in order and nothing has to move.
pub(crate) fn trim_runs<S, C>(
    seq: &S,
    a_start: S::Pos,
    a_len: usize,
    b_start: S::Pos,
    b_len: usize,
    cmp: &mut C,
) -> Option<(S::Pos, usize, usize)>
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    debug_assert!(a_len > 0 && b_len > 0);

    // Elements of A that are not greater than the head of B stay where they are.
    let skip = gallop(a_len, |i| {
        !cmp.is_less(seq.at(b_start), seq.at(advance(seq, a_start, i)))
    });
    if skip == a_len {
        return None;
    }
    let a_start = advance(seq, a_start, skip);
    let a_len = a_len - skip;

    // Elements of B that are not less than the tail of A stay where they are.
    let a_last = advance(seq, a_start, a_len - 1);
    let b_len = gallop(b_len, |i| {
        cmp.is_less(seq.at(advance(seq, b_start, i)), seq.at(a_last))
    });
    if b_len == 0 {
        return None;
    }

    Some((a_start, a_len, b_len))
}

/// The in-flight state of a merge.
///
/// The vacant slots of the sequence always form one contiguous gap starting at `dest` that is
/// exactly as long as the buffer. When dropped, the buffered values are moved into the gap in
/// order. If the comparison panics the sequence still holds every element exactly once, and at
/// the end of a merge this places the leftover part of the buffered run.
struct Hole<'a, S: Sequence + ?Sized> {
    seq: &'a mut S,
    buf: &'a mut VecDeque<S::Value>,
    dest: S::Pos,
}

impl<S: Sequence + ?Sized> Hole<'_, S> {
    /// Moves the front of the buffer into the first vacant slot.
    #[inline]
    fn fill_from_buf(&mut self) {
        if let Some(value) = self.buf.pop_front() {
            // SAFETY: `dest` is vacant, the gap is as long as the buffer was.
            unsafe { self.seq.write(self.dest, value) };
            self.dest = self.seq.step(self.dest);
        }
    }

    /// Moves the element at `src` into the first vacant slot. `src` must be the first occupied
    /// position behind the gap.
    #[inline]
    fn fill_from_seq(&mut self, src: S::Pos) {
        debug_assert!(!self.buf.is_empty());
        // SAFETY: `src` is occupied and `dest` is vacant. Afterwards `src` is the last slot of the
        // gap, which moved one step to the right.
        unsafe {
            let value = self.seq.read(src);
            self.seq.write(self.dest, value);
        }
        self.dest = self.seq.step(self.dest);
    }
}

impl<S: RandomAccessSequence + ?Sized> Hole<'_, S> {
    /// Moves the element right before the gap into the last vacant slot.
    #[inline]
    fn fill_back_from_seq(&mut self) {
        debug_assert!(self.dest > 0 && !self.buf.is_empty());
        let src = self.dest - 1;
        let last = self.dest + self.buf.len() - 1;
        // SAFETY: `src` is occupied and `last` is vacant. Afterwards `src` is the first slot of
        // the gap, which moved one step to the left.
        unsafe {
            let value = self.seq.read(src);
            self.seq.write(last, value);
        }
        self.dest = src;
    }

    /// Moves the back of the buffer into the last vacant slot.
    #[inline]
    fn fill_back_from_buf(&mut self) {
        if let Some(value) = self.buf.pop_back() {
            // SAFETY: The gap was one slot longer than the buffer is now.
            unsafe { self.seq.write(self.dest + self.buf.len(), value) };
        }
    }
}

impl<S: Sequence + ?Sized> Drop for Hole<'_, S> {
    fn drop(&mut self) {
        while !self.buf.is_empty() {
            self.fill_from_buf();
        }
    }
}

/// Whether `seq_elem`, which is still in the sequence, goes before the buffered `buf_elem`.
/// On ties the element of the left run goes first.
#[inline]
fn seq_first<'a, S, C, const BUFFERED_LEFT: bool>(
    cmp: &mut C,
    seq_elem: S::Ref<'a>,
    buf_elem: S::Ref<'a>,
) -> bool
where
    S: Sequence + ?Sized + 'a,
    C: Compare<S>,
{
    if BUFFERED_LEFT {
        cmp.is_less(seq_elem, buf_elem)
    } else {
        !cmp.is_less(buf_elem, seq_elem)
    }
}

/// Merges the `buffered_len` elements starting at `start` with the `seq_len` elements that follow
/// them, front to back, moving the first run into `buf`.
///
/// With `BUFFERED_LEFT` the buffered run is A, otherwise it is B after it was rotated in front of
/// A. Either way ties go to A. Returns the adapted gallop threshold.
///
/// `buf` must be empty and have room for `buffered_len` elements, both runs must be non-empty.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn merge_forward<S, C, const BUFFERED_LEFT: bool>(
    seq: &mut S,
    start: S::Pos,
    buffered_len: usize,
    seq_len: usize,
    buf: &mut VecDeque<S::Value>,
    cmp: &mut C,
    mut min_gallop: usize,
) -> usize
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    debug_assert!(buf.is_empty() && buf.capacity() >= buffered_len);
    debug_assert!(buffered_len > 0 && seq_len > 0);

    let mut hole = Hole {
        seq,
        buf,
        dest: start,
    };

    // `right` is the first unmerged element still in the sequence.
    let mut right = start;
    for _ in 0..buffered_len {
        // SAFETY: `right` is occupied. It becomes part of the gap behind `dest` the moment its
        // value is in the buffer.
        let value = unsafe { hole.seq.read(right) };
        hole.buf.push_back(value);
        right = hole.seq.step(right);
    }
    let mut right_len = seq_len;

    'merge: loop {
        let mut buf_wins = 0;
        let mut seq_wins = 0;

        loop {
            if seq_first::<S, C, BUFFERED_LEFT>(cmp, hole.seq.at(right), S::view(&hole.buf[0])) {
                hole.fill_from_seq(right);
                right = hole.seq.step(right);
                right_len -= 1;
                seq_wins += 1;
                buf_wins = 0;
                if right_len == 0 {
                    break 'merge;
                }
            } else {
                hole.fill_from_buf();
                buf_wins += 1;
                seq_wins = 0;
                if hole.buf.is_empty() {
                    break 'merge;
                }
            }

            if buf_wins.max(seq_wins) >= min_gallop {
                break;
            }
        }

        // One side keeps winning, gallop.
        min_gallop += 1;
        loop {
            min_gallop -= (min_gallop > 1) as usize;

            buf_wins = gallop(hole.buf.len(), |i| {
                !seq_first::<S, C, BUFFERED_LEFT>(cmp, hole.seq.at(right), S::view(&hole.buf[i]))
            });
            for _ in 0..buf_wins {
                hole.fill_from_buf();
            }
            if hole.buf.is_empty() {
                break 'merge;
            }

            // The search stopped at an element that goes first.
            hole.fill_from_seq(right);
            right = hole.seq.step(right);
            right_len -= 1;
            if right_len == 0 {
                break 'merge;
            }

            seq_wins = gallop(right_len, |i| {
                let pos = advance(&*hole.seq, right, i);
                seq_first::<S, C, BUFFERED_LEFT>(cmp, hole.seq.at(pos), S::view(&hole.buf[0]))
            });
            for _ in 0..seq_wins {
                hole.fill_from_seq(right);
                right = hole.seq.step(right);
            }
            right_len -= seq_wins;
            if right_len == 0 {
                break 'merge;
            }

            hole.fill_from_buf();
            if hole.buf.is_empty() {
                break 'merge;
            }

            if buf_wins < MIN_GALLOP && seq_wins < MIN_GALLOP {
                break;
            }
        }
        // Galloping stopped paying off.
        min_gallop += 1;
    }

    // Dropping `hole` moves whatever is left of the buffered run into place.
    drop(hole);
    min_gallop.max(1)
}

/// Merges A `[a_start, a_start + a_len)` with B, the `b_len` elements that follow it, back to
/// front. B is moved into `buf`. Returns the adapted gallop threshold.
///
/// `buf` must be empty and have room for `b_len` elements, both runs must be non-empty.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn merge_hi<S, C>(
    seq: &mut S,
    a_start: usize,
    a_len: usize,
    b_len: usize,
    buf: &mut VecDeque<S::Value>,
    cmp: &mut C,
    mut min_gallop: usize,
) -> usize
where
    S: RandomAccessSequence + ?Sized,
    C: Compare<S>,
{
    debug_assert!(buf.is_empty() && buf.capacity() >= b_len);
    debug_assert!(a_len > 0 && b_len > 0);

    let b_start = a_start + a_len;
    let mut hole = Hole {
        seq,
        buf,
        dest: b_start,
    };
    for i in 0..b_len {
        // SAFETY: All of B is occupied and in bounds, it turns into the gap.
        let value = unsafe { hole.seq.read(b_start + i) };
        hole.buf.push_back(value);
    }

    // The unmerged part of A is `[hole.dest - left_len, hole.dest)`.
    let mut left_len = a_len;

    'merge: loop {
        let mut buf_wins = 0;
        let mut seq_wins = 0;

        loop {
            let back = hole.buf.len() - 1;
            // Only a strictly greater element of A goes behind the buffered one.
            if cmp.is_less(S::view(&hole.buf[back]), hole.seq.at(hole.dest - 1)) {
                hole.fill_back_from_seq();
                left_len -= 1;
                seq_wins += 1;
                buf_wins = 0;
                if left_len == 0 {
                    break 'merge;
                }
            } else {
                hole.fill_back_from_buf();
                buf_wins += 1;
                seq_wins = 0;
                if hole.buf.is_empty() {
                    break 'merge;
                }
            }

            if buf_wins.max(seq_wins) >= min_gallop {
                break;
            }
        }

        min_gallop += 1;
        loop {
            min_gallop -= (min_gallop > 1) as usize;

            seq_wins = gallop(left_len, |i| {
                let back = hole.buf.len() - 1;
                cmp.is_less(S::view(&hole.buf[back]), hole.seq.at(hole.dest - 1 - i))
            });
            for _ in 0..seq_wins {
                hole.fill_back_from_seq();
            }
            left_len -= seq_wins;
            if left_len == 0 {
                break 'merge;
            }

            hole.fill_back_from_buf();
            if hole.buf.is_empty() {
                break 'merge;
            }

            buf_wins = gallop(hole.buf.len(), |i| {
                let back = hole.buf.len() - 1 - i;
                !cmp.is_less(S::view(&hole.buf[back]), hole.seq.at(hole.dest - 1))
            });
            for _ in 0..buf_wins {
                hole.fill_back_from_buf();
            }
            if hole.buf.is_empty() {
                break 'merge;
            }

            hole.fill_back_from_seq();
            left_len -= 1;
            if left_len == 0 {
                break 'merge;
            }

            if buf_wins < MIN_GALLOP && seq_wins < MIN_GALLOP {
                break;
            }
        }
        min_gallop += 1;
    }

    // If A ran out first the rest of B belongs at the very front, the gap starts at `a_start`.
    drop(hole);
    min_gallop.max(1)
}
