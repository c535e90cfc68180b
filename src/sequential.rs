//! Forward-only traversal of any sequence.

use crate::compare::Compare;
use crate::sequence::Sequence;
use crate::strategy::Forward;

/// Borrows a sequence and hides everything but single steps from the sort.
///
/// The sort then uses the [`Forward`] strategy: rotations instead of shifts, no backwards merge
/// and no jumps. Use it to sort sequences that are expensive to index, or to test the forward
/// code path on a slice.
///
/// Every [`Compare`] implementation for `S` also orders `Sequential<S>`.
pub struct Sequential<'a, S: ?Sized>(&'a mut S);

impl<'a, S: Sequence + ?Sized> Sequential<'a, S> {
    pub fn new(seq: &'a mut S) -> Self {
        Self(seq)
    }
}

// SAFETY: Every operation forwards to `S`, only the strategy differs.
unsafe impl<'s, S: Sequence + ?Sized> Sequence for Sequential<'s, S> {
    type Pos = S::Pos;
    type Value = S::Value;
    type Ref<'a> = S::Ref<'a>
    where
        Self: 'a;
    type Strategy = Forward;

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn begin(&self) -> S::Pos {
        self.0.begin()
    }

    #[inline]
    fn step(&self, pos: S::Pos) -> S::Pos {
        self.0.step(pos)
    }

    #[inline]
    fn at(&self, pos: S::Pos) -> S::Ref<'_> {
        self.0.at(pos)
    }

    #[inline]
    fn view<'v>(value: &'v S::Value) -> S::Ref<'v>
    where
        Self: 'v,
    {
        S::view(value)
    }

    #[inline]
    fn swap_at(&mut self, a: S::Pos, b: S::Pos) {
        self.0.swap_at(a, b);
    }

    #[inline]
    unsafe fn read(&mut self, pos: S::Pos) -> S::Value {
        // SAFETY: Same contract as the caller's.
        unsafe { self.0.read(pos) }
    }

    #[inline]
    unsafe fn write(&mut self, pos: S::Pos, value: S::Value) {
        // SAFETY: Same contract as the caller's.
        unsafe { self.0.write(pos, value) }
    }
}

impl<'s, S, C> Compare<Sequential<'s, S>> for C
where
    S: Sequence + ?Sized,
    C: Compare<S>,
{
    #[inline]
    fn is_less<'a>(&mut self, a: S::Ref<'a>, b: S::Ref<'a>) -> bool
    where
        Sequential<'s, S>: 'a,
    {
        <C as Compare<S>>::is_less(self, a, b)
    }
}
