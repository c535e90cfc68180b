//! Ordering relations and key projections.
//!
//! A [`Compare`] implementation answers `is_less` for two elements of a specific kind of
//! sequence, seen through [`Sequence::Ref`]. The relation must be a strict weak order for the
//! output to be sorted. If it isn't, the output order is unspecified but every element is still
//! present exactly once.

use std::marker::PhantomData;

use crate::sequence::Sequence;

/// A strict weak ordering over the elements of `S`.
pub trait Compare<S: Sequence + ?Sized> {
    fn is_less<'a>(&mut self, a: S::Ref<'a>, b: S::Ref<'a>) -> bool
    where
        S: 'a;
}

/// A strict weak ordering over projected keys, used by [`ByKey`].
pub trait KeyOrder<K: ?Sized> {
    fn key_less(&mut self, a: &K, b: &K) -> bool;
}

/// The natural order given by `Ord`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ordered;

/// A caller supplied `is_less` predicate.
#[derive(Clone, Copy, Debug)]
pub struct LessThan<F>(pub F);

/// Projects every element to a key, then orders the keys with `O`.
///
/// The projection runs on every comparison. Keys are not cached.
pub struct ByKey<P, O, K> {
    project: P,
    order: O,
    key: PhantomData<fn() -> K>,
}

impl<P, O, K> ByKey<P, O, K> {
    pub fn new(project: P, order: O) -> Self {
        Self {
            project,
            order,
            key: PhantomData,
        }
    }

    /// Projects both elements and compares the keys.
    #[inline]
    pub(crate) fn projected_less<E>(&mut self, a: E, b: E) -> bool
    where
        P: FnMut(E) -> K,
        O: KeyOrder<K>,
    {
        let a_key = (self.project)(a);
        let b_key = (self.project)(b);
        self.order.key_less(&a_key, &b_key)
    }
}

impl<K: Ord + ?Sized> KeyOrder<K> for Ordered {
    #[inline]
    fn key_less(&mut self, a: &K, b: &K) -> bool {
        a.lt(b)
    }
}

impl<K: ?Sized, F> KeyOrder<K> for LessThan<F>
where
    F: FnMut(&K, &K) -> bool,
{
    #[inline]
    fn key_less(&mut self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

impl<T: Ord> Compare<[T]> for Ordered {
    #[inline]
    fn is_less<'a>(&mut self, a: &'a T, b: &'a T) -> bool
    where
        [T]: 'a,
    {
        a.lt(b)
    }
}

impl<T, F> Compare<[T]> for LessThan<F>
where
    F: FnMut(&T, &T) -> bool,
{
    #[inline]
    fn is_less<'a>(&mut self, a: &'a T, b: &'a T) -> bool
    where
        [T]: 'a,
    {
        (self.0)(a, b)
    }
}

impl<T, P, O, K> Compare<[T]> for ByKey<P, O, K>
where
    P: FnMut(&T) -> K,
    O: KeyOrder<K>,
{
    #[inline]
    fn is_less<'a>(&mut self, a: &'a T, b: &'a T) -> bool
    where
        [T]: 'a,
    {
        self.projected_less(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn less_of<C: Compare<[i32]>>(mut cmp: C, a: i32, b: i32) -> bool {
        cmp.is_less(&a, &b)
    }

    #[test]
    fn ordered_is_strict() {
        assert!(less_of(Ordered, 1, 2));
        assert!(!less_of(Ordered, 2, 2));
        assert!(!less_of(Ordered, 3, 2));
    }

    #[test]
    fn less_than_uses_predicate() {
        assert!(less_of(LessThan(|a: &i32, b: &i32| a > b), 3, 2));
        assert!(!less_of(LessThan(|a: &i32, b: &i32| a > b), 2, 3));
    }

    #[test]
    fn by_key_projects_both_sides() {
        let by_abs = ByKey::new(|x: &i32| x.abs(), Ordered);
        assert!(less_of(by_abs, -1, 2));

        let by_abs = ByKey::new(|x: &i32| x.abs(), Ordered);
        assert!(!less_of(by_abs, -3, 2));

        let by_abs_desc = ByKey::new(|x: &i32| x.abs(), LessThan(|a: &i32, b: &i32| a > b));
        assert!(less_of(by_abs_desc, -3, 2));
    }
}
