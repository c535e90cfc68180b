//! Several slices sorted together as if they were one slice of tuples.
//!
//! Elements of a zipped view are proxies: comparisons see a tuple of references into the
//! component slices, and moving an element moves one value in every slice. No tuples are ever
//! materialized in place, only the merge buffer holds owned tuples.

use std::cmp::Ordering;
use std::ptr;

use paste::paste;

use crate::compare::{ByKey, Compare, KeyOrder, LessThan, Ordered};
use crate::sequence::{RandomAccessSequence, Sequence};
use crate::strategy::RandomAccess;

macro_rules! zip_sequence {
    ($n:literal; $($T:ident => $idx:tt),+) => {
        paste! {
            #[doc = concat!("A view of ", stringify!($n), " slices that sorts them in lockstep.")]
            ///
            /// Element `i` of the view is the tuple of element `i` of every slice. Slices of
            /// different lengths are truncated to the shortest one, elements past it are left
            /// alone.
            pub struct [<Zip $n>]<'a, $($T),+> {
                slices: ($(&'a mut [$T],)+),
                len: usize,
            }

            impl<'a, $($T),+> [<Zip $n>]<'a, $($T),+> {
                pub fn new($([<$T:lower>]: &'a mut [$T]),+) -> Self {
                    let len = [$([<$T:lower>].len()),+].into_iter().min().unwrap_or(0);
                    Self {
                        slices: ($(&mut [<$T:lower>][..len],)+),
                        len,
                    }
                }

                pub fn len(&self) -> usize {
                    self.len
                }

                pub fn is_empty(&self) -> bool {
                    self.len == 0
                }

                /// Sorts by the tuples in lexicographic order.
                pub fn sort(&mut self)
                where
                    $($T: Ord),+
                {
                    crate::sort_seq(self, Ordered);
                }

                pub fn sort_by<F>(&mut self, mut compare: F)
                where
                    F: FnMut(($(&$T,)+), ($(&$T,)+)) -> Ordering,
                {
                    crate::sort_seq(
                        self,
                        LessThan(|a: ($(&$T,)+), b: ($(&$T,)+)| compare(a, b) == Ordering::Less),
                    );
                }

                /// Sorts by a key projected from each tuple, typically one of its components.
                pub fn sort_by_key<K, F>(&mut self, f: F)
                where
                    K: Ord,
                    F: FnMut(($(&$T,)+)) -> K,
                {
                    crate::sort_seq(self, ByKey::<F, Ordered, K>::new(f, Ordered));
                }
            }

            // SAFETY: Index `i` addresses element `i` of every component slice, all of which are
            // `len` long. `read` and `write` move one value per slice.
            unsafe impl<'z, $($T),+> Sequence for [<Zip $n>]<'z, $($T),+> {
                type Pos = usize;
                type Value = ($($T,)+);
                type Ref<'a> = ($(&'a $T,)+) where Self: 'a;
                type Strategy = RandomAccess;

                #[inline]
                fn len(&self) -> usize {
                    self.len
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
                fn at(&self, pos: usize) -> ($(&$T,)+) {
                    ($(&self.slices.$idx[pos],)+)
                }

                #[inline]
                fn view<'v>(value: &'v ($($T,)+)) -> ($(&'v $T,)+)
                where
                    Self: 'v,
                {
                    ($(&value.$idx,)+)
                }

                #[inline]
                fn swap_at(&mut self, a: usize, b: usize) {
                    $(self.slices.$idx.swap(a, b);)+
                }

                #[inline]
                unsafe fn read(&mut self, pos: usize) -> ($($T,)+) {
                    debug_assert!(pos < self.len);
                    // SAFETY: The caller guarantees `pos` is in bounds and occupied.
                    unsafe { ($(ptr::read(self.slices.$idx.as_ptr().add(pos)),)+) }
                }

                #[inline]
                unsafe fn write(&mut self, pos: usize, value: ($($T,)+)) {
                    debug_assert!(pos < self.len);
                    // SAFETY: The caller guarantees `pos` is in bounds and was moved out of.
                    unsafe {
                        $(ptr::write(self.slices.$idx.as_mut_ptr().add(pos), value.$idx);)+
                    }
                }
            }

            // SAFETY: Positions are indices, see above.
            unsafe impl<'z, $($T),+> RandomAccessSequence for [<Zip $n>]<'z, $($T),+> {}

            impl<'z, $($T: Ord),+> Compare<[<Zip $n>]<'z, $($T),+>> for Ordered {
                #[inline]
                fn is_less<'a>(&mut self, a: ($(&'a $T,)+), b: ($(&'a $T,)+)) -> bool
                where
                    [<Zip $n>]<'z, $($T),+>: 'a,
                {
                    a < b
                }
            }

            impl<'z, $($T,)+ F> Compare<[<Zip $n>]<'z, $($T),+>> for LessThan<F>
            where
                F: FnMut(($(&$T,)+), ($(&$T,)+)) -> bool,
            {
                #[inline]
                fn is_less<'a>(&mut self, a: ($(&'a $T,)+), b: ($(&'a $T,)+)) -> bool
                where
                    [<Zip $n>]<'z, $($T),+>: 'a,
                {
                    (self.0)(a, b)
                }
            }

            impl<'z, $($T,)+ P, O, K> Compare<[<Zip $n>]<'z, $($T),+>> for ByKey<P, O, K>
            where
                P: FnMut(($(&$T,)+)) -> K,
                O: KeyOrder<K>,
            {
                #[inline]
                fn is_less<'a>(&mut self, a: ($(&'a $T,)+), b: ($(&'a $T,)+)) -> bool
                where
                    [<Zip $n>]<'z, $($T),+>: 'a,
                {
                    self.projected_less(a, b)
                }
            }
        }
    };
}

zip_sequence!(2; A => 0, B => 1);
zip_sequence!(3; A => 0, B => 1, C => 2);
