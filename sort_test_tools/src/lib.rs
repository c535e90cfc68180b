//! Shared test battery and input patterns for the sort front ends.

use std::cmp::Ordering;

/// A sort front end under test. Every implementation must be stable.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;
}

pub mod patterns;
pub mod types;
