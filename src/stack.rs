//! The pending run stack and the merge schedule.

use std::collections::TryReserveError;

/// A non-decreasing run of `len` elements starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Run<P> {
    pub start: P,
    pub len: usize,
}

/// Whether more runs are still going to be pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Collecting,
    Flushing,
}

/// Runs that were found but not merged yet, ordered by position. Neighbors on the stack are
/// neighbors in the sequence.
#[derive(Debug)]
pub(crate) struct RunStack<P> {
    runs: Vec<Run<P>>,
}

impl<P: Copy> RunStack<P> {
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    pub fn push(&mut self, run: Run<P>) -> Result<(), TryReserveError> {
        self.runs.try_reserve(1)?;
        self.runs.push(run);
        Ok(())
    }

    /// Examines the top of the stack and identifies the next pair of runs to merge. If `Some(r)`
    /// is returned, `runs[r]` and `runs[r + 1]` must be merged next. `None` means the stack is
    /// balanced and the next run can be collected.
    ///
    /// TimSort is infamous for its buggy implementations, as described here:
    /// http://envisage-project.eu/timsort-specification-and-verification/
    ///
    /// Enforcing the invariants on just the top three runs is not sufficient to ensure they hold
    /// for *all* runs on the stack, so the top four are checked. While flushing every call
    /// demands a merge until a single run is left.
    pub fn next_merge(&self, phase: Phase) -> Option<usize> {
        let runs = &self.runs;
        let n = runs.len();
        if n < 2 {
            return None;
        }

        let needs_merge = phase == Phase::Flushing
            || runs[n - 2].len <= runs[n - 1].len
            || (n >= 3 && runs[n - 3].len <= runs[n - 2].len + runs[n - 1].len)
            || (n >= 4 && runs[n - 4].len <= runs[n - 3].len + runs[n - 2].len);

        if !needs_merge {
            None
        } else if n >= 3 && runs[n - 3].len < runs[n - 1].len {
            Some(n - 3)
        } else {
            Some(n - 2)
        }
    }

    /// The run covering the whole sequence once everything is merged.
    pub fn single(&self) -> Option<Run<P>> {
        match self.runs.as_slice() {
            [run] => Some(*run),
            _ => None,
        }
    }

    pub fn pair(&self, r: usize) -> (Run<P>, Run<P>) {
        (self.runs[r], self.runs[r + 1])
    }

    /// Replaces `runs[r]` and `runs[r + 1]` with the run they were merged into.
    pub fn merged(&mut self, r: usize) {
        let right = self.runs.remove(r + 1);
        self.runs[r].len += right.len;
    }

    /// Whether every run is longer than the sum of the next two, and longer than the next one.
    #[cfg(feature = "audit")]
    pub fn is_balanced(&self) -> bool {
        let runs = &self.runs;
        (0..runs.len()).all(|i| {
            let next = runs.get(i + 1).map_or(0, |r| r.len);
            let after = runs.get(i + 2).map_or(0, |r| r.len);
            runs[i].len > next && (i + 2 >= runs.len() || runs[i].len > next + after)
        })
    }
}
