//! Per-selector cache record.
//!
//! A [`MemoRecord`] holds the extracted-value tuple and the result of the most
//! recent *successful* combiner run. It starts cold and only changes through
//! [`MemoRecord::commit`], which the selector calls after the combiner has
//! returned `Ok`. A failed run therefore never leaves a half-written entry.
//!
//! # Invariants
//!
//! 1. Cold (`is_warm() == false`) implies no args and no result are stored.
//! 2. Warm implies both are stored and come from the same combiner run.
//! 3. `recomputations` equals the number of commits.

/// Last committed `(args, result)` pair for one selector.
#[derive(Debug)]
pub(crate) struct MemoRecord<V, R> {
    /// `None` while cold. Args and result are stored together so they can
    /// never drift apart.
    last: Option<(V, R)>,
    recomputations: u64,
}

impl<V, R> Default for MemoRecord<V, R> {
    fn default() -> Self {
        Self {
            last: None,
            recomputations: 0,
        }
    }
}

impl<V, R> MemoRecord<V, R> {
    /// Return the cached result if `args` matches the committed args.
    pub(crate) fn lookup(&self, args: &V, equal: impl Fn(&V, &V) -> bool) -> Option<&R> {
        match &self.last {
            Some((last_args, last_result)) if equal(args, last_args) => Some(last_result),
            _ => None,
        }
    }

    /// Replace the committed entry with a fresh `(args, result)` pair.
    pub(crate) fn commit(&mut self, args: V, result: R) {
        self.last = Some((args, result));
        self.recomputations += 1;
    }

    #[inline]
    pub(crate) fn is_warm(&self) -> bool {
        self.last.is_some()
    }

    #[inline]
    pub(crate) fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
