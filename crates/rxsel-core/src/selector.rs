#![forbid(unsafe_code)]

//! The memoized selector.
//!
//! # Design
//!
//! A [`Selector`] owns an ordered extractor pipeline, one combiner, one
//! equality strategy and a private [`MemoRecord`]. Every invocation:
//!
//! 1. runs the extractors in order against `(state, params)`;
//! 2. compares the extracted tuple position by position with the tuple from
//!    the last successful run;
//! 3. on a match returns a clone of the cached result (cache hit), otherwise
//!    runs the combiner and, only if it returns `Ok`, commits the new
//!    `(args, result)` pair (cache miss).
//!
//! Selectors are built through [`SelectorBuilder`](crate::SelectorBuilder)
//! (typed inputs, arity checked by the compiler) or
//! [`Selector::from_list`] (uniform inputs, arity checked at construction).
//!
//! # Invariants
//!
//! 1. The combiner runs at most once per invocation, and never on a hit.
//! 2. A hit never mutates the record.
//! 3. A failing extractor or combiner leaves the record exactly as it was.
//! 4. `recomputations()` increments by exactly 1 per committed miss.
//!
//! # Failure Modes
//!
//! - **Extractor returns `Err`**: later extractors are skipped, the error is
//!   returned unchanged.
//! - **Combiner returns `Err`**: the error is returned unchanged and the next
//!   invocation compares against the last *successful* tuple.
//! - **Extractor or combiner panics**: the panic unwinds through the caller.
//!   The record lock is poisoned but the record itself is intact (nothing is
//!   written before the combiner returns), so the next invocation recovers the
//!   lock and carries on.
//!
//! # Concurrency
//!
//! The record sits behind a [`Mutex`] held from comparison through commit,
//! so a selector whose parts are `Send` is `Sync` and may back a transform
//! fed from several threads. Re-entering the same selector from one of its
//! own extractors or its combiner deadlocks.

use std::convert::Infallible;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use crate::logging::{debug, trace, warn_event};
use crate::memo::MemoRecord;

pub(crate) type ExtractFn<S, P, V, E> = Box<dyn Fn(&S, &P) -> Result<V, E> + Send + Sync>;
pub(crate) type CombineFn<V, R, E> = Box<dyn Fn(&V) -> Result<R, E> + Send + Sync>;
pub(crate) type EqualFn<V> = Box<dyn Fn(&V, &V) -> bool + Send + Sync>;

/// A memoized callable from `(state, params)` to `R`.
///
/// `V` is the tuple of extracted values (a Rust tuple for typed selectors, a
/// `Vec` for list selectors). `E` is the error type shared by extractors and
/// combiner; it defaults to [`Infallible`]. `P` carries extra per-call
/// parameters and defaults to `()`.
pub struct Selector<S, R, V, E = Infallible, P = ()> {
    arity: usize,
    extract: ExtractFn<S, P, V, E>,
    combine: CombineFn<V, R, E>,
    equal: EqualFn<V>,
    memo: Mutex<MemoRecord<V, R>>,
}

impl<S, R, V, E, P> Selector<S, R, V, E, P> {
    pub(crate) fn from_parts(
        arity: usize,
        extract: ExtractFn<S, P, V, E>,
        combine: CombineFn<V, R, E>,
        equal: EqualFn<V>,
    ) -> Self {
        Self {
            arity,
            extract,
            combine,
            equal,
            memo: Mutex::new(MemoRecord::default()),
        }
    }

    /// Number of extractors feeding the combiner.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Whether at least one combiner run has been committed.
    #[must_use]
    pub fn is_warm(&self) -> bool {
        self.lock().is_warm()
    }

    /// Number of committed combiner runs so far.
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.lock().recomputations()
    }

    fn lock(&self) -> MutexGuard<'_, MemoRecord<V, R>> {
        self.memo.lock().unwrap_or_else(|poisoned| {
            // Commit happens after the combiner returns, so a panic in user
            // code cannot have left a partial entry behind.
            warn_event!(message = "selector.poisoned", arity = self.arity);
            self.memo.clear_poison();
            poisoned.into_inner()
        })
    }
}

impl<S, R: Clone, V, E, P> Selector<S, R, V, E, P> {
    /// Evaluate the selector against `state` and extra `params`.
    ///
    /// Returns the cached result when every extracted value equals the one
    /// from the last successful run; otherwise runs the combiner and commits
    /// its result. Extractor and combiner errors are returned unchanged and
    /// never touch the cache.
    pub fn try_select_with(&self, state: &S, params: &P) -> Result<R, E> {
        let args = match (self.extract)(state, params) {
            Ok(args) => args,
            Err(err) => {
                trace!(message = "selector.extractor_failed", arity = self.arity);
                return Err(err);
            }
        };

        let mut memo = self.lock();
        if let Some(cached) = memo.lookup(&args, &self.equal) {
            trace!(message = "selector.hit", arity = self.arity);
            return Ok(cached.clone());
        }

        let result = match (self.combine)(&args) {
            Ok(result) => result,
            Err(err) => {
                trace!(message = "selector.combiner_failed", arity = self.arity);
                return Err(err);
            }
        };

        memo.commit(args, result.clone());
        debug!(
            message = "selector.recompute",
            arity = self.arity,
            recomputations = memo.recomputations()
        );
        Ok(result)
    }
}

impl<S, R: Clone, V, E> Selector<S, R, V, E, ()> {
    /// Evaluate the selector against `state`.
    pub fn try_select(&self, state: &S) -> Result<R, E> {
        self.try_select_with(state, &())
    }
}

impl<S, R: Clone, V, P> Selector<S, R, V, Infallible, P> {
    /// Evaluate an infallible selector against `state` and extra `params`.
    pub fn select_with(&self, state: &S, params: &P) -> R {
        match self.try_select_with(state, params) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }
}

impl<S, R: Clone, V> Selector<S, R, V, Infallible, ()> {
    /// Evaluate an infallible selector against `state`.
    pub fn select(&self, state: &S) -> R {
        self.select_with(state, &())
    }
}

impl<S, R: fmt::Debug, V: fmt::Debug, E, P> fmt::Debug for Selector<S, R, V, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let memo = self.lock();
        f.debug_struct("Selector")
            .field("arity", &self.arity)
            .field("memo", &*memo)
            .finish()
    }
}
