//! The selector-backed pipeline stage.
//!
//! # Design
//!
//! [`Transform<S, R, E>`] owns one selector behind an [`Arc`]. Building a
//! transform builds its selector; cloning a transform hands out another
//! handle to the **same** selector and therefore the same cache. Two
//! transforms built separately never share a cache, even when they were
//! built from identical extractors.
//!
//! # Invariants
//!
//! 1. Every `apply` calls the selector exactly once, synchronously.
//! 2. Output order and cardinality equal input order and cardinality.
//! 3. All clones of one transform observe the same recomputation count.
//!
//! # Failure Modes
//!
//! - **Selector error**: returned from `apply` unchanged; routing it to an
//!   error channel is the host's job. The cache stays as it was.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use rxsel_core::list::{ListCombiner, SelectorOptions};
use rxsel_core::{BuildError, Equality, Extractor, Selector};

use crate::logging::trace;
use crate::stage::Stage;

/// Object-safe view of a selector with its value tuple erased.
trait Memoized<S>: Send + Sync {
    type Output;
    type Error;

    fn run(&self, state: &S) -> Result<Self::Output, Self::Error>;
    fn recomputations(&self) -> u64;
}

impl<S, R, V, E> Memoized<S> for Selector<S, R, V, E, ()>
where
    Selector<S, R, V, E, ()>: Send + Sync,
    R: Clone,
{
    type Output = R;
    type Error = E;

    fn run(&self, state: &S) -> Result<R, E> {
        self.try_select(state)
    }

    fn recomputations(&self) -> u64 {
        Selector::recomputations(self)
    }
}

/// A selector packaged as a shareable one-in/one-out stage.
pub struct Transform<S, R, E = Infallible> {
    selector: Arc<dyn Memoized<S, Output = R, Error = E>>,
}

impl<S, R, E> Clone for Transform<S, R, E> {
    fn clone(&self) -> Self {
        Self {
            selector: Arc::clone(&self.selector),
        }
    }
}

impl<S, R, E> fmt::Debug for Transform<S, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("recomputations", &self.recomputations())
            .field("handles", &Arc::strong_count(&self.selector))
            .finish()
    }
}

impl<S: 'static, R: Clone + 'static, E: 'static> Transform<S, R, E> {
    /// Wrap `selector`. The transform becomes its sole owner.
    pub fn new<V: 'static>(selector: Selector<S, R, V, E, ()>) -> Self
    where
        Selector<S, R, V, E, ()>: Send + Sync,
    {
        Self {
            selector: Arc::new(selector),
        }
    }

    /// Build a transform from a runtime-length extractor list.
    ///
    /// Performs the same construction-time checks as
    /// [`Selector::from_list`].
    pub fn from_list<V, Q>(
        extractors: Vec<Extractor<S, (), V, E>>,
        combiner: ListCombiner<V, R, E>,
        options: SelectorOptions<Q>,
    ) -> Result<Self, BuildError>
    where
        V: 'static,
        Q: Equality<V> + Send + Sync + 'static,
        Selector<S, R, Vec<V>, E, ()>: Send + Sync,
    {
        Selector::from_list(extractors, combiner, options).map(Self::new)
    }
}

impl<S, R, E> Transform<S, R, E> {
    /// Run the shared selector for one emission.
    pub fn apply(&self, state: &S) -> Result<R, E> {
        let result = self.selector.run(state);
        if result.is_err() {
            trace!(message = "transform.error");
        }
        result
    }

    /// Committed combiner runs of the shared selector.
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.selector.recomputations()
    }

    /// Whether `self` and `other` share one selector.
    #[must_use]
    pub fn shares_selector_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.selector, &other.selector)
    }
}

impl<S, R> Transform<S, R, Infallible> {
    /// Run an infallible transform for one emission.
    pub fn select(&self, state: &S) -> R {
        match self.apply(state) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }
}

impl<S, R, E> Stage<S> for Transform<S, R, E> {
    type Output = R;
    type Error = E;

    fn apply(&self, input: &S) -> Result<R, E> {
        Transform::apply(self, input)
    }
}

/// Conversion of a built selector into a [`Transform`].
pub trait IntoTransform<S, R, E> {
    /// Move the selector into a new transform.
    fn into_transform(self) -> Transform<S, R, E>;
}

impl<S, R, V, E> IntoTransform<S, R, E> for Selector<S, R, V, E, ()>
where
    S: 'static,
    R: Clone + 'static,
    V: 'static,
    E: 'static,
    Selector<S, R, V, E, ()>: Send + Sync,
{
    fn into_transform(self) -> Transform<S, R, E> {
        Transform::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxsel_core::SelectorBuilder;
    use rxsel_core::list::extractor;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn doubling(runs: Arc<AtomicU32>) -> Transform<u32, u32> {
        SelectorBuilder::new()
            .input(|n: &u32| *n)
            .build(move |n| {
                runs.fetch_add(1, Ordering::Relaxed);
                n * 2
            })
            .into_transform()
    }

    #[test]
    fn clones_share_one_cache() {
        let runs = Arc::new(AtomicU32::new(0));
        let transform = doubling(Arc::clone(&runs));
        let other = transform.clone();

        assert_eq!(transform.select(&4), 8);
        assert_eq!(other.select(&4), 8);
        assert_eq!(runs.load(Ordering::Relaxed), 1);
        assert!(transform.shares_selector_with(&other));
        assert_eq!(other.recomputations(), 1);
    }

    #[test]
    fn separate_builds_do_not_share() {
        let runs = Arc::new(AtomicU32::new(0));
        let first = doubling(Arc::clone(&runs));
        let second = doubling(Arc::clone(&runs));

        first.select(&4);
        second.select(&4);
        assert_eq!(runs.load(Ordering::Relaxed), 2);
        assert!(!first.shares_selector_with(&second));
    }

    #[test]
    fn from_list_checks_arity() {
        let built = Transform::from_list(
            vec![extractor(|n: &u8| *n)],
            ListCombiner::new(2, |v: &[u8]| v.len()),
            SelectorOptions::default(),
        );
        assert_eq!(
            built.err(),
            Some(BuildError::ArityMismatch {
                extractors: 1,
                combiner: 2
            })
        );
    }

    #[test]
    fn errors_pass_through_unchanged() {
        let transform = SelectorBuilder::new()
            .fallible::<&'static str>()
            .input(|n: &u8| *n)
            .try_build(|n| if *n == 0 { Err("zero") } else { Ok(100 / n) })
            .into_transform();
        assert_eq!(transform.apply(&0), Err("zero"));
        assert_eq!(transform.apply(&5), Ok(20));
        assert_eq!(transform.recomputations(), 1);
    }

    #[test]
    fn debug_reports_handles() {
        let transform = doubling(Arc::new(AtomicU32::new(0)));
        let _other = transform.clone();
        let dbg = format!("{transform:?}");
        assert!(dbg.contains("handles: 2"));
    }
}
