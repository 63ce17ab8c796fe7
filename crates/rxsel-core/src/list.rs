//! Selectors over a runtime-length extractor list.
//!
//! When the number of inputs is only known at runtime (all inputs share one
//! value type), build the selector from a `Vec` of extractors and a
//! [`ListCombiner`] that declares how many arguments it expects. The counts are
//! compared once, at construction, and a mismatch is reported as
//! [`BuildError::ArityMismatch`] before the selector can ever run.
//!
//! ```
//! use rxsel_core::list::{ListCombiner, SelectorOptions, extractor};
//! use rxsel_core::{BuildError, Selector};
//!
//! let inputs = vec![extractor(|s: &[f64; 2]| s[0]), extractor(|s: &[f64; 2]| s[1])];
//! let bad = Selector::from_list(
//!     inputs,
//!     ListCombiner::new(3, |v: &[f64]| v.iter().sum::<f64>()),
//!     SelectorOptions::default(),
//! );
//! assert_eq!(
//!     bad.err(),
//!     Some(BuildError::ArityMismatch { extractors: 2, combiner: 3 })
//! );
//! ```

use std::convert::Infallible;
use std::fmt;

use crate::builder::Extractor;
use crate::equality::{Equality, Identity};
use crate::error::BuildError;
use crate::selector::Selector;

/// Wrap a state-only infallible function as a list extractor.
pub fn extractor<S, V, E, F>(f: F) -> Extractor<S, (), V, E>
where
    S: 'static,
    V: 'static,
    E: 'static,
    F: Fn(&S) -> V + Send + Sync + 'static,
{
    Box::new(move |state: &S, _: &()| Ok(f(state)))
}

/// Wrap a fallible `(state, params)` function as a list extractor.
pub fn try_extractor_with<S, P, V, E, F>(f: F) -> Extractor<S, P, V, E>
where
    F: Fn(&S, &P) -> Result<V, E> + Send + Sync + 'static,
{
    Box::new(f)
}

/// A combiner over a slice of extracted values with a declared arity.
pub struct ListCombiner<V, R, E = Infallible> {
    arity: usize,
    combine: Box<dyn Fn(&[V]) -> Result<R, E> + Send + Sync>,
}

impl<V: 'static, R: 'static> ListCombiner<V, R, Infallible> {
    /// Infallible combiner expecting exactly `arity` values.
    pub fn new<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&[V]) -> R + Send + Sync + 'static,
    {
        Self {
            arity,
            combine: Box::new(move |values: &[V]| Ok(f(values))),
        }
    }
}

impl<V, R, E> ListCombiner<V, R, E> {
    /// Fallible combiner expecting exactly `arity` values.
    pub fn try_new<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&[V]) -> Result<R, E> + Send + Sync + 'static,
    {
        Self {
            arity,
            combine: Box::new(f),
        }
    }

    /// Declared parameter count.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl<V, R, E> fmt::Debug for ListCombiner<V, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCombiner")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Construction options.
///
/// `Default` is only implemented for the [`Identity`] strategy, so
/// `SelectorOptions::default()` needs no type annotation.
#[derive(Debug, Clone, Copy)]
pub struct SelectorOptions<Q = Identity> {
    /// Elementwise comparison for extracted values.
    pub equality: Q,
}

impl Default for SelectorOptions<Identity> {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorOptions<Identity> {
    /// Options comparing with [`Identity`].
    #[must_use]
    pub fn new() -> Self {
        Self { equality: Identity }
    }

    /// Options with a custom equality strategy.
    pub fn with_equality<Q>(equality: Q) -> SelectorOptions<Q> {
        SelectorOptions { equality }
    }
}

impl<S, R, V, E, P> Selector<S, R, Vec<V>, E, P>
where
    S: 'static,
    P: 'static,
    V: 'static,
    R: 'static,
    E: 'static,
{
    /// Build a selector from a runtime-length extractor list.
    ///
    /// Fails with [`BuildError::NoInputs`] for an empty list and with
    /// [`BuildError::ArityMismatch`] when the combiner's declared arity differs
    /// from the number of extractors.
    pub fn from_list<Q>(
        extractors: Vec<Extractor<S, P, V, E>>,
        combiner: ListCombiner<V, R, E>,
        options: SelectorOptions<Q>,
    ) -> Result<Self, BuildError>
    where
        Q: Equality<V> + Send + Sync + 'static,
    {
        if extractors.is_empty() {
            return Err(BuildError::NoInputs);
        }
        if extractors.len() != combiner.arity {
            return Err(BuildError::ArityMismatch {
                extractors: extractors.len(),
                combiner: combiner.arity,
            });
        }

        let arity = extractors.len();
        let combine = combiner.combine;
        let equality = options.equality;
        Ok(Selector::from_parts(
            arity,
            Box::new(move |state: &S, params: &P| {
                extractors
                    .iter()
                    .map(|extract| extract(state, params))
                    .collect::<Result<Vec<V>, E>>()
            }),
            Box::new(move |values: &Vec<V>| combine(values.as_slice())),
            Box::new(move |new: &Vec<V>, last: &Vec<V>| {
                new.len() == last.len()
                    && new.iter().zip(last).all(|(a, b)| equality.equals(a, b))
            }),
        ))
    }
}
