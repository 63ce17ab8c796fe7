//! Typed selector construction.
//!
//! [`SelectorBuilder`] collects between one and nine extractors, each with its
//! own output type, and finishes with a combiner whose parameters line up with
//! the extractors in the order they were added:
//!
//! ```
//! use rxsel_core::SelectorBuilder;
//!
//! struct Shop {
//!     prices: Vec<f64>,
//!     tax_percent: f64,
//! }
//!
//! let tax = SelectorBuilder::new()
//!     .input(|shop: &Shop| shop.prices.iter().sum::<f64>())
//!     .input(|shop: &Shop| shop.tax_percent)
//!     .build(|subtotal, tax_percent| subtotal * (tax_percent / 100.0));
//!
//! let shop = Shop { prices: vec![1.2, 0.95], tax_percent: 8.0 };
//! assert!((tax.select(&shop) - 0.172).abs() < 1e-9);
//! ```
//!
//! `build` only exists for a builder holding as many extractors as the
//! combiner takes parameters, so an arity mismatch is a compile error rather
//! than a runtime one.
//!
//! The error type and the extra-parameter type are fixed before the first
//! extractor is added, via [`SelectorBuilder::fallible`] and
//! [`SelectorBuilder::params`].

use std::convert::Infallible;
use std::marker::PhantomData;

use crate::equality::{Equality, Identity};
use crate::selector::Selector;

/// One boxed extractor: `(state, params) -> Result<T, E>`.
pub type Extractor<S, P, T, E = Infallible> = Box<dyn Fn(&S, &P) -> Result<T, E> + Send + Sync>;

/// Appends one element to a tuple type.
///
/// Implemented for tuples of up to eight elements, which caps a typed
/// selector at nine extractors.
pub trait Push<T> {
    /// The tuple with `T` appended.
    type Output;

    /// Append `item`.
    fn push(self, item: T) -> Self::Output;
}

macro_rules! impl_push {
    ($($name:ident),*) => {
        impl<$($name,)* T> Push<T> for ($($name,)*) {
            type Output = ($($name,)* T,);

            #[allow(non_snake_case)]
            fn push(self, item: T) -> Self::Output {
                let ($($name,)*) = self;
                ($($name,)* item,)
            }
        }
    };
}

impl_push!();
impl_push!(A);
impl_push!(A, B);
impl_push!(A, B, C);
impl_push!(A, B, C, D);
impl_push!(A, B, C, D, F);
impl_push!(A, B, C, D, F, G);
impl_push!(A, B, C, D, F, G, H);
impl_push!(A, B, C, D, F, G, H, I);

/// Accumulates extractors for a typed [`Selector`].
///
/// `X` is the tuple of extractors added so far and `Q` the equality strategy.
#[must_use]
pub struct SelectorBuilder<S, P, E, X, Q> {
    inputs: X,
    equality: Q,
    _marker: PhantomData<fn(&S, &P) -> E>,
}

impl<S> SelectorBuilder<S, (), Infallible, (), Identity> {
    /// Start a builder with no extra parameters, infallible extractors and
    /// the [`Identity`] equality strategy.
    pub fn new() -> Self {
        Self {
            inputs: (),
            equality: Identity,
            _marker: PhantomData,
        }
    }
}

impl<S> Default for SelectorBuilder<S, (), Infallible, (), Identity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E, Q> SelectorBuilder<S, (), E, (), Q> {
    /// Declare the type of the extra parameters passed alongside the state.
    pub fn params<P>(self) -> SelectorBuilder<S, P, E, (), Q> {
        SelectorBuilder {
            inputs: (),
            equality: self.equality,
            _marker: PhantomData,
        }
    }
}

impl<S, P, Q> SelectorBuilder<S, P, Infallible, (), Q> {
    /// Declare the error type shared by fallible extractors and the combiner.
    pub fn fallible<E>(self) -> SelectorBuilder<S, P, E, (), Q> {
        SelectorBuilder {
            inputs: (),
            equality: self.equality,
            _marker: PhantomData,
        }
    }
}

impl<S, P, E, X, Q> SelectorBuilder<S, P, E, X, Q>
where
    S: 'static,
    P: 'static,
    E: 'static,
{
    /// Add an extractor reading only the state.
    pub fn input<T, F>(self, extractor: F) -> SelectorBuilder<S, P, E, X::Output, Q>
    where
        X: Push<Extractor<S, P, T, E>>,
        F: Fn(&S) -> T + Send + Sync + 'static,
        T: 'static,
    {
        let boxed: Extractor<S, P, T, E> = Box::new(move |state: &S, _: &P| Ok(extractor(state)));
        self.push(boxed)
    }

    /// Add an extractor reading the state and the extra parameters.
    pub fn input_with<T, F>(self, extractor: F) -> SelectorBuilder<S, P, E, X::Output, Q>
    where
        X: Push<Extractor<S, P, T, E>>,
        F: Fn(&S, &P) -> T + Send + Sync + 'static,
        T: 'static,
    {
        let boxed: Extractor<S, P, T, E> =
            Box::new(move |state: &S, params: &P| Ok(extractor(state, params)));
        self.push(boxed)
    }

    /// Add an extractor that may fail.
    pub fn try_input<T, F>(self, extractor: F) -> SelectorBuilder<S, P, E, X::Output, Q>
    where
        X: Push<Extractor<S, P, T, E>>,
        F: Fn(&S) -> Result<T, E> + Send + Sync + 'static,
        T: 'static,
    {
        let boxed: Extractor<S, P, T, E> = Box::new(move |state: &S, _: &P| extractor(state));
        self.push(boxed)
    }

    /// Add an extractor that reads the extra parameters and may fail.
    pub fn try_input_with<T, F>(self, extractor: F) -> SelectorBuilder<S, P, E, X::Output, Q>
    where
        X: Push<Extractor<S, P, T, E>>,
        F: Fn(&S, &P) -> Result<T, E> + Send + Sync + 'static,
        T: 'static,
    {
        let boxed: Extractor<S, P, T, E> = Box::new(extractor);
        self.push(boxed)
    }

    /// Replace the equality strategy used to compare extracted values.
    pub fn equality<Q2>(self, equality: Q2) -> SelectorBuilder<S, P, E, X, Q2> {
        SelectorBuilder {
            inputs: self.inputs,
            equality,
            _marker: PhantomData,
        }
    }

    fn push<T>(self, extractor: Extractor<S, P, T, E>) -> SelectorBuilder<S, P, E, X::Output, Q>
    where
        X: Push<Extractor<S, P, T, E>>,
    {
        SelectorBuilder {
            inputs: self.inputs.push(extractor),
            equality: self.equality,
            _marker: PhantomData,
        }
    }
}

macro_rules! impl_build {
    ($arity:literal; $($idx:tt: $T:ident, $x:ident, $v:ident);+) => {
        impl<S, P, E, Q, $($T),+> SelectorBuilder<S, P, E, ($(Extractor<S, P, $T, E>,)+), Q>
        where
            S: 'static,
            P: 'static,
            E: 'static,
            Q: Send + Sync + 'static,
            $($T: 'static, Q: Equality<$T>,)+
        {
            /// Finish with an infallible combiner.
            pub fn build<R, F>(self, combiner: F) -> Selector<S, R, ($($T,)+), E, P>
            where
                F: Fn($(&$T),+) -> R + Send + Sync + 'static,
                R: 'static,
            {
                self.try_build(move |$($v),+| Ok(combiner($($v),+)))
            }

            /// Finish with a combiner that may fail.
            pub fn try_build<R, F>(self, combiner: F) -> Selector<S, R, ($($T,)+), E, P>
            where
                F: Fn($(&$T),+) -> Result<R, E> + Send + Sync + 'static,
                R: 'static,
            {
                let ($($x,)+) = self.inputs;
                let equality = self.equality;
                Selector::from_parts(
                    $arity,
                    Box::new(move |state: &S, params: &P| Ok(($($x(state, params)?,)+))),
                    Box::new(move |values: &($($T,)+)| {
                        let ($($v,)+) = values;
                        combiner($($v),+)
                    }),
                    Box::new(move |new: &($($T,)+), last: &($($T,)+)| {
                        true $(&& <Q as Equality<$T>>::equals(&equality, &new.$idx, &last.$idx))+
                    }),
                )
            }
        }
    };
}

impl_build!(1; 0: T0, x0, v0);
impl_build!(2; 0: T0, x0, v0; 1: T1, x1, v1);
impl_build!(3; 0: T0, x0, v0; 1: T1, x1, v1; 2: T2, x2, v2);
impl_build!(4; 0: T0, x0, v0; 1: T1, x1, v1; 2: T2, x2, v2; 3: T3, x3, v3);
impl_build!(5; 0: T0, x0, v0; 1: T1, x1, v1; 2: T2, x2, v2; 3: T3, x3, v3; 4: T4, x4, v4);
impl_build!(6; 0: T0, x0, v0; 1: T1, x1, v1; 2: T2, x2, v2; 3: T3, x3, v3; 4: T4, x4, v4;
    5: T5, x5, v5);
impl_build!(7; 0: T0, x0, v0; 1: T1, x1, v1; 2: T2, x2, v2; 3: T3, x3, v3; 4: T4, x4, v4;
    5: T5, x5, v5; 6: T6, x6, v6);
impl_build!(8; 0: T0, x0, v0; 1: T1, x1, v1; 2: T2, x2, v2; 3: T3, x3, v3; 4: T4, x4, v4;
    5: T5, x5, v5; 6: T6, x6, v6; 7: T7, x7, v7);
impl_build!(9; 0: T0, x0, v0; 1: T1, x1, v1; 2: T2, x2, v2; 3: T3, x3, v3; 4: T4, x4, v4;
    5: T5, x5, v5; 6: T6, x6, v6; 7: T7, x7, v7; 8: T8, x8, v8);
