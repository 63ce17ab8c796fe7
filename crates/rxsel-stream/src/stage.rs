//! The per-emission stage contract.
//!
//! A [`Stage`] maps one borrowed input to one output or one error. Stages
//! are synchronous: nothing is buffered, dropped or batched, so a host that
//! calls `apply` in emission order sees results in emission order.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use rxsel_core::Selector;

/// One synchronous pipeline step.
pub trait Stage<In> {
    /// Value forwarded downstream.
    type Output;
    /// Error routed to the host's error channel.
    type Error;

    /// Process one emission.
    fn apply(&self, input: &In) -> Result<Self::Output, Self::Error>;

    /// Feed this stage's output into `next`.
    fn then<B>(self, next: B) -> Chain<Self, B>
    where
        Self: Sized,
        B: Stage<Self::Output, Error = Self::Error>,
    {
        Chain { first: self, second: next }
    }
}

impl<S, R: Clone, V, E> Stage<S> for Selector<S, R, V, E, ()> {
    type Output = R;
    type Error = E;

    fn apply(&self, input: &S) -> Result<R, E> {
        self.try_select(input)
    }
}

impl<In, T: Stage<In> + ?Sized> Stage<In> for &T {
    type Output = T::Output;
    type Error = T::Error;

    fn apply(&self, input: &In) -> Result<Self::Output, Self::Error> {
        (**self).apply(input)
    }
}

/// Two stages run back to back. Built by [`Stage::then`].
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<In, A, B> Stage<In> for Chain<A, B>
where
    A: Stage<In>,
    B: Stage<A::Output, Error = A::Error>,
{
    type Output = B::Output;
    type Error = A::Error;

    fn apply(&self, input: &In) -> Result<Self::Output, Self::Error> {
        let mid = self.first.apply(input)?;
        self.second.apply(&mid)
    }
}

/// A plain, unmemoized per-emission function.
///
/// The error type is whatever the surrounding chain uses; a `Map` never
/// produces one.
pub struct Map<F, E = Infallible> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

/// Wrap `f` as a [`Stage`].
pub fn map<F, E>(f: F) -> Map<F, E> {
    Map {
        f,
        _error: PhantomData,
    }
}

impl<F: Clone, E> Clone for Map<F, E> {
    fn clone(&self) -> Self {
        map(self.f.clone())
    }
}

impl<F, E> fmt::Debug for Map<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Map(..)")
    }
}

impl<In, Out, F, E> Stage<In> for Map<F, E>
where
    F: Fn(&In) -> Out,
{
    type Output = Out;
    type Error = E;

    fn apply(&self, input: &In) -> Result<Out, E> {
        Ok((self.f)(input))
    }
}
