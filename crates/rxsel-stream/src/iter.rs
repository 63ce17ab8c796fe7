//! Driving a stage from an iterator.
//!
//! ```
//! use rxsel_core::SelectorBuilder;
//! use rxsel_stream::{IntoTransform, TransformIterExt};
//!
//! let label = SelectorBuilder::new()
//!     .input(|n: &u32| *n % 2 == 0)
//!     .build(|even| if *even { "even" } else { "odd" })
//!     .into_transform();
//!
//! let out: Vec<_> = [2_u32, 4, 5].into_iter().through(label.clone()).collect();
//! assert_eq!(out, vec![Ok("even"), Ok("even"), Ok("odd")]);
//! assert_eq!(label.recomputations(), 2);
//! ```

use crate::stage::Stage;

/// Iterator returned by [`TransformIterExt::through`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Through<I, St> {
    inner: I,
    stage: St,
}

impl<I, St> Iterator for Through<I, St>
where
    I: Iterator,
    St: Stage<I::Item>,
{
    type Item = Result<St::Output, St::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(self.stage.apply(&item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, St> ExactSizeIterator for Through<I, St>
where
    I: ExactSizeIterator,
    St: Stage<I::Item>,
{
}

/// Pipe every item of an iterator through a [`Stage`].
pub trait TransformIterExt: Iterator + Sized {
    /// Apply `stage` to each item, one output per input, in order.
    fn through<St: Stage<Self::Item>>(self, stage: St) -> Through<Self, St> {
        Through { inner: self, stage }
    }
}

impl<I: Iterator> TransformIterExt for I {}
