#![forbid(unsafe_code)]

//! rxsel: memoized selectors and the pipeline stage that carries them.
//!
//! `use rxsel::prelude::*;` brings in everything needed to build a selector
//! and, with the default `stream` feature, to attach it to a pipeline.
//!
//! ```
//! use rxsel::prelude::*;
//!
//! let total = SelectorBuilder::new()
//!     .input(|cart: &Vec<u32>| cart.len())
//!     .input(|cart: &Vec<u32>| cart.iter().sum::<u32>())
//!     .build(|count, sum| format!("{count} items, {sum} total"));
//! assert_eq!(total.select(&vec![3, 4]), "2 items, 7 total");
//! ```

pub use rxsel_core::{BuildError, Selector, SelectorBuilder};
#[cfg(feature = "stream")]
pub use rxsel_stream::Transform;

pub mod prelude {
    pub use rxsel_core as core;
    #[cfg(feature = "stream")]
    pub use rxsel_stream as stream;

    pub use rxsel_core::list::{ListCombiner, SelectorOptions, extractor, try_extractor_with};
    pub use rxsel_core::{
        BuildError, EqFn, Equality, Identical, Identity, Selector, SelectorBuilder, ValueEq,
    };
    #[cfg(feature = "stream")]
    pub use rxsel_stream::{Broadcast, IntoTransform, Stage, Transform, TransformIterExt, map};
}
