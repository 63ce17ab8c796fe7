#![forbid(unsafe_code)]

//! Core: memoized selectors built from ordered extractors and one combiner.
//!
//! A selector pulls a handful of values out of a state, compares them with
//! the values it saw on its last successful run and only calls the combiner
//! when something changed.
//!
//! - [`SelectorBuilder`]: typed construction, one to nine inputs.
//! - [`Selector::from_list`]: runtime-length construction with an arity check.
//! - [`equality`]: the strategies used to decide "changed".

pub mod builder;
pub mod equality;
pub mod error;
pub mod list;
mod logging;
mod memo;
pub mod selector;

pub use builder::{Extractor, SelectorBuilder};
pub use equality::{EqFn, Equality, Identical, Identity, ValueEq};
pub use error::BuildError;
pub use list::{ListCombiner, SelectorOptions};
pub use selector::Selector;
