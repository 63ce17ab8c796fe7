#![forbid(unsafe_code)]

//! Pipeline-stage adapter for memoized selectors.
//!
//! A [`Transform`] wraps exactly one [`Selector`](rxsel_core::Selector) and
//! turns it into a one-in/one-out stage that a push-based host can call once
//! per emission. Clones of a `Transform` share the selector, so fanning one
//! emission out to many consumers through one transform runs the combiner at
//! most once per distinct input tuple.
//!
//! # Surfaces
//!
//! - [`Stage`]: the per-emission contract, with [`Stage::then`] for
//!   composition and [`Map`] for plain functions.
//! - [`TransformIterExt`]: drive a stage from any iterator.
//! - [`Broadcast`]: a minimal synchronous fan-out source.

pub mod broadcast;
pub mod iter;
mod logging;
pub mod stage;
pub mod transform;

pub use broadcast::Broadcast;
pub use iter::{Through, TransformIterExt};
pub use stage::{Chain, Map, Stage, map};
pub use transform::{IntoTransform, Transform};
