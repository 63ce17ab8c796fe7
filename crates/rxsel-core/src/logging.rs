//! Logging shims.
//!
//! With the `tracing` feature the macros are `tracing`'s own. Without it they
//! expand to nothing, so call sites never need a `cfg`.
//!
//! The warn-level macro is exported as `warn_event`: a local `macro_rules!
//! warn` collides with the built-in `#[warn]` attribute.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace, warn as warn_event};

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn_event {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {debug, trace, warn_event};

#[cfg(test)]
mod tests {
    use super::{debug, trace, warn_event};

    #[test]
    fn shims_accept_structured_fields() {
        let arity = 2_usize;
        trace!(message = "selector.hit", arity);
        debug!(message = "selector.recompute", arity, recomputations = 1_u64);
        warn_event!(message = "selector.poisoned", arity = arity);
        assert_eq!(arity, 2);
    }
}
