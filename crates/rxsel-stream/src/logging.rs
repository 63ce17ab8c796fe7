//! Logging shim: `tracing::trace` with the feature, a no-op without it.

#[cfg(feature = "tracing")]
pub(crate) use tracing::trace;

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use trace;
