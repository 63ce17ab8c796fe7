//! Construction errors.
//!
//! Failures *inside* an invocation are not represented here: an extractor or
//! combiner error is the caller's own error type and is returned unchanged.

use thiserror::Error;

/// Why a selector could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The combiner's declared argument count differs from the number of
    /// extractors. Argument lists are never padded or truncated.
    #[error("combiner takes {combiner} arguments but {extractors} extractors were supplied")]
    ArityMismatch { extractors: usize, combiner: usize },

    /// A selector needs at least one extractor.
    #[error("selector built with an empty extractor list")]
    NoInputs,
}
