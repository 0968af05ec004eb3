use thiserror::Error;

/// Configuration errors reported by the [`Builder`](crate::Builder) before any source is pulled.
///
/// Faults raised by the sources themselves are not wrapped: a fallible merge yields the source's
/// own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MergeError {
    /// No primary source was given.
    #[error("merge requires a primary source")]
    MissingPrimary,
    /// The collection of other sources was never supplied (an empty one is fine).
    #[error("merge requires a collection of other sources, even if it is empty")]
    MissingOthers,
}

/// Result type alias for building merges.
pub type Result<T> = core::result::Result<T, MergeError>;
