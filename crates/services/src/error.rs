//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{CatalogError, SummaryError};
use storage::StorageError;

/// Errors emitted by distractor sampling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SamplingError {
    /// Fewer eligible elements than requested. Recoverable: the caller may
    /// reduce the draw or skip synthesis for the item.
    #[error("insufficient pool: needed {needed}, only {available} eligible")]
    InsufficientPool { needed: usize, available: usize },
}

/// Errors emitted by the session controller and game loop.
///
/// `InvalidState`, `OutOfRange`, `AlreadyAnswered` and `ResponseMismatch`
/// are contract violations: they indicate a wiring bug in the presentation
/// layer, never a user-facing condition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no items available for this mode")]
    Empty,

    #[error("operation on a terminal session")]
    InvalidState,

    #[error("cursor {cursor} is past the end of the working set ({len})")]
    OutOfRange { cursor: usize, len: usize },

    #[error("current item was already answered")]
    AlreadyAnswered,

    #[error("response kind does not match the current item")]
    ResponseMismatch,

    #[error("per-question countdown only applies to the timed mode")]
    NotTimed,

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
