use strata_listing::ListingError;
use strata_types::LocationError;

use crate::pattern::PatternError;

/// Errors from traversal operations.
///
/// Errors returned by a nested traverser are this same type and are passed
/// up unchanged, so a caller can match on the kind that was first raised.
#[derive(Debug, thiserror::Error)]
pub enum TraverseError {
    /// A container listing call failed.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// The container-name pattern is malformed.
    #[error("invalid container name pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: PatternError,
    },

    /// The root URL could not be split into account and container parts.
    #[error(transparent)]
    InvalidLocation(#[from] LocationError),

    /// A container-level traverser was pointed at a container that does not exist.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("traversal cancelled")]
    Cancelled,

    #[error("traversal deadline exceeded")]
    DeadlineExceeded,

    /// A caller-supplied processor failed.
    #[error("processor error: {0}")]
    Processor(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TraverseError {
    /// Wrap an arbitrary processor failure.
    pub fn processor(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Processor(err.into())
    }

    /// Returns `true` if the traversal stopped because of cancellation or a deadline.
    pub fn is_cancellation(&self) -> bool {
        match self {
            Self::Cancelled | Self::DeadlineExceeded => true,
            Self::Listing(e) => e.is_cancellation(),
            _ => false,
        }
    }
}

/// Result alias for traversal operations.
pub type TraverseResult<T> = Result<T, TraverseError>;
