/// Errors from container listing operations.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// The caller cancelled the operation.
    #[error("listing cancelled")]
    Cancelled,

    /// The caller's deadline passed before the listing completed.
    #[error("listing deadline exceeded")]
    DeadlineExceeded,

    /// The service rejected or failed the request (network, auth, throttling).
    #[error("service error {status} ({code}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    /// A continuation token the backend does not recognise.
    #[error("invalid marker: {0}")]
    InvalidMarker(String),

    /// `fetch_next` was called on a cursor with no pages left.
    #[error("listing already exhausted")]
    Exhausted,

    /// A listing configuration that can never make progress.
    #[error("invalid listing config: {0}")]
    InvalidConfig(String),

    /// An account manifest could not be parsed.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// I/O error while reading a manifest.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ListingError {
    /// Creates a service error.
    pub fn service(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if the error was caused by cancellation or a deadline.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

/// Result alias for listing operations.
pub type ListingResult<T> = Result<T, ListingError>;
