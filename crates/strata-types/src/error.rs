use thiserror::Error;

/// Errors produced while parsing an account location.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("invalid account url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("account url has no host: {0}")]
    MissingHost(String),

    #[error("account url {0:?} cannot carry path segments")]
    CannotBeABase(String),
}
