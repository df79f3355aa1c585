use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::{ListingError, ListingResult};

/// Cancellation token and optional deadline handed to every listing call.
///
/// Clones share the token, so cancelling one cancels all of them.
#[derive(Clone, Debug, Default)]
pub struct ListingContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl ListingContext {
    /// A context with a fresh token and no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Set a deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fail if the token was cancelled or the deadline has passed.
    ///
    /// Cancellation wins when both hold.
    pub fn check(&self) -> ListingResult<()> {
        if self.cancel.is_cancelled() {
            return Err(ListingError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ListingError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_passes() {
        assert!(ListingContext::new().check().is_ok());
    }

    #[test]
    fn shared_token_cancels_every_clone() {
        let token = CancellationToken::new();
        let ctx = ListingContext::with_token(token.clone());
        let clone = ctx.clone();
        token.cancel();
        assert!(matches!(clone.check(), Err(ListingError::Cancelled)));
    }

    #[test]
    fn elapsed_deadline_fails() {
        let ctx = ListingContext::new().with_deadline(Instant::now());
        assert!(matches!(ctx.check(), Err(ListingError::DeadlineExceeded)));
    }

    #[test]
    fn cancellation_reported_before_deadline() {
        let ctx = ListingContext::new().with_deadline(Instant::now());
        ctx.cancel();
        assert!(matches!(ctx.check(), Err(ListingError::Cancelled)));
    }
}
