use std::time::{Duration, Instant};

use strata_listing::{ListingContext, ListingError};
use tokio_util::sync::CancellationToken;

use crate::error::{TraverseError, TraverseResult};

/// Cancellation and deadline state shared by every call in one traversal.
///
/// The context is cloned into nested traversers; all clones observe the same
/// token. The account traverser never checks it itself, it hands the
/// [`ListingContext`] inside to every listing call and the whole context to
/// nested traversals.
#[derive(Clone, Debug, Default)]
pub struct TraversalContext {
    listing: ListingContext,
}

impl TraversalContext {
    /// A context with a fresh token and no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context driven by an existing token.
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            listing: ListingContext::with_token(cancel),
        }
    }

    /// Set a deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(self, deadline: Instant) -> Self {
        Self {
            listing: self.listing.with_deadline(deadline),
        }
    }

    /// The token and deadline as passed to a [`ContainerLister`].
    ///
    /// [`ContainerLister`]: strata_listing::ContainerLister
    pub fn listing(&self) -> &ListingContext {
        &self.listing
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        self.listing.cancel_token()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.listing.deadline()
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.listing.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.listing.is_cancelled()
    }

    /// Fail if the context was cancelled or its deadline has passed.
    pub fn check(&self) -> TraverseResult<()> {
        self.listing.check().map_err(|err| match err {
            ListingError::DeadlineExceeded => TraverseError::DeadlineExceeded,
            _ => TraverseError::Cancelled,
        })
    }
}
