use strata_types::{ContainerItem, Marker};

use crate::context::ListingContext;
use crate::error::ListingResult;

/// One page of a container listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerPage {
    /// Items in listing order.
    pub items: Vec<ContainerItem>,
    /// Continuation token for the following page. `None` or empty ends the listing.
    pub next_marker: Option<String>,
}

/// Server-paged listing of the containers in one account.
///
/// All implementations must satisfy these invariants:
/// - A container name appears at most once across the pages of one listing.
/// - Items within a page, and pages within a listing, keep service order.
/// - The initial [`Marker`] requests the first page.
/// - A cancelled context fails the call with [`ListingError::Cancelled`].
/// - A context whose deadline has passed fails the call with
///   [`ListingError::DeadlineExceeded`].
///
/// [`ListingError::Cancelled`]: crate::ListingError::Cancelled
/// [`ListingError::DeadlineExceeded`]: crate::ListingError::DeadlineExceeded
pub trait ContainerLister: Send + Sync {
    /// Fetch the page that starts at `marker`.
    fn list_containers(
        &self,
        marker: &Marker,
        ctx: &ListingContext,
    ) -> ListingResult<ContainerPage>;
}
