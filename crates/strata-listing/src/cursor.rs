use strata_types::{ContainerItem, Marker};
use tracing::trace;

use crate::context::ListingContext;
use crate::error::{ListingError, ListingResult};
use crate::traits::ContainerLister;

/// Resumable position within a paged container listing.
///
/// The cursor is an explicit state object rather than an iterator so the
/// caller decides when to fetch and sees every error at the fetch site.
pub struct PageCursor<'a> {
    lister: &'a dyn ContainerLister,
    marker: Marker,
    pages_fetched: usize,
}

impl<'a> PageCursor<'a> {
    /// Start a cursor at the first page.
    pub fn new(lister: &'a dyn ContainerLister) -> Self {
        Self {
            lister,
            marker: Marker::new(),
            pages_fetched: 0,
        }
    }

    /// Returns `true` while another page may exist.
    ///
    /// Always `true` before the first fetch.
    pub fn has_more(&self) -> bool {
        self.marker.not_done()
    }

    /// Fetch the next page and advance.
    ///
    /// On error the cursor does not move, so the error is the caller's to
    /// handle; nothing is retried here.
    pub fn fetch_next(&mut self, ctx: &ListingContext) -> ListingResult<Vec<ContainerItem>> {
        if !self.has_more() {
            return Err(ListingError::Exhausted);
        }
        let page = self.lister.list_containers(&self.marker, ctx)?;
        self.marker = Marker::from_next(page.next_marker);
        self.pages_fetched += 1;
        trace!(
            page = self.pages_fetched,
            items = page.items.len(),
            more = self.marker.not_done(),
            "fetched container page"
        );
        Ok(page.items)
    }

    /// Number of pages fetched successfully so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// The current continuation state.
    pub fn marker(&self) -> &Marker {
        &self.marker
    }
}

impl std::fmt::Debug for PageCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCursor")
            .field("marker", &self.marker)
            .field("pages_fetched", &self.pages_fetched)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::traits::ContainerPage;

    /// Replays a fixed script of responses and records the markers it saw.
    struct ScriptedLister {
        responses: Mutex<Vec<ListingResult<ContainerPage>>>,
        seen: Mutex<Vec<Marker>>,
    }

    impl ScriptedLister {
        fn new(mut responses: Vec<ListingResult<ContainerPage>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ContainerLister for ScriptedLister {
        fn list_containers(
            &self,
            marker: &Marker,
            _ctx: &ListingContext,
        ) -> ListingResult<ContainerPage> {
            self.seen.lock().unwrap().push(marker.clone());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(ListingError::InvalidMarker("script exhausted".into())))
        }
    }

    fn page(names: &[&str], next: Option<&str>) -> ListingResult<ContainerPage> {
        Ok(ContainerPage {
            items: names.iter().map(|n| ContainerItem::new(*n)).collect(),
            next_marker: next.map(str::to_string),
        })
    }

    #[test]
    fn fresh_cursor_has_more() {
        let lister = ScriptedLister::new(vec![]);
        let cursor = PageCursor::new(&lister);
        assert!(cursor.has_more());
        assert_eq!(cursor.pages_fetched(), 0);
    }

    #[test]
    fn drains_pages_in_order() {
        let lister = ScriptedLister::new(vec![
            page(&["a", "b"], Some("c")),
            page(&["c"], Some("")),
        ]);
        let ctx = ListingContext::new();
        let mut cursor = PageCursor::new(&lister);
        let mut names = Vec::new();
        while cursor.has_more() {
            names.extend(cursor.fetch_next(&ctx).unwrap().into_iter().map(|i| i.name));
        }
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(cursor.pages_fetched(), 2);

        let seen = lister.seen.lock().unwrap();
        assert!(seen[0].is_initial());
        assert_eq!(seen[1].token(), Some("c"));
    }

    #[test]
    fn empty_account_fetches_exactly_once() {
        let lister = ScriptedLister::new(vec![page(&[], None)]);
        let ctx = ListingContext::new();
        let mut cursor = PageCursor::new(&lister);
        assert!(cursor.fetch_next(&ctx).unwrap().is_empty());
        assert!(!cursor.has_more());
        assert!(matches!(cursor.fetch_next(&ctx), Err(ListingError::Exhausted)));
    }

    #[test]
    fn error_leaves_cursor_in_place() {
        let lister = ScriptedLister::new(vec![
            page(&["a"], Some("b")),
            Err(ListingError::service(503, "ServerBusy", "try later")),
        ]);
        let ctx = ListingContext::new();
        let mut cursor = PageCursor::new(&lister);
        cursor.fetch_next(&ctx).unwrap();
        let err = cursor.fetch_next(&ctx).unwrap_err();
        assert!(matches!(err, ListingError::Service { status: 503, .. }));
        assert!(cursor.has_more());
        assert_eq!(cursor.marker().token(), Some("b"));
        assert_eq!(cursor.pages_fetched(), 1);
    }
}
