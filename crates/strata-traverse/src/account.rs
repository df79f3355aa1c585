//! Traversal of every container in a storage account.

use std::sync::Arc;

use strata_listing::{ContainerLister, InMemoryAccount, PageCursor};
use strata_types::AccountLocation;
use tracing::{debug, info, trace};

use crate::context::TraversalContext;
use crate::decorator::ContainerDecorator;
use crate::error::{TraverseError, TraverseResult};
use crate::pattern::ContainerPattern;
use crate::progress::EnumerationCounter;
use crate::traits::{ContainerTraverserFactory, ObjectFilter, ObjectProcessor, ResourceTraverser};

/// Enumerates an entire account, descending into each matching container.
///
/// Built once from a root URL and used for a single [`traverse`] call. A
/// container segment on the root URL is not a destination but a pattern over
/// container names (see [`ContainerPattern`]); without one every container
/// is visited.
///
/// Containers are visited strictly one after another in listing order. The
/// first error anywhere ends the call; work already handed to the processor
/// stays done.
///
/// [`traverse`]: ResourceTraverser::traverse
pub struct AccountTraverser {
    location: AccountLocation,
    lister: Arc<dyn ContainerLister>,
    factory: Arc<dyn ContainerTraverserFactory>,
    ctx: TraversalContext,
    counter: EnumerationCounter,
}

impl AccountTraverser {
    /// Parse `root_url` and build a traverser. No I/O is performed.
    pub fn new(
        root_url: &str,
        lister: Arc<dyn ContainerLister>,
        factory: Arc<dyn ContainerTraverserFactory>,
        ctx: TraversalContext,
        counter: EnumerationCounter,
    ) -> TraverseResult<Self> {
        let location = AccountLocation::parse(root_url)?;
        Ok(Self::from_location(location, lister, factory, ctx, counter))
    }

    /// Build a traverser from an already-parsed location.
    pub fn from_location(
        location: AccountLocation,
        lister: Arc<dyn ContainerLister>,
        factory: Arc<dyn ContainerTraverserFactory>,
        ctx: TraversalContext,
        counter: EnumerationCounter,
    ) -> Self {
        Self {
            location,
            lister,
            factory,
            ctx,
            counter,
        }
    }

    /// A traverser whose listing and container traversal are both served by
    /// one in-memory account.
    pub fn in_memory(
        root_url: &str,
        account: Arc<InMemoryAccount>,
        ctx: TraversalContext,
        counter: EnumerationCounter,
    ) -> TraverseResult<Self> {
        let lister: Arc<dyn ContainerLister> = account.clone();
        let factory: Arc<dyn ContainerTraverserFactory> = account;
        Self::new(root_url, lister, factory, ctx, counter)
    }

    /// The account this traverser enumerates.
    pub fn location(&self) -> &AccountLocation {
        &self.location
    }

    /// The container-name pattern, if one was given.
    pub fn container_pattern(&self) -> Option<&str> {
        self.location.container_pattern().filter(|p| !p.is_empty())
    }

    /// The cancellation and deadline context shared with every listing call
    /// and nested traversal.
    pub fn context(&self) -> &TraversalContext {
        &self.ctx
    }

    /// Test a container name against the pattern.
    ///
    /// The pattern is compiled on every call, so a malformed pattern is
    /// reported at the first container evaluated rather than at
    /// construction, and an account with no containers never reports it.
    fn matches_pattern(&self, container_name: &str) -> TraverseResult<bool> {
        let Some(pattern) = self.container_pattern() else {
            return Ok(true);
        };
        let compiled =
            ContainerPattern::compile(pattern).map_err(|source| TraverseError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(compiled.matches(container_name))
    }
}

impl ResourceTraverser for AccountTraverser {
    fn traverse(
        &self,
        processor: &dyn ObjectProcessor,
        filters: &[Box<dyn ObjectFilter>],
    ) -> TraverseResult<()> {
        let mut cursor = PageCursor::new(self.lister.as_ref());
        let mut visited = 0usize;

        while cursor.has_more() {
            let items = cursor.fetch_next(self.ctx.listing())?;
            debug!(
                account = ?self.location.account_name(),
                page = cursor.pages_fetched(),
                containers = items.len(),
                "listed containers"
            );

            for item in items {
                if !self.matches_pattern(&item.name)? {
                    trace!(container = %item.name, "container does not match pattern");
                    continue;
                }

                let container_url = self.location.container_url(&item.name)?;
                let nested = self.factory.container_traverser(
                    &container_url,
                    &self.ctx,
                    true,
                    Arc::clone(&self.counter),
                )?;
                let decorated = ContainerDecorator::new(item.name.as_str(), processor);

                debug!(container = decorated.container_name(), "traversing container");
                nested.traverse(&decorated, filters)?;
                visited += 1;
            }
        }

        info!(
            account = ?self.location.account_name(),
            pattern = ?self.container_pattern(),
            pages = cursor.pages_fetched(),
            containers = visited,
            "account traversal complete"
        );
        Ok(())
    }
}

impl std::fmt::Debug for AccountTraverser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountTraverser")
            .field("account", &self.location.account_name())
            .field("container_pattern", &self.container_pattern())
            .finish()
    }
}
