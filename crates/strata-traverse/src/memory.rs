//! Container-level traversal over an [`InMemoryAccount`].

use strata_listing::InMemoryAccount;
use strata_types::container_name_from_url;
use tracing::trace;
use url::Url;

use crate::context::TraversalContext;
use crate::error::{TraverseError, TraverseResult};
use crate::progress::EnumerationCounter;
use crate::traits::{
    process_if_passed_filters, ContainerTraverserFactory, ObjectFilter, ObjectProcessor,
    ResourceTraverser,
};

/// Walks the objects of one in-memory container in path order.
///
/// Non-recursive traversal keeps only top-level entries. The context is
/// checked before every object, and the enumeration counter fires for every
/// object visited, before filters run.
pub struct InMemoryContainerTraverser<'a> {
    account: &'a InMemoryAccount,
    container: String,
    ctx: TraversalContext,
    recursive: bool,
    counter: EnumerationCounter,
}

impl<'a> InMemoryContainerTraverser<'a> {
    pub fn new(
        account: &'a InMemoryAccount,
        container: impl Into<String>,
        ctx: TraversalContext,
        recursive: bool,
        counter: EnumerationCounter,
    ) -> Self {
        Self {
            account,
            container: container.into(),
            ctx,
            recursive,
            counter,
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }
}

impl ResourceTraverser for InMemoryContainerTraverser<'_> {
    fn traverse(
        &self,
        processor: &dyn ObjectProcessor,
        filters: &[Box<dyn ObjectFilter>],
    ) -> TraverseResult<()> {
        self.ctx.check()?;
        let objects = self
            .account
            .objects(&self.container)
            .ok_or_else(|| TraverseError::ContainerNotFound(self.container.clone()))?;

        for object in objects {
            if !self.recursive && object.depth() > 0 {
                continue;
            }
            self.ctx.check()?;
            (self.counter)();
            trace!(container = %self.container, path = %object.relative_path, "enumerated object");
            process_if_passed_filters(filters, object, processor)?;
        }
        Ok(())
    }
}

impl ContainerTraverserFactory for InMemoryAccount {
    fn container_traverser<'a>(
        &'a self,
        container_url: &Url,
        ctx: &TraversalContext,
        recursive: bool,
        counter: EnumerationCounter,
    ) -> TraverseResult<Box<dyn ResourceTraverser + 'a>> {
        let container = container_name_from_url(container_url)?
            .ok_or_else(|| TraverseError::ContainerNotFound(container_url.path().to_string()))?;
        Ok(Box::new(InMemoryContainerTraverser::new(
            self,
            container,
            ctx.clone(),
            recursive,
            counter,
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::Utc;
    use strata_listing::ListingConfig;
    use strata_types::StoredObject;

    use super::*;
    use crate::progress::{noop_counter, ProgressTracker};

    fn account() -> InMemoryAccount {
        let account = InMemoryAccount::new(ListingConfig::default());
        let now = Utc::now();
        account.put_object("data", StoredObject::file("top.txt", 1, now));
        account.put_object("data", StoredObject::folder("dir", now));
        account.put_object("data", StoredObject::file("dir/nested.txt", 2, now));
        account.put_object("data", StoredObject::file("dir/deeper/leaf.bin", 3, now));
        account
    }

    fn collect(
        traverser: &dyn ResourceTraverser,
        filters: &[Box<dyn ObjectFilter>],
    ) -> TraverseResult<Vec<String>> {
        let seen = RefCell::new(Vec::new());
        let processor = |o: StoredObject| -> TraverseResult<()> {
            seen.borrow_mut().push(o.relative_path);
            Ok(())
        };
        traverser.traverse(&processor, filters)?;
        Ok(seen.into_inner())
    }

    #[test]
    fn recursive_walk_visits_everything_in_path_order() {
        let account = account();
        let t = InMemoryContainerTraverser::new(
            &account,
            "data",
            TraversalContext::new(),
            true,
            noop_counter(),
        );
        assert_eq!(
            collect(&t, &[]).unwrap(),
            vec!["dir", "dir/deeper/leaf.bin", "dir/nested.txt", "top.txt"]
        );
    }

    #[test]
    fn non_recursive_walk_keeps_top_level() {
        let account = account();
        let t = InMemoryContainerTraverser::new(
            &account,
            "data",
            TraversalContext::new(),
            false,
            noop_counter(),
        );
        assert_eq!(collect(&t, &[]).unwrap(), vec!["dir", "top.txt"]);
    }

    #[test]
    fn counter_fires_for_filtered_out_objects_too() {
        let account = account();
        let progress = ProgressTracker::new();
        let t = InMemoryContainerTraverser::new(
            &account,
            "data",
            TraversalContext::new(),
            true,
            progress.as_counter(),
        );
        let filters: Vec<Box<dyn ObjectFilter>> =
            vec![Box::new(|o: &StoredObject| !o.is_folder())];
        let seen = collect(&t, &filters).unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(progress.count(), 4);
    }

    #[test]
    fn missing_container_is_an_error() {
        let account = account();
        let t = InMemoryContainerTraverser::new(
            &account,
            "nope",
            TraversalContext::new(),
            true,
            noop_counter(),
        );
        assert!(matches!(
            collect(&t, &[]),
            Err(TraverseError::ContainerNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn cancelled_context_stops_before_any_object() {
        let account = account();
        let ctx = TraversalContext::new();
        ctx.cancel();
        let progress = ProgressTracker::new();
        let t = InMemoryContainerTraverser::new(
            &account,
            "data",
            ctx,
            true,
            progress.as_counter(),
        );
        assert!(matches!(collect(&t, &[]), Err(TraverseError::Cancelled)));
        assert_eq!(progress.count(), 0);
    }

    #[test]
    fn factory_resolves_container_from_url() {
        let account = account();
        let url = Url::parse("https://acct.file.core.windows.net/data?sig=x").unwrap();
        let t = account
            .container_traverser(&url, &TraversalContext::new(), true, noop_counter())
            .unwrap();
        assert_eq!(collect(t.as_ref(), &[]).unwrap().len(), 4);
    }

    #[test]
    fn factory_rejects_account_root_url() {
        let account = account();
        let url = Url::parse("https://acct.file.core.windows.net/").unwrap();
        let result =
            account.container_traverser(&url, &TraversalContext::new(), true, noop_counter());
        assert!(matches!(result, Err(TraverseError::ContainerNotFound(_))));
    }
}
