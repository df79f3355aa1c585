use strata_types::StoredObject;
use url::Url;

use crate::context::TraversalContext;
use crate::error::TraverseResult;
use crate::progress::EnumerationCounter;

// ---------------------------------------------------------------------------
// Capabilities handed to a traversal
// ---------------------------------------------------------------------------

/// Terminal step invoked once for every object that passes the filters.
///
/// Any closure `Fn(StoredObject) -> TraverseResult<()>` is a processor.
pub trait ObjectProcessor {
    fn process(&self, object: StoredObject) -> TraverseResult<()>;
}

impl<F> ObjectProcessor for F
where
    F: Fn(StoredObject) -> TraverseResult<()>,
{
    fn process(&self, object: StoredObject) -> TraverseResult<()> {
        self(object)
    }
}

/// Predicate deciding whether a discovered object reaches the processor.
///
/// Any closure `Fn(&StoredObject) -> bool` is a filter.
pub trait ObjectFilter {
    fn does_pass(&self, object: &StoredObject) -> bool;
}

impl<F> ObjectFilter for F
where
    F: Fn(&StoredObject) -> bool,
{
    fn does_pass(&self, object: &StoredObject) -> bool {
        self(object)
    }
}

/// Run `object` through every filter in order and process it if all pass.
pub fn process_if_passed_filters(
    filters: &[Box<dyn ObjectFilter>],
    object: StoredObject,
    processor: &dyn ObjectProcessor,
) -> TraverseResult<()> {
    if filters.iter().all(|f| f.does_pass(&object)) {
        processor.process(object)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Traversers
// ---------------------------------------------------------------------------

/// Anything that can enumerate the objects under one storage resource.
///
/// Implementations apply `filters` before calling `processor`, fire their
/// enumeration counter once per discovered object, and return the first
/// fatal error. The account traverser and container-level traversers both
/// implement this trait; other resource kinds slot in as new implementors.
pub trait ResourceTraverser {
    fn traverse(
        &self,
        processor: &dyn ObjectProcessor,
        filters: &[Box<dyn ObjectFilter>],
    ) -> TraverseResult<()>;
}

/// Builds container-level traversers for an account.
pub trait ContainerTraverserFactory: Send + Sync {
    /// Create a traverser bound to the container at `container_url`.
    ///
    /// `counter` must be invoked once per object the traverser discovers.
    fn container_traverser<'a>(
        &'a self,
        container_url: &Url,
        ctx: &TraversalContext,
        recursive: bool,
        counter: EnumerationCounter,
    ) -> TraverseResult<Box<dyn ResourceTraverser + 'a>>;
}
