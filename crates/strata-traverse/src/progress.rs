use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback fired once for every object a traverser discovers.
///
/// One counter is shared by the account traverser and every nested
/// traverser it creates.
pub type EnumerationCounter = Arc<dyn Fn() + Send + Sync>;

/// Wrap a closure as an [`EnumerationCounter`].
pub fn counter_from_fn(f: impl Fn() + Send + Sync + 'static) -> EnumerationCounter {
    Arc::new(f)
}

/// A counter that does nothing.
pub fn noop_counter() -> EnumerationCounter {
    Arc::new(|| {})
}

/// Counts enumerated objects.
#[derive(Clone, Debug, Default)]
pub struct ProgressTracker {
    enumerated: Arc<AtomicU64>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter callback feeding this tracker.
    pub fn as_counter(&self) -> EnumerationCounter {
        let enumerated = Arc::clone(&self.enumerated);
        Arc::new(move || {
            enumerated.fetch_add(1, Ordering::Relaxed);
        })
    }

    /// Objects enumerated so far.
    pub fn count(&self) -> u64 {
        self.enumerated.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_counts_through_every_clone_of_the_counter() {
        let tracker = ProgressTracker::new();
        let a = tracker.as_counter();
        let b = Arc::clone(&a);
        a();
        b();
        tracker.as_counter()();
        assert_eq!(tracker.count(), 3);
    }

    #[test]
    fn noop_counter_is_callable() {
        noop_counter()();
    }
}
