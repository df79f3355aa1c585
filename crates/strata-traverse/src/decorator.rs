use strata_types::StoredObject;

use crate::error::TraverseResult;
use crate::traits::ObjectProcessor;

/// Processor wrapper that stamps each object with the container it came from.
///
/// A container-level traverser knows nothing about the account above it, so
/// the account traverser wraps the caller's processor in one decorator per
/// container. The decorator forwards every object unchanged apart from
/// `container_name`, and returns the inner processor's result as-is.
pub struct ContainerDecorator<'a> {
    container_name: String,
    inner: &'a dyn ObjectProcessor,
}

impl<'a> ContainerDecorator<'a> {
    pub fn new(container_name: impl Into<String>, inner: &'a dyn ObjectProcessor) -> Self {
        Self {
            container_name: container_name.into(),
            inner,
        }
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }
}

impl ObjectProcessor for ContainerDecorator<'_> {
    fn process(&self, object: StoredObject) -> TraverseResult<()> {
        self.inner
            .process(object.with_container(self.container_name.as_str()))
    }
}

/// Wrap `inner` so forwarded objects carry `container_name`.
pub fn wrap_with_container_context<'a>(
    container_name: &str,
    inner: &'a dyn ObjectProcessor,
) -> ContainerDecorator<'a> {
    ContainerDecorator::new(container_name, inner)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::Utc;

    use super::*;
    use crate::error::TraverseError;

    #[test]
    fn forwards_with_container_name() {
        let seen = RefCell::new(Vec::new());
        let inner = |o: StoredObject| -> TraverseResult<()> {
            seen.borrow_mut().push(o);
            Ok(())
        };
        let decorated = wrap_with_container_context("logs", &inner);
        assert_eq!(decorated.container_name(), "logs");
        decorated
            .process(StoredObject::file("2024/app.log", 3, Utc::now()))
            .unwrap();

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].container_name.as_deref(), Some("logs"));
        assert_eq!(seen[0].relative_path, "2024/app.log");
        assert_eq!(seen[0].size, 3);
    }

    #[test]
    fn separate_decorators_do_not_leak_names() {
        let seen = RefCell::new(Vec::new());
        let inner = |o: StoredObject| -> TraverseResult<()> {
            seen.borrow_mut().push(o.container_name.unwrap_or_default());
            Ok(())
        };
        let a = ContainerDecorator::new("a", &inner);
        let b = ContainerDecorator::new("b", &inner);
        let now = Utc::now();
        a.process(StoredObject::file("x", 1, now)).unwrap();
        b.process(StoredObject::file("x", 1, now)).unwrap();
        a.process(StoredObject::file("y", 1, now).with_container("stale")).unwrap();
        assert_eq!(seen.into_inner(), vec!["a", "b", "a"]);
    }

    #[test]
    fn inner_error_passes_through() {
        let inner = |_: StoredObject| -> TraverseResult<()> { Err(TraverseError::Cancelled) };
        let decorated = ContainerDecorator::new("c", &inner);
        let err = decorated
            .process(StoredObject::file("x", 1, Utc::now()))
            .unwrap_err();
        assert!(matches!(err, TraverseError::Cancelled));
    }
}
