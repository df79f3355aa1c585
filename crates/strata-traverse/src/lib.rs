//! Account-level storage traversal for Strata.
//!
//! An [`AccountTraverser`] walks every container of a storage account: it
//! drains the paged container listing, keeps the containers whose name
//! matches an optional wildcard pattern, and hands each one to a container-level
//! [`ResourceTraverser`] built by a [`ContainerTraverserFactory`]. Objects
//! surfaced by the nested traverser reach the caller's processor through a
//! [`ContainerDecorator`] that stamps them with their container name.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use chrono::Utc;
//! use strata_listing::{InMemoryAccount, ListingConfig};
//! use strata_traverse::{
//!     AccountTraverser, ProgressTracker, ResourceTraverser, TraversalContext, TraverseResult,
//! };
//! use strata_types::StoredObject;
//!
//! let account = Arc::new(InMemoryAccount::new(ListingConfig::default()));
//! account.put_object("logs", StoredObject::file("app.log", 10, Utc::now()));
//! account.put_object("images", StoredObject::file("cat.png", 20, Utc::now()));
//!
//! let progress = ProgressTracker::new();
//! let traverser = AccountTraverser::in_memory(
//!     "https://acct.file.core.windows.net/log*",
//!     account,
//!     TraversalContext::new(),
//!     progress.as_counter(),
//! )
//! .unwrap();
//!
//! let seen = std::cell::RefCell::new(Vec::new());
//! let processor = |obj: StoredObject| -> TraverseResult<()> {
//!     seen.borrow_mut().push(obj.qualified_path());
//!     Ok(())
//! };
//! traverser.traverse(&processor, &[]).unwrap();
//! assert_eq!(seen.into_inner(), vec!["logs/app.log"]);
//! assert_eq!(progress.count(), 1);
//! ```
//!
//! # Error Policy
//!
//! Every error is fatal. The first failure anywhere in the walk ends the
//! call and is returned as-is.

pub mod account;
pub mod context;
pub mod decorator;
pub mod error;
pub mod memory;
pub mod pattern;
pub mod progress;
pub mod traits;

pub use account::AccountTraverser;
pub use context::TraversalContext;
pub use decorator::{wrap_with_container_context, ContainerDecorator};
pub use error::{TraverseError, TraverseResult};
pub use memory::InMemoryContainerTraverser;
pub use pattern::{ContainerPattern, PatternError};
pub use progress::{counter_from_fn, noop_counter, EnumerationCounter, ProgressTracker};
pub use traits::{
    process_if_passed_filters, ContainerTraverserFactory, ObjectFilter, ObjectProcessor,
    ResourceTraverser,
};
