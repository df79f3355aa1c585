//! Paged container listing for Strata.
//!
//! A storage account exposes its containers through a server-paged listing:
//! each call returns one page of items plus an opaque continuation token.
//! This crate defines that seam and the cursor that drains it.
//!
//! # Key Types
//!
//! - [`ContainerLister`] -- the paged listing source every backend implements
//! - [`ListingContext`] -- cancellation token plus optional deadline for each call
//! - [`PageCursor`] -- explicit `has_more` / `fetch_next` state over a lister
//! - [`InMemoryAccount`] -- `BTreeMap`-backed account for tests and embedding
//! - [`AccountManifest`] -- TOML/JSON description used to seed an [`InMemoryAccount`]
//!
//! # Design Rules
//!
//! 1. The first fetch always happens; a cursor starts with more to read.
//! 2. A failed fetch is returned verbatim and never retried here.
//! 3. Listers check the [`ListingContext`] they are handed (token and deadline); the cursor does not.

pub mod config;
pub mod context;
pub mod cursor;
pub mod error;
pub mod manifest;
pub mod memory;
pub mod traits;

pub use config::ListingConfig;
pub use context::ListingContext;
pub use cursor::PageCursor;
pub use error::{ListingError, ListingResult};
pub use manifest::{AccountManifest, ContainerManifest, ObjectManifest};
pub use memory::InMemoryAccount;
pub use traits::{ContainerLister, ContainerPage};
