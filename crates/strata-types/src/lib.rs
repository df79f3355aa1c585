//! Foundation types for Strata.
//!
//! This crate provides the value types passed between the listing layer and
//! the traversal engine. Every other Strata crate depends on `strata-types`.
//!
//! # Key Types
//!
//! - [`StoredObject`] -- A discovered file or folder, optionally annotated with its container
//! - [`ContainerItem`] -- One entry of a paged container listing
//! - [`Marker`] -- Continuation state of a paged listing
//! - [`AccountLocation`] -- A parsed account root URL with an optional container-name pattern

pub mod container;
pub mod error;
pub mod location;
pub mod marker;
pub mod object;

pub use container::{ContainerItem, ContainerProperties};
pub use error::LocationError;
pub use location::{container_name_from_url, AccountLocation};
pub use marker::Marker;
pub use object::{EntityType, StoredObject};
