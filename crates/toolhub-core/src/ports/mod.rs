//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `url` types in any signature
//! - No caching inside a port; callers own their caches

pub mod catalog;

pub use catalog::{CatalogClientPort, CatalogError, CatalogResult, ItemPage, ItemQuery};
#[cfg(test)]
pub use catalog::MockCatalogClientPort;
