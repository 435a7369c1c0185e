//! Catalog client port definitions.
//!
//! This module defines the port trait and DTOs for reading the remote
//! catalog. The HTTP implementation lives in `toolhub-api`.

mod client;
mod error;
mod types;

pub use client::CatalogClientPort;
#[cfg(test)]
pub use client::MockCatalogClientPort;
pub use error::{CatalogError, CatalogResult};
pub use types::{ItemPage, ItemQuery};
