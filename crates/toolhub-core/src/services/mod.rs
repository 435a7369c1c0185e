//! Core services - orchestrators over the catalog port.
//!
//! Services here don't know about concrete implementations; they take an
//! `Arc<dyn CatalogClientPort>` and add only the logic that doesn't belong
//! in the adapter.

mod showcase;

pub use showcase::{DEFAULT_RELATED_LIMIT, SHOWCASE_LIMIT, ShowcaseService};
