#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultCatalogClient is meant to
// be used through the CatalogClientPort trait, not its generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultCatalogClient;

// Configuration
pub use config::{BASE_URL_ENV, CatalogClientConfig, DEFAULT_BASE_URL, DEFAULT_LANGUAGE_ENV};
