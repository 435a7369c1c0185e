//! Small runtime utilities shared across the crate.

pub mod debounce;

pub use debounce::Debouncer;
