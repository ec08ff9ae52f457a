//! Storage adapters for the order-management backend.
//!
//! [`InMemoryStore`] implements every repository port declared by the
//! `domain` crate and is what the API server runs on.

pub mod memory;

pub use memory::InMemoryStore;
