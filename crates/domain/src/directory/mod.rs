//! Directory records referenced by orders.
//!
//! These are plain validated records; the only behaviour beyond
//! field validation is uniqueness, checked by [`DirectoryService`].

mod catalog;
mod people;
mod service;

pub use catalog::{Category, Offer, OfferKind, Supplier};
pub use people::{Customer, Role, User};
pub use service::{DirectoryService, NewOffer};
