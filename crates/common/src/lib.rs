//! Shared identifiers and paging types for the order-management workspace.

pub mod paging;
pub mod types;

pub use paging::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use types::{CategoryId, CustomerId, OfferId, OrderId, OrderItemId, SupplierId, UserId};
