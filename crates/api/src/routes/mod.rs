//! HTTP handlers and the state they share.

pub mod directory;
pub mod health;
pub mod metrics;
pub mod orders;

use std::str::FromStr;

use common::PageRequest;
use domain::{
    CategoryRepository, CustomerRepository, DirectoryService, OfferRepository, OrderRepository,
    OrderService, SupplierRepository, UserRepository,
};

use crate::error::ApiError;

/// Storage backend the API can run on: every repository port at once.
pub trait AppStore:
    OrderRepository
    + CustomerRepository
    + UserRepository
    + OfferRepository
    + CategoryRepository
    + SupplierRepository
    + Clone
    + 'static
{
}

impl<S> AppStore for S where
    S: OrderRepository
        + CustomerRepository
        + UserRepository
        + OfferRepository
        + CategoryRepository
        + SupplierRepository
        + Clone
        + 'static
{
}

/// Shared application state accessible from all handlers.
pub struct AppState<S: AppStore> {
    pub order_service: OrderService<S>,
    pub directory_service: DirectoryService<S>,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl<S: AppStore> AppState<S> {
    /// Turns optional query parameters into a page request within the
    /// configured bounds.
    pub fn page_request(&self, page: Option<usize>, size: Option<usize>) -> PageRequest {
        let size = size
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size);
        PageRequest::new(page.unwrap_or(0), size)
    }
}

/// Parses a path or query identifier, reporting a bad request on failure.
pub(crate) fn parse_id<T>(kind: &str, raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = uuid::Error>,
{
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid {kind} ID format: {e}")))
}
