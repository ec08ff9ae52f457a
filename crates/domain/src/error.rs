//! Domain error types.

use common::{CategoryId, CustomerId, OfferId, OrderId, SupplierId, UserId};
use thiserror::Error;

use crate::order::OrderError;
use crate::validation::ValidationErrors;

/// Errors raised by repository adapters.
///
/// The domain treats these as opaque and never retries them.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A stored record points at an entity that no longer exists.
    #[error("Dangling reference: {entity} {id} not found")]
    DanglingReference { entity: &'static str, id: String },

    /// A stored record could not be turned back into a valid entity.
    #[error("Corrupted {entity} record: {reason}")]
    Corrupted { entity: &'static str, reason: String },

    /// An entity that must already be stored has no id.
    #[error("Cannot store a reference to an unsaved {entity}")]
    Unpersisted { entity: &'static str },

    /// The backing store could not be reached.
    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during use-case execution.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The order aggregate rejected the operation.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// A directory entity failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Offer not found: {0}")]
    OfferNotFound(OfferId),

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("Supplier not found: {0}")]
    SupplierNotFound(SupplierId),

    /// A precondition on the command itself was not met.
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// A uniqueness rule was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An error occurred in the persistence layer.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl DomainError {
    /// Short, stable label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Order(OrderError::CancelledOrderIsFinal { .. }) => "cancelled_final",
            DomainError::Order(OrderError::ItemNotFound { .. }) => "not_found",
            DomainError::Order(OrderError::OfferRequired) => "illegal_argument",
            DomainError::Order(_) | DomainError::Validation(_) => "validation",
            DomainError::OrderNotFound(_)
            | DomainError::OfferNotFound(_)
            | DomainError::CustomerNotFound(_)
            | DomainError::UserNotFound(_)
            | DomainError::CategoryNotFound(_)
            | DomainError::SupplierNotFound(_) => "not_found",
            DomainError::IllegalArgument(_) => "illegal_argument",
            DomainError::Conflict(_) => "conflict",
            DomainError::Repository(_) => "repository",
        }
    }
}
