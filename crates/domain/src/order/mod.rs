//! Order aggregate and related types.

mod aggregate;
mod commands;
mod item;
mod record;
mod response;
mod service;
mod status;

pub use aggregate::Order;
pub use commands::*;
pub use item::OrderItem;
pub use record::{OrderItemRecord, OrderRecord};
pub use response::{CustomerSummary, OfferSummary, OrderItemResponse, OrderResponse, UserSummary};
pub use service::OrderService;
pub use status::{OrderStatus, UnknownStatus};

use common::OrderItemId;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors raised by the order aggregate itself.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order violates one or more invariants.
    #[error("Order validation failed: {0}")]
    Validation(ValidationErrors),

    /// A line item violates one or more invariants.
    #[error("Order item validation failed: {0}")]
    ItemValidation(ValidationErrors),

    /// No item with this id belongs to the order.
    #[error("Order item not found: {item_id}")]
    ItemNotFound { item_id: OrderItemId },

    /// The offer for a new line must already be stored.
    #[error("Offer is required to create an order item")]
    OfferRequired,

    /// Cancelled orders cannot move to another status.
    #[error("Cancelled order cannot change status to {requested}")]
    CancelledOrderIsFinal { requested: OrderStatus },
}
