//! Order use-case commands.
//!
//! Commands carry plain values only (ids and primitives); the service
//! resolves them into entities.

use common::{CustomerId, OfferId, OrderId, OrderItemId, UserId};

use super::OrderStatus;

/// One requested line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub offer_id: OfferId,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(offer_id: OfferId, quantity: u32) -> Self {
        Self { offer_id, quantity }
    }
}

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// The customer placing the order.
    pub customer_id: CustomerId,

    /// The staff user creating the order.
    pub user_id: UserId,

    /// Requested lines, in order.
    pub items: Vec<OrderLine>,
}

impl CreateOrder {
    /// Creates a new CreateOrder command.
    pub fn new(customer_id: CustomerId, user_id: UserId, items: Vec<OrderLine>) -> Self {
        Self {
            customer_id,
            user_id,
            items,
        }
    }
}

/// Command to add a line to an existing order.
#[derive(Debug, Clone, Copy)]
pub struct AddOrderItem {
    pub order_id: OrderId,
    pub offer_id: OfferId,
    pub quantity: u32,
}

impl AddOrderItem {
    pub fn new(order_id: OrderId, offer_id: OfferId, quantity: u32) -> Self {
        Self {
            order_id,
            offer_id,
            quantity,
        }
    }
}

/// Command to remove a line from an order.
#[derive(Debug, Clone, Copy)]
pub struct RemoveOrderItem {
    pub order_id: OrderId,
    pub item_id: OrderItemId,
}

impl RemoveOrderItem {
    pub fn new(order_id: OrderId, item_id: OrderItemId) -> Self {
        Self { order_id, item_id }
    }
}

/// Command to change the quantity of a line.
#[derive(Debug, Clone, Copy)]
pub struct UpdateOrderItemQuantity {
    pub order_id: OrderId,
    pub item_id: OrderItemId,
    pub quantity: u32,
}

impl UpdateOrderItemQuantity {
    pub fn new(order_id: OrderId, item_id: OrderItemId, quantity: u32) -> Self {
        Self {
            order_id,
            item_id,
            quantity,
        }
    }
}

/// Command to move an order to another status.
#[derive(Debug, Clone, Copy)]
pub struct ChangeOrderStatus {
    pub order_id: OrderId,

    /// Requested status. `None` is rejected as an illegal argument.
    pub status: Option<OrderStatus>,
}

impl ChangeOrderStatus {
    pub fn new(order_id: OrderId, status: Option<OrderStatus>) -> Self {
        Self { order_id, status }
    }

    /// Shorthand for a command with a status present.
    pub fn to(order_id: OrderId, status: OrderStatus) -> Self {
        Self::new(order_id, Some(status))
    }
}

/// Command to reassign an order to another customer.
#[derive(Debug, Clone, Copy)]
pub struct UpdateOrder {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
}

impl UpdateOrder {
    pub fn new(order_id: OrderId, customer_id: CustomerId) -> Self {
        Self {
            order_id,
            customer_id,
        }
    }
}
