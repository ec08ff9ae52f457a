//! Response projections returned by the order use-cases.

use chrono::{DateTime, Utc};
use common::{CustomerId, OfferId, OrderId, OrderItemId, UserId};
use serde::{Deserialize, Serialize};

use crate::directory::{Customer, Offer, User};
use crate::money::Money;

use super::{Order, OrderItem, OrderStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: Option<CustomerId>,
    pub name: String,
    pub email: String,
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id(),
            name: customer.name().to_string(),
            email: customer.email().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Option<UserId>,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSummary {
    pub id: Option<OfferId>,
    pub name: String,

    /// The offer's current list price, not the price the item was sold at.
    pub price: Money,
}

impl From<&Offer> for OfferSummary {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id(),
            name: offer.name().to_string(),
            price: offer.price(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub id: Option<OrderItemId>,
    pub offer: OfferSummary,
    pub quantity: u32,
    pub price_at_time_of_order: Money,
    pub line_total: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&OrderItem> for OrderItemResponse {
    fn from(item: &OrderItem) -> Self {
        Self {
            id: item.id(),
            offer: item.offer().into(),
            quantity: item.quantity(),
            price_at_time_of_order: item.price_at_time_of_order(),
            line_total: item.line_total(),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        }
    }
}

/// Read projection of an order, including its computed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Option<OrderId>,
    pub customer: CustomerSummary,
    pub user: UserSummary,
    pub status: OrderStatus,
    pub items: Vec<OrderItemResponse>,
    pub total_price: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            customer: order.customer().into(),
            user: order.user().into(),
            status: order.status(),
            items: order.items().iter().map(OrderItemResponse::from).collect(),
            total_price: order.total_price(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self::from(&order)
    }
}
