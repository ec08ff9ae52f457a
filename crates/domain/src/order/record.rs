//! Flat storage records for orders.
//!
//! A record references customer, user and offers by id only. It is the
//! partially-loaded form of an order: it never flows through business logic
//! and only becomes an [`Order`] once every reference has been resolved
//! and the result passes validation.

use chrono::{DateTime, Utc};
use common::{CustomerId, OfferId, OrderId, OrderItemId, UserId};
use serde::{Deserialize, Serialize};

use crate::directory::{Customer, Offer, User};
use crate::error::RepositoryError;
use crate::money::Money;

use super::{Order, OrderItem, OrderStatus};

/// Stored form of an order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub id: OrderItemId,
    pub offer_id: OfferId,
    pub quantity: u32,
    pub price_at_time_of_order: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored form of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub items: Vec<OrderItemRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Flattens an order, assigning fresh ids to the order and to any item
    /// that has not been stored yet.
    pub fn from_order(order: &Order) -> Result<Self, RepositoryError> {
        let customer_id = order
            .customer()
            .id()
            .ok_or(RepositoryError::Unpersisted { entity: "customer" })?;
        let user_id = order
            .user()
            .id()
            .ok_or(RepositoryError::Unpersisted { entity: "user" })?;

        let items = order
            .items()
            .iter()
            .map(|item| {
                let offer_id = item
                    .offer()
                    .id()
                    .ok_or(RepositoryError::Unpersisted { entity: "offer" })?;
                Ok(OrderItemRecord {
                    id: item.id().unwrap_or_default(),
                    offer_id,
                    quantity: item.quantity(),
                    price_at_time_of_order: item.price_at_time_of_order(),
                    created_at: item.created_at(),
                    updated_at: item.updated_at(),
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(Self {
            id: order.id().unwrap_or_default(),
            customer_id,
            user_id,
            status: order.status(),
            items,
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        })
    }

    /// Returns the distinct offer ids referenced by the items.
    pub fn offer_ids(&self) -> Vec<OfferId> {
        let mut ids: Vec<OfferId> = self.items.iter().map(|item| item.offer_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Attaches the resolved relations and validates the result.
    ///
    /// `resolve_offer` is asked for every item's offer; a miss is reported as
    /// a dangling reference rather than producing a half-built order.
    pub fn assemble(
        self,
        customer: Customer,
        user: User,
        mut resolve_offer: impl FnMut(OfferId) -> Option<Offer>,
    ) -> Result<Order, RepositoryError> {
        let mut items = Vec::with_capacity(self.items.len());
        for record in self.items {
            let offer =
                resolve_offer(record.offer_id).ok_or(RepositoryError::DanglingReference {
                    entity: "offer",
                    id: record.offer_id.to_string(),
                })?;
            let item = OrderItem::with_id(
                record.id,
                offer,
                record.quantity,
                record.price_at_time_of_order,
                record.created_at,
                record.updated_at,
            )
            .map_err(|e| RepositoryError::Corrupted {
                entity: "order item",
                reason: e.to_string(),
            })?;
            items.push(item);
        }

        Order::with_id(
            self.id,
            customer,
            user,
            self.status,
            items,
            self.created_at,
            self.updated_at,
        )
        .map_err(|e| RepositoryError::Corrupted {
            entity: "order",
            reason: e.to_string(),
        })
    }
}
