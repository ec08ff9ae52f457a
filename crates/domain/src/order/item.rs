//! Order line items.

use chrono::{DateTime, Utc};
use common::OrderItemId;
use serde::Serialize;

use crate::directory::Offer;
use crate::money::Money;
use crate::validation::{Checker, Validate, Violation};

use super::OrderError;

/// One purchased line of an order.
///
/// The price is captured from the offer when the item is created and is
/// never recomputed, so later price changes on the offer do not affect it.
///
/// Serializable for responses and logs only; items are rebuilt from
/// storage through [`OrderItem::with_id`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    id: Option<OrderItemId>,
    offer: Offer,
    quantity: u32,
    price_at_time_of_order: Money,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderItem {
    /// Creates a new line for `offer`, snapshotting its current price.
    pub fn create_new(offer: &Offer, quantity: u32) -> Result<Self, OrderError> {
        if offer.id().is_none() {
            return Err(OrderError::OfferRequired);
        }

        let now = Utc::now();
        let item = Self {
            id: None,
            offer: offer.clone(),
            quantity,
            price_at_time_of_order: offer.price(),
            created_at: now,
            updated_at: now,
        };
        item.validate().map_err(OrderError::ItemValidation)?;
        Ok(item)
    }

    /// Reconstructs a persisted item.
    pub fn with_id(
        id: OrderItemId,
        offer: Offer,
        quantity: u32,
        price_at_time_of_order: Money,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if offer.id().is_none() {
            return Err(OrderError::OfferRequired);
        }

        let item = Self {
            id: Some(id),
            offer,
            quantity,
            price_at_time_of_order,
            created_at,
            updated_at,
        };
        item.validate().map_err(OrderError::ItemValidation)?;
        Ok(item)
    }

    /// Replaces the quantity. The price snapshot is left untouched.
    ///
    /// On failure the item is unchanged.
    pub fn update_quantity(&mut self, new_quantity: u32) -> Result<(), OrderError> {
        let previous = self.quantity;
        self.quantity = new_quantity;
        if let Err(e) = self.validate() {
            self.quantity = previous;
            return Err(OrderError::ItemValidation(e));
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn id(&self) -> Option<OrderItemId> {
        self.id
    }

    pub fn offer(&self) -> &Offer {
        &self.offer
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price_at_time_of_order(&self) -> Money {
        self.price_at_time_of_order
    }

    /// Returns quantity × snapshot price.
    ///
    /// A valid item always has a representable line total.
    pub fn line_total(&self) -> Money {
        self.price_at_time_of_order.saturating_multiply(self.quantity)
    }

    /// Returns quantity × snapshot price, or `None` on overflow.
    pub fn checked_line_total(&self) -> Option<Money> {
        self.price_at_time_of_order.checked_multiply(self.quantity)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Validate for OrderItem {
    fn violations(&self) -> Vec<Violation> {
        Checker::new()
            .check(self.offer.id().is_some(), "offer", "must reference a persisted offer")
            .check(self.quantity > 0, "quantity", "must be greater than 0")
            .check(
                self.price_at_time_of_order.is_positive(),
                "price_at_time_of_order",
                "must be greater than 0",
            )
            .check(
                self.checked_line_total().is_some(),
                "quantity",
                "line total exceeds the largest representable amount",
            )
            .finish()
    }
}
