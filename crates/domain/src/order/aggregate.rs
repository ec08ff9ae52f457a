//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{OrderId, OrderItemId};
use serde::Serialize;

use crate::directory::{Customer, Offer, User};
use crate::money::Money;
use crate::validation::{Checker, Validate, Violation};

use super::{OrderError, OrderItem, OrderStatus};

/// Order aggregate root.
///
/// Owns its line items. Every mutator re-checks the aggregate invariants
/// and leaves the order untouched when it fails.
///
/// There is no `Deserialize`: orders come back from storage only through
/// [`OrderRecord::assemble`](super::OrderRecord::assemble).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// Storage-assigned identifier, absent until first saved.
    id: Option<OrderId>,

    /// Customer who placed the order.
    customer: Customer,

    /// Staff user operating the order.
    user: User,

    /// Current status of the order.
    status: OrderStatus,

    /// Line items, in insertion order.
    items: Vec<OrderItem>,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Validate for Order {
    fn violations(&self) -> Vec<Violation> {
        let mut violations = Checker::new()
            .check(
                self.customer.id().is_some(),
                "customer",
                "must reference a persisted customer",
            )
            .check(
                self.user.id().is_some(),
                "user",
                "must reference a persisted user",
            )
            .check(
                !self.items.is_empty(),
                "items",
                "order must contain at least one item",
            )
            .check(
                self.checked_total_price().is_some(),
                "items",
                "order total exceeds the largest representable amount",
            )
            .finish();

        for item in &self.items {
            violations.extend(item.violations());
        }
        violations
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns a read-only view of the items.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns an item by id.
    pub fn get_item(&self, item_id: OrderItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id() == Some(item_id))
    }

    /// Returns the number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the sum of quantity × snapshot price over the current items.
    ///
    /// Validation guarantees the total is representable.
    pub fn total_price(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |total, item| total.saturating_add(item.line_total()))
    }

    /// Returns the order total, or `None` if it overflows.
    pub fn checked_total_price(&self) -> Option<Money> {
        self.items.iter().try_fold(Money::zero(), |total, item| {
            total.checked_add(item.checked_line_total()?)
        })
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// Construction
impl Order {
    /// Creates a new order in `InProgress` status.
    pub fn create_new(
        customer: Customer,
        user: User,
        items: Vec<OrderItem>,
    ) -> Result<Self, OrderError> {
        let now = Utc::now();
        let order = Self {
            id: None,
            customer,
            user,
            status: OrderStatus::InProgress,
            items,
            created_at: now,
            updated_at: now,
        };
        order.validate().map_err(OrderError::Validation)?;
        Ok(order)
    }

    /// Reconstructs a persisted order.
    pub fn with_id(
        id: OrderId,
        customer: Customer,
        user: User,
        status: OrderStatus,
        items: Vec<OrderItem>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let order = Self {
            id: Some(id),
            customer,
            user,
            status,
            items,
            created_at,
            updated_at,
        };
        order.validate().map_err(OrderError::Validation)?;
        Ok(order)
    }
}

// Command methods
impl Order {
    /// Replaces the customer.
    pub fn update_details(&mut self, customer: Customer) -> Result<(), OrderError> {
        let previous = std::mem::replace(&mut self.customer, customer);
        if let Err(e) = self.validate() {
            self.customer = previous;
            return Err(OrderError::Validation(e));
        }
        self.touch();
        Ok(())
    }

    /// Appends a new line for `offer`.
    pub fn add_order_item(&mut self, offer: &Offer, quantity: u32) -> Result<(), OrderError> {
        let item = OrderItem::create_new(offer, quantity)?;
        self.items.push(item);
        if let Err(e) = self.validate() {
            self.items.pop();
            return Err(OrderError::Validation(e));
        }
        self.touch();
        Ok(())
    }

    /// Changes the quantity of the item with the given id.
    pub fn update_order_item_quantity(
        &mut self,
        item_id: OrderItemId,
        new_quantity: u32,
    ) -> Result<(), OrderError> {
        let index = self.position_of(item_id)?;
        let previous = self.items[index].clone();
        self.items[index].update_quantity(new_quantity)?;
        if let Err(e) = self.validate() {
            self.items[index] = previous;
            return Err(OrderError::Validation(e));
        }
        self.touch();
        Ok(())
    }

    /// Removes the item with the given id.
    ///
    /// Removing the last remaining item is rejected: an order can never be
    /// emptied, it has to be cancelled instead.
    pub fn remove_order_item(&mut self, item_id: OrderItemId) -> Result<(), OrderError> {
        let index = self.position_of(item_id)?;
        let removed = self.items.remove(index);
        if let Err(e) = self.validate() {
            self.items.insert(index, removed);
            return Err(OrderError::Validation(e));
        }
        self.touch();
        Ok(())
    }

    /// Moves the order to `new_status`.
    ///
    /// Does not re-run aggregate validation.
    pub fn change_status(&mut self, new_status: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(new_status) {
            return Err(OrderError::CancelledOrderIsFinal {
                requested: new_status,
            });
        }
        self.status = new_status;
        self.touch();
        Ok(())
    }

    fn position_of(&self, item_id: OrderItemId) -> Result<usize, OrderError> {
        self.items
            .iter()
            .position(|item| item.id() == Some(item_id))
            .ok_or(OrderError::ItemNotFound { item_id })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
