//! Catalog records: categories, suppliers and the offers they classify.

use chrono::{DateTime, Utc};
use common::{CategoryId, OfferId, SupplierId};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::validation::{Checker, Validate, ValidationErrors, Violation, trimmed};

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: Option<CategoryId>,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let now = Utc::now();
        let category = Self {
            id: None,
            name: trimmed(name),
            description,
            created_at: now,
            updated_at: now,
        };
        category.validate()?;
        Ok(category)
    }

    /// Returns the same category carrying a storage-assigned id.
    pub fn with_id(mut self, id: CategoryId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<CategoryId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Validate for Category {
    fn violations(&self) -> Vec<Violation> {
        Checker::new().text(&self.name, "name", 100).finish()
    }
}

/// A supplier of offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    id: Option<SupplierId>,
    name: String,
    email: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Supplier {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let now = Utc::now();
        let supplier = Self {
            id: None,
            name: trimmed(name),
            email: trimmed(email),
            phone,
            created_at: now,
            updated_at: now,
        };
        supplier.validate()?;
        Ok(supplier)
    }

    /// Returns the same supplier carrying a storage-assigned id.
    pub fn with_id(mut self, id: SupplierId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<SupplierId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Validate for Supplier {
    fn violations(&self) -> Vec<Violation> {
        Checker::new()
            .text(&self.name, "name", 200)
            .email(&self.email, "email")
            .finish()
    }
}

/// Whether an offer is a physical product or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferKind {
    #[default]
    Product,
    Service,
}

/// Something that can be sold on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    id: Option<OfferId>,
    name: String,
    description: Option<String>,
    price: Money,
    kind: OfferKind,
    category_id: Option<CategoryId>,
    supplier_id: Option<SupplierId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Offer {
    /// Creates a new, not yet persisted offer.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: Money,
        kind: OfferKind,
    ) -> Result<Self, ValidationErrors> {
        let now = Utc::now();
        let offer = Self {
            id: None,
            name: trimmed(name),
            description,
            price,
            kind,
            category_id: None,
            supplier_id: None,
            created_at: now,
            updated_at: now,
        };
        offer.validate()?;
        Ok(offer)
    }

    /// Files the offer under a category.
    pub fn in_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Links the offer to its supplier.
    pub fn supplied_by(mut self, supplier_id: Option<SupplierId>) -> Self {
        self.supplier_id = supplier_id;
        self
    }

    /// Returns the same offer carrying a storage-assigned id.
    pub fn with_id(mut self, id: OfferId) -> Self {
        self.id = Some(id);
        self
    }

    /// Changes the list price. Existing order items keep their snapshot.
    pub fn change_price(&mut self, price: Money) -> Result<(), ValidationErrors> {
        let previous = self.price;
        self.price = price;
        if let Err(e) = self.validate() {
            self.price = previous;
            return Err(e);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn id(&self) -> Option<OfferId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn kind(&self) -> OfferKind {
        self.kind
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    pub fn supplier_id(&self) -> Option<SupplierId> {
        self.supplier_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Validate for Offer {
    fn violations(&self) -> Vec<Violation> {
        Checker::new()
            .text(&self.name, "name", 200)
            .check(self.price.is_positive(), "price", "must be greater than 0")
            .finish()
    }
}
