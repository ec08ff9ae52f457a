//! Customers and staff users.

use chrono::{DateTime, Utc};
use common::{CustomerId, UserId};
use serde::{Deserialize, Serialize};

use crate::validation::{Checker, Validate, ValidationErrors, Violation, trimmed};

/// A customer who places orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: Option<CustomerId>,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new, not yet persisted customer.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let now = Utc::now();
        let customer = Self {
            id: None,
            name: trimmed(name),
            email: trimmed(email),
            phone,
            address,
            created_at: now,
            updated_at: now,
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Returns the same customer carrying a storage-assigned id.
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<CustomerId> {
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

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Validate for Customer {
    fn violations(&self) -> Vec<Violation> {
        Checker::new()
            .text(&self.name, "name", 200)
            .email(&self.email, "email")
            .finish()
    }
}

/// Role of a staff user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    Staff,
}

/// A staff member who operates orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: Option<UserId>,
    username: String,
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, not yet persisted user.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<Self, ValidationErrors> {
        let now = Utc::now();
        let user = Self {
            id: None,
            username: trimmed(username),
            email: trimmed(email),
            role,
            created_at: now,
            updated_at: now,
        };
        user.validate()?;
        Ok(user)
    }

    /// Returns the same user carrying a storage-assigned id.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Validate for User {
    fn violations(&self) -> Vec<Violation> {
        Checker::new()
            .text(&self.username, "username", 50)
            .email(&self.email, "email")
            .finish()
    }
}
