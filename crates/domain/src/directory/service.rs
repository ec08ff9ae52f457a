//! Use-cases for the simple directory records.

use common::{CategoryId, CustomerId, OfferId, SupplierId, UserId};
use tokio::sync::Mutex;

use crate::error::DomainError;
use crate::money::Money;
use crate::ports::{
    CategoryRepository, CustomerRepository, OfferRepository, SupplierRepository, UserRepository,
};

use super::{Category, Customer, Offer, OfferKind, Role, Supplier, User};

/// Input for registering an offer.
#[derive(Debug, Clone)]
pub struct NewOffer {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub kind: OfferKind,
    pub category_id: Option<CategoryId>,
    pub supplier_id: Option<SupplierId>,
}

/// Service registering and looking up customers, users and catalog records.
///
/// Uniqueness rules (category name, customer email, username) are checked
/// through repository lookups. The lookup and the save run under one
/// registration lock, so concurrent registrations through the same service
/// cannot both pass the check. The lock does not span processes: a store
/// shared by several services needs its own unique constraint.
pub struct DirectoryService<S> {
    store: S,
    registrations: Mutex<()>,
}

impl<S> DirectoryService<S>
where
    S: CustomerRepository
        + UserRepository
        + OfferRepository
        + CategoryRepository
        + SupplierRepository,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            registrations: Mutex::new(()),
        }
    }

    #[tracing::instrument(skip(self, description))]
    pub async fn register_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Category, DomainError> {
        let category = Category::new(name, description)?;
        let _registering = self.registrations.lock().await;
        if self
            .store
            .find_category_by_name(category.name())
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "category '{}' already exists",
                category.name()
            )));
        }
        let saved = self.store.save_category(category).await?;
        tracing::info!(category_id = ?saved.id(), "category registered");
        Ok(saved)
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Category, DomainError> {
        self.store
            .find_category(id)
            .await?
            .ok_or(DomainError::CategoryNotFound(id))
    }

    #[tracing::instrument(skip(self, phone))]
    pub async fn register_supplier(
        &self,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<Supplier, DomainError> {
        let supplier = Supplier::new(name, email, phone)?;
        let saved = self.store.save_supplier(supplier).await?;
        tracing::info!(supplier_id = ?saved.id(), "supplier registered");
        Ok(saved)
    }

    pub async fn get_supplier(&self, id: SupplierId) -> Result<Supplier, DomainError> {
        self.store
            .find_supplier(id)
            .await?
            .ok_or(DomainError::SupplierNotFound(id))
    }

    #[tracing::instrument(skip(self, phone, address))]
    pub async fn register_customer(
        &self,
        name: String,
        email: String,
        phone: Option<String>,
        address: Option<String>,
    ) -> Result<Customer, DomainError> {
        let customer = Customer::new(name, email, phone, address)?;
        let _registering = self.registrations.lock().await;
        if self
            .store
            .find_customer_by_email(customer.email())
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "customer with email '{}' already exists",
                customer.email()
            )));
        }
        let saved = self.store.save_customer(customer).await?;
        tracing::info!(customer_id = ?saved.id(), "customer registered");
        Ok(saved)
    }

    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, DomainError> {
        self.store
            .find_customer(id)
            .await?
            .ok_or(DomainError::CustomerNotFound(id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn register_user(
        &self,
        username: String,
        email: String,
        role: Role,
    ) -> Result<User, DomainError> {
        let user = User::new(username, email, role)?;
        let _registering = self.registrations.lock().await;
        if self
            .store
            .find_user_by_username(user.username())
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "username '{}' is already taken",
                user.username()
            )));
        }
        let saved = self.store.save_user(user).await?;
        tracing::info!(user_id = ?saved.id(), "user registered");
        Ok(saved)
    }

    pub async fn get_user(&self, id: UserId) -> Result<User, DomainError> {
        self.store
            .find_user(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    /// Registers an offer; referenced category and supplier must exist.
    #[tracing::instrument(skip(self))]
    pub async fn register_offer(&self, new: NewOffer) -> Result<Offer, DomainError> {
        let offer = Offer::new(new.name, new.description, new.price, new.kind)?
            .in_category(new.category_id)
            .supplied_by(new.supplier_id);

        if let Some(category_id) = new.category_id {
            self.get_category(category_id).await?;
        }
        if let Some(supplier_id) = new.supplier_id {
            self.get_supplier(supplier_id).await?;
        }

        let saved = self.store.save_offer(offer).await?;
        tracing::info!(offer_id = ?saved.id(), price = %saved.price(), "offer registered");
        Ok(saved)
    }

    pub async fn get_offer(&self, id: OfferId) -> Result<Offer, DomainError> {
        self.store
            .find_offer(id)
            .await?
            .ok_or(DomainError::OfferNotFound(id))
    }

    /// Changes an offer's list price. Items already on orders keep the
    /// price they were sold at.
    #[tracing::instrument(skip(self))]
    pub async fn update_offer_price(&self, id: OfferId, price: Money) -> Result<Offer, DomainError> {
        let mut offer = self.get_offer(id).await?;
        offer.change_price(price)?;
        let saved = self.store.save_offer(offer).await?;
        tracing::info!(offer_id = %id, price = %saved.price(), "offer price changed");
        Ok(saved)
    }
}
