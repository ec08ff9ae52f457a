//! Repository ports.
//!
//! The domain depends only on these traits; storage adapters implement
//! them. All implementations must be thread-safe (Send + Sync).

use async_trait::async_trait;
use common::{
    CategoryId, CustomerId, OfferId, OrderId, Page, PageRequest, SupplierId, UserId,
};

use crate::directory::{Category, Customer, Offer, Supplier, User};
use crate::error::RepositoryError;
use crate::order::Order;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_customer(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;

    async fn find_customer_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>>;

    /// Inserts the customer when it has no id, otherwise replaces it.
    async fn save_customer(&self, customer: Customer) -> RepositoryResult<Customer>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// Inserts the user when it has no id, otherwise replaces it.
    async fn save_user(&self, user: User) -> RepositoryResult<User>;
}

#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn find_offer(&self, id: OfferId) -> RepositoryResult<Option<Offer>>;

    /// Inserts the offer when it has no id, otherwise replaces it.
    async fn save_offer(&self, offer: Offer) -> RepositoryResult<Offer>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_category(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;

    async fn find_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;

    async fn save_category(&self, category: Category) -> RepositoryResult<Category>;
}

#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn find_supplier(&self, id: SupplierId) -> RepositoryResult<Option<Supplier>>;

    async fn save_supplier(&self, supplier: Supplier) -> RepositoryResult<Supplier>;
}

/// Storage for order aggregates.
///
/// Orders are listed oldest first.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the order when it has no id, otherwise replaces the stored
    /// one. Returns the stored order with every id assigned.
    async fn save_order(&self, order: Order) -> RepositoryResult<Order>;

    async fn find_order(&self, id: OrderId) -> RepositoryResult<Option<Order>>;

    async fn find_all_orders(&self, page: PageRequest) -> RepositoryResult<Page<Order>>;

    async fn find_orders_by_customer(
        &self,
        customer_id: CustomerId,
        page: PageRequest,
    ) -> RepositoryResult<Page<Order>>;

    async fn find_orders_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> RepositoryResult<Page<Order>>;

    async fn delete_order(&self, id: OrderId) -> RepositoryResult<()>;
}
