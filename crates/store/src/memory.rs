use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{
    CategoryId, CustomerId, OfferId, OrderId, Page, PageRequest, SupplierId, UserId,
};
use domain::{
    Category, CategoryRepository, Customer, CustomerRepository, Offer, OfferRepository, Order,
    OrderRecord, OrderRepository, RepositoryError, RepositoryResult, Supplier,
    SupplierRepository, User, UserRepository,
};
use tokio::sync::RwLock;

/// In-memory implementation of every repository port.
///
/// Orders are kept as flat [`OrderRecord`]s and rebuilt on every read by
/// joining the current customer, user and offer records, the same way a
/// relational adapter would. Saving an order whose references are not
/// stored fails, mimicking foreign-key constraints.
///
/// Each call takes its own locks; there is no cross-call transaction and
/// no version check, so concurrent read-modify-write cycles on the same
/// order can lose updates.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
    users: Arc<RwLock<HashMap<UserId, User>>>,
    offers: Arc<RwLock<HashMap<OfferId, Offer>>>,
    categories: Arc<RwLock<HashMap<CategoryId, Category>>>,
    suppliers: Arc<RwLock<HashMap<SupplierId, Supplier>>>,
    orders: Arc<RwLock<HashMap<OrderId, OrderRecord>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns the raw stored record of an order.
    pub async fn order_record(&self, id: OrderId) -> Option<OrderRecord> {
        self.orders.read().await.get(&id).cloned()
    }

    /// Clears all stored data.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
        self.offers.write().await.clear();
        self.users.write().await.clear();
        self.customers.write().await.clear();
        self.categories.write().await.clear();
        self.suppliers.write().await.clear();
    }

    /// Rebuilds orders from records, keeping only those matching `filter`.
    async fn load_orders(
        &self,
        page: PageRequest,
        filter: impl Fn(&OrderRecord) -> bool,
    ) -> RepositoryResult<Page<Order>> {
        let mut records: Vec<OrderRecord> = self
            .orders
            .read()
            .await
            .values()
            .filter(|record| filter(record))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let joined = Joined::read(self).await;
        Page::from_vec(records, page).try_map(|record| joined.assemble(record))
    }
}

/// Read guards over the tables an order joins against.
struct Joined<'a> {
    customers: tokio::sync::RwLockReadGuard<'a, HashMap<CustomerId, Customer>>,
    users: tokio::sync::RwLockReadGuard<'a, HashMap<UserId, User>>,
    offers: tokio::sync::RwLockReadGuard<'a, HashMap<OfferId, Offer>>,
}

impl<'a> Joined<'a> {
    async fn read(store: &'a InMemoryStore) -> Self {
        Self {
            customers: store.customers.read().await,
            users: store.users.read().await,
            offers: store.offers.read().await,
        }
    }

    fn assemble(&self, record: OrderRecord) -> RepositoryResult<Order> {
        let customer = self
            .customers
            .get(&record.customer_id)
            .cloned()
            .ok_or_else(|| RepositoryError::DanglingReference {
                entity: "customer",
                id: record.customer_id.to_string(),
            })?;
        let user = self
            .users
            .get(&record.user_id)
            .cloned()
            .ok_or_else(|| RepositoryError::DanglingReference {
                entity: "user",
                id: record.user_id.to_string(),
            })?;

        record.assemble(customer, user, |offer_id| self.offers.get(&offer_id).cloned())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find_customer(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn find_customer_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers
            .values()
            .find(|c| c.email().trim().eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    async fn save_customer(&self, customer: Customer) -> RepositoryResult<Customer> {
        let customer = match customer.id() {
            Some(_) => customer,
            None => customer.with_id(CustomerId::new()),
        };
        let id = customer.id().unwrap_or_default();
        self.customers.write().await.insert(id, customer.clone());
        Ok(customer)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username().trim() == username.trim())
            .cloned())
    }

    async fn save_user(&self, user: User) -> RepositoryResult<User> {
        let user = match user.id() {
            Some(_) => user,
            None => user.with_id(UserId::new()),
        };
        let id = user.id().unwrap_or_default();
        self.users.write().await.insert(id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl OfferRepository for InMemoryStore {
    async fn find_offer(&self, id: OfferId) -> RepositoryResult<Option<Offer>> {
        Ok(self.offers.read().await.get(&id).cloned())
    }

    async fn save_offer(&self, offer: Offer) -> RepositoryResult<Offer> {
        let offer = match offer.id() {
            Some(_) => offer,
            None => offer.with_id(OfferId::new()),
        };
        let id = offer.id().unwrap_or_default();
        self.offers.write().await.insert(id, offer.clone());
        Ok(offer)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_category(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .find(|c| c.name().trim().eq_ignore_ascii_case(name.trim()))
            .cloned())
    }

    async fn save_category(&self, category: Category) -> RepositoryResult<Category> {
        let category = match category.id() {
            Some(_) => category,
            None => category.with_id(CategoryId::new()),
        };
        let id = category.id().unwrap_or_default();
        self.categories.write().await.insert(id, category.clone());
        Ok(category)
    }
}

#[async_trait]
impl SupplierRepository for InMemoryStore {
    async fn find_supplier(&self, id: SupplierId) -> RepositoryResult<Option<Supplier>> {
        Ok(self.suppliers.read().await.get(&id).cloned())
    }

    async fn save_supplier(&self, supplier: Supplier) -> RepositoryResult<Supplier> {
        let supplier = match supplier.id() {
            Some(_) => supplier,
            None => supplier.with_id(SupplierId::new()),
        };
        let id = supplier.id().unwrap_or_default();
        self.suppliers.write().await.insert(id, supplier.clone());
        Ok(supplier)
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn save_order(&self, order: Order) -> RepositoryResult<Order> {
        let inserting = order.id().is_none();
        let record = OrderRecord::from_order(&order)?;

        // Resolve references before writing so a dangling record is never stored.
        let saved = Joined::read(self).await.assemble(record.clone())?;

        self.orders.write().await.insert(record.id, record);
        tracing::debug!(order_id = ?saved.id(), inserting, "order stored");
        Ok(saved)
    }

    async fn find_order(&self, id: OrderId) -> RepositoryResult<Option<Order>> {
        let record = self.orders.read().await.get(&id).cloned();
        match record {
            Some(record) => Ok(Some(Joined::read(self).await.assemble(record)?)),
            None => Ok(None),
        }
    }

    async fn find_all_orders(&self, page: PageRequest) -> RepositoryResult<Page<Order>> {
        self.load_orders(page, |_| true).await
    }

    async fn find_orders_by_customer(
        &self,
        customer_id: CustomerId,
        page: PageRequest,
    ) -> RepositoryResult<Page<Order>> {
        self.load_orders(page, |record| record.customer_id == customer_id)
            .await
    }

    async fn find_orders_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> RepositoryResult<Page<Order>> {
        self.load_orders(page, |record| record.user_id == user_id).await
    }

    async fn delete_order(&self, id: OrderId) -> RepositoryResult<()> {
        self.orders.write().await.remove(&id);
        Ok(())
    }
}
