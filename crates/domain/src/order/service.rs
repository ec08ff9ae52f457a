//! Order use-cases.

use common::{CustomerId, OfferId, OrderId, Page, PageRequest, UserId};

use crate::directory::Offer;
use crate::error::DomainError;
use crate::ports::{CustomerRepository, OfferRepository, OrderRepository, UserRepository};

use super::{
    AddOrderItem, ChangeOrderStatus, CreateOrder, Order, OrderItem, OrderResponse,
    RemoveOrderItem, UpdateOrder, UpdateOrderItemQuantity,
};

/// Service running the order use-cases.
///
/// Each operation is a single load → mutate → save sequence. There is no
/// locking around it; concurrent writers to the same order race and the
/// last save wins.
pub struct OrderService<S> {
    store: S,
}

impl<S> OrderService<S>
where
    S: OrderRepository + CustomerRepository + UserRepository + OfferRepository,
{
    /// Creates a new order service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a new order.
    ///
    /// Offers are resolved first, then the customer, then the user; the
    /// first missing reference fails the command.
    #[tracing::instrument(skip(self, cmd), fields(customer_id = %cmd.customer_id, user_id = %cmd.user_id, lines = cmd.items.len()))]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<OrderResponse, DomainError> {
        let result = async {
            let mut offers = Vec::with_capacity(cmd.items.len());
            for line in &cmd.items {
                offers.push((self.load_offer(line.offer_id).await?, line.quantity));
            }

            let customer = self
                .store
                .find_customer(cmd.customer_id)
                .await?
                .ok_or(DomainError::CustomerNotFound(cmd.customer_id))?;
            let user = self
                .store
                .find_user(cmd.user_id)
                .await?
                .ok_or(DomainError::UserNotFound(cmd.user_id))?;

            let items = offers
                .iter()
                .map(|(offer, quantity)| OrderItem::create_new(offer, *quantity))
                .collect::<Result<Vec<_>, _>>()?;

            let order = Order::create_new(customer, user, items)?;
            Ok::<_, DomainError>(self.store.save_order(order).await?)
        }
        .await;

        let saved = track("create", result)?;
        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = ?saved.id(), total = %saved.total_price(), "order created");
        Ok(OrderResponse::from(saved))
    }

    /// Adds a line to an existing order.
    #[tracing::instrument(skip(self))]
    pub async fn add_order_item(&self, cmd: AddOrderItem) -> Result<OrderResponse, DomainError> {
        let result = async {
            let mut order = self.load_order(cmd.order_id).await?;
            let offer = self.load_offer(cmd.offer_id).await?;
            order.add_order_item(&offer, cmd.quantity)?;
            Ok::<_, DomainError>(self.store.save_order(order).await?)
        }
        .await;

        self.finish("add_item", result)
    }

    /// Removes a line from an order.
    #[tracing::instrument(skip(self))]
    pub async fn remove_order_item(
        &self,
        cmd: RemoveOrderItem,
    ) -> Result<OrderResponse, DomainError> {
        let result = async {
            let mut order = self.load_order(cmd.order_id).await?;
            order.remove_order_item(cmd.item_id)?;
            Ok::<_, DomainError>(self.store.save_order(order).await?)
        }
        .await;

        self.finish("remove_item", result)
    }

    /// Changes the quantity of a line.
    #[tracing::instrument(skip(self))]
    pub async fn update_order_item_quantity(
        &self,
        cmd: UpdateOrderItemQuantity,
    ) -> Result<OrderResponse, DomainError> {
        let result = async {
            let mut order = self.load_order(cmd.order_id).await?;
            order.update_order_item_quantity(cmd.item_id, cmd.quantity)?;
            Ok::<_, DomainError>(self.store.save_order(order).await?)
        }
        .await;

        self.finish("update_item_quantity", result)
    }

    /// Moves an order to another status.
    #[tracing::instrument(skip(self))]
    pub async fn change_order_status(
        &self,
        cmd: ChangeOrderStatus,
    ) -> Result<OrderResponse, DomainError> {
        let result = async {
            let status = cmd
                .status
                .ok_or_else(|| DomainError::IllegalArgument("status is required".to_string()))?;
            let mut order = self.load_order(cmd.order_id).await?;
            order.change_status(status)?;
            Ok::<_, DomainError>(self.store.save_order(order).await?)
        }
        .await;

        self.finish("change_status", result)
    }

    /// Reassigns an order to another customer.
    #[tracing::instrument(skip(self))]
    pub async fn update_order(&self, cmd: UpdateOrder) -> Result<OrderResponse, DomainError> {
        let result = async {
            let mut order = self.load_order(cmd.order_id).await?;
            let customer = self
                .store
                .find_customer(cmd.customer_id)
                .await?
                .ok_or(DomainError::CustomerNotFound(cmd.customer_id))?;
            order.update_details(customer)?;
            Ok::<_, DomainError>(self.store.save_order(order).await?)
        }
        .await;

        self.finish("update_customer", result)
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<OrderResponse, DomainError> {
        let order = self.load_order(order_id).await?;
        Ok(OrderResponse::from(order))
    }

    /// Lists all orders, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(
        &self,
        page: PageRequest,
    ) -> Result<Page<OrderResponse>, DomainError> {
        let orders = self.store.find_all_orders(page).await?;
        Ok(orders.map(OrderResponse::from))
    }

    /// Lists the orders of one customer.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders_by_customer(
        &self,
        customer_id: CustomerId,
        page: PageRequest,
    ) -> Result<Page<OrderResponse>, DomainError> {
        let orders = self.store.find_orders_by_customer(customer_id, page).await?;
        Ok(orders.map(OrderResponse::from))
    }

    /// Lists the orders handled by one staff user.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<OrderResponse>, DomainError> {
        let orders = self.store.find_orders_by_user(user_id, page).await?;
        Ok(orders.map(OrderResponse::from))
    }

    /// Deletes an order after checking that it exists.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId) -> Result<(), DomainError> {
        let result = async {
            self.load_order(order_id).await?;
            self.store.delete_order(order_id).await?;
            Ok::<_, DomainError>(())
        }
        .await;

        track("delete", result)?;
        metrics::counter!("orders_deleted_total").increment(1);
        tracing::info!(%order_id, "order deleted");
        Ok(())
    }

    async fn load_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.store
            .find_order(order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(order_id))
    }

    async fn load_offer(&self, offer_id: OfferId) -> Result<Offer, DomainError> {
        self.store
            .find_offer(offer_id)
            .await?
            .ok_or(DomainError::OfferNotFound(offer_id))
    }

    fn finish(
        &self,
        operation: &'static str,
        result: Result<Order, DomainError>,
    ) -> Result<OrderResponse, DomainError> {
        let order = track(operation, result)?;
        metrics::counter!("order_mutations_total", "operation" => operation).increment(1);
        tracing::debug!(order_id = ?order.id(), operation, "order updated");
        Ok(OrderResponse::from(order))
    }
}

/// Records a failed use-case before handing the error back to the caller.
fn track<T>(operation: &'static str, result: Result<T, DomainError>) -> Result<T, DomainError> {
    if let Err(e) = &result {
        metrics::counter!("order_failures_total", "operation" => operation, "kind" => e.kind())
            .increment(1);
        tracing::warn!(operation, error = %e, "order use-case rejected");
    }
    result
}
