//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{CustomerId, OfferId, OrderId, OrderItemId, Page, UserId};
use domain::{
    AddOrderItem, ChangeOrderStatus, CreateOrder, OrderLine, OrderResponse, OrderStatus,
    RemoveOrderItem, UpdateOrder, UpdateOrderItemQuantity,
};
use serde::Deserialize;

use super::{AppState, AppStore, parse_id};
use crate::error::ApiError;
use crate::extract::ApiJson;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
}

#[derive(Deserialize)]
pub struct OrderLineRequest {
    pub offer_id: String,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct UpdateOrderRequest {
    pub customer_id: String,
}

#[derive(Deserialize)]
pub struct ChangeStatusRequest {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct QuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListOrdersQuery {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub customer_id: Option<String>,
    pub user_id: Option<String>,
}

// -- Handlers --

/// POST /orders: create an order from offer lines.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let customer_id: CustomerId = parse_id("customer", &req.customer_id)?;
    let user_id: UserId = parse_id("user", &req.user_id)?;
    let lines = req
        .items
        .iter()
        .map(|line| Ok(OrderLine::new(parse_id("offer", &line.offer_id)?, line.quantity)))
        .collect::<Result<Vec<_>, ApiError>>()?;

    let order = state
        .order_service
        .create_order(CreateOrder::new(customer_id, user_id, lines))
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders: list orders, optionally for one customer or one user.
#[tracing::instrument(skip(state))]
pub async fn list<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Page<OrderResponse>>, ApiError> {
    let page = state.page_request(query.page, query.size);

    let orders = match (query.customer_id.as_deref(), query.user_id.as_deref()) {
        (Some(_), Some(_)) => {
            return Err(ApiError::BadRequest(
                "Filter by customer_id or user_id, not both".to_string(),
            ));
        }
        (Some(customer), None) => {
            let customer_id: CustomerId = parse_id("customer", customer)?;
            state
                .order_service
                .list_orders_by_customer(customer_id, page)
                .await?
        }
        (None, Some(user)) => {
            let user_id: UserId = parse_id("user", user)?;
            state.order_service.list_orders_by_user(user_id, page).await?
        }
        (None, None) => state.order_service.list_orders(page).await?,
    };

    Ok(Json(orders))
}

/// GET /orders/{id}
#[tracing::instrument(skip(state))]
pub async fn get<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = parse_id("order", &id)?;
    Ok(Json(state.order_service.get_order(order_id).await?))
}

/// PUT /orders/{id}: reassign the order to another customer.
#[tracing::instrument(skip(state, req))]
pub async fn update<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = parse_id("order", &id)?;
    let customer_id: CustomerId = parse_id("customer", &req.customer_id)?;

    let order = state
        .order_service
        .update_order(UpdateOrder::new(order_id, customer_id))
        .await?;
    Ok(Json(order))
}

/// DELETE /orders/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let order_id: OrderId = parse_id("order", &id)?;
    state.order_service.delete_order(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /orders/{id}/status
#[tracing::instrument(skip(state, req))]
pub async fn change_status<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ChangeStatusRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = parse_id("order", &id)?;
    let status = req
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let order = state
        .order_service
        .change_order_status(ChangeOrderStatus::new(order_id, status))
        .await?;
    Ok(Json(order))
}

/// POST /orders/{id}/items
#[tracing::instrument(skip(state, req))]
pub async fn add_item<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<OrderLineRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order_id: OrderId = parse_id("order", &id)?;
    let offer_id: OfferId = parse_id("offer", &req.offer_id)?;

    let order = state
        .order_service
        .add_order_item(AddOrderItem::new(order_id, offer_id, req.quantity))
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /orders/{id}/items/{item_id}: change a line's quantity.
#[tracing::instrument(skip(state, req))]
pub async fn update_item<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, item_id)): Path<(String, String)>,
    ApiJson(req): ApiJson<QuantityRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = parse_id("order", &id)?;
    let item_id: OrderItemId = parse_id("order item", &item_id)?;

    let order = state
        .order_service
        .update_order_item_quantity(UpdateOrderItemQuantity::new(
            order_id,
            item_id,
            req.quantity,
        ))
        .await?;
    Ok(Json(order))
}

/// DELETE /orders/{id}/items/{item_id}
#[tracing::instrument(skip(state))]
pub async fn remove_item<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = parse_id("order", &id)?;
    let item_id: OrderItemId = parse_id("order item", &item_id)?;

    let order = state
        .order_service
        .remove_order_item(RemoveOrderItem::new(order_id, item_id))
        .await?;
    Ok(Json(order))
}
