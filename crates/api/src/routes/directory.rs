//! Endpoints for the records orders refer to: categories, suppliers,
//! customers, staff users and offers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CategoryId, CustomerId, OfferId, SupplierId, UserId};
use domain::{Category, Customer, Money, NewOffer, Offer, OfferKind, Role, Supplier, User};
use serde::Deserialize;

use super::{AppState, AppStore, parse_id};
use crate::error::ApiError;
use crate::extract::ApiJson;

// -- Request types --

#[derive(Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct SupplierRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Deserialize)]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Deserialize)]
pub struct OfferRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub kind: OfferKind,
    pub category_id: Option<String>,
    pub supplier_id: Option<String>,
}

#[derive(Deserialize)]
pub struct PriceRequest {
    pub price: Money,
}

// -- Categories --

/// POST /categories
#[tracing::instrument(skip(state, req))]
pub async fn create_category<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(req): ApiJson<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state
        .directory_service
        .register_category(req.name, req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /categories/{id}
#[tracing::instrument(skip(state))]
pub async fn get_category<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let id: CategoryId = parse_id("category", &id)?;
    Ok(Json(state.directory_service.get_category(id).await?))
}

// -- Suppliers --

/// POST /suppliers
#[tracing::instrument(skip(state, req))]
pub async fn create_supplier<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(req): ApiJson<SupplierRequest>,
) -> Result<(StatusCode, Json<Supplier>), ApiError> {
    let supplier = state
        .directory_service
        .register_supplier(req.name, req.email, req.phone)
        .await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// GET /suppliers/{id}
#[tracing::instrument(skip(state))]
pub async fn get_supplier<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Supplier>, ApiError> {
    let id: SupplierId = parse_id("supplier", &id)?;
    Ok(Json(state.directory_service.get_supplier(id).await?))
}

// -- Customers --

/// POST /customers
#[tracing::instrument(skip(state, req))]
pub async fn create_customer<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(req): ApiJson<CustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = state
        .directory_service
        .register_customer(req.name, req.email, req.phone, req.address)
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /customers/{id}
#[tracing::instrument(skip(state))]
pub async fn get_customer<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let id: CustomerId = parse_id("customer", &id)?;
    Ok(Json(state.directory_service.get_customer(id).await?))
}

// -- Users --

/// POST /users
#[tracing::instrument(skip(state, req))]
pub async fn create_user<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(req): ApiJson<UserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .directory_service
        .register_user(req.username, req.email, req.role)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/{id}
#[tracing::instrument(skip(state))]
pub async fn get_user<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id: UserId = parse_id("user", &id)?;
    Ok(Json(state.directory_service.get_user(id).await?))
}

// -- Offers --

/// POST /offers
#[tracing::instrument(skip(state, req))]
pub async fn create_offer<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(req): ApiJson<OfferRequest>,
) -> Result<(StatusCode, Json<Offer>), ApiError> {
    let category_id = req
        .category_id
        .as_deref()
        .map(|raw| parse_id::<CategoryId>("category", raw))
        .transpose()?;
    let supplier_id = req
        .supplier_id
        .as_deref()
        .map(|raw| parse_id::<SupplierId>("supplier", raw))
        .transpose()?;

    let offer = state
        .directory_service
        .register_offer(NewOffer {
            name: req.name,
            description: req.description,
            price: req.price,
            kind: req.kind,
            category_id,
            supplier_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

/// GET /offers/{id}
#[tracing::instrument(skip(state))]
pub async fn get_offer<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Offer>, ApiError> {
    let id: OfferId = parse_id("offer", &id)?;
    Ok(Json(state.directory_service.get_offer(id).await?))
}

/// PUT /offers/{id}/price: change the list price. Existing order lines
/// keep the price they were sold at.
#[tracing::instrument(skip(state, req))]
pub async fn update_offer_price<S: AppStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<PriceRequest>,
) -> Result<Json<Offer>, ApiError> {
    let id: OfferId = parse_id("offer", &id)?;
    let offer = state
        .directory_service
        .update_offer_price(id, req.price)
        .await?;
    Ok(Json(offer))
}
