//! HTTP API server for the order-management backend.
//!
//! Provides REST endpoints for orders and the directory records they
//! reference, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use domain::{DirectoryService, OrderService};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::{AppState, AppStore, directory, orders};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: AppStore>(state: Arc<AppState<S>>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/orders",
            get(orders::list::<S>).post(orders::create::<S>),
        )
        .route(
            "/orders/{id}",
            get(orders::get::<S>)
                .put(orders::update::<S>)
                .delete(orders::delete::<S>),
        )
        .route("/orders/{id}/status", put(orders::change_status::<S>))
        .route("/orders/{id}/items", post(orders::add_item::<S>))
        .route(
            "/orders/{id}/items/{item_id}",
            put(orders::update_item::<S>).delete(orders::remove_item::<S>),
        )
        .route("/categories", post(directory::create_category::<S>))
        .route("/categories/{id}", get(directory::get_category::<S>))
        .route("/suppliers", post(directory::create_supplier::<S>))
        .route("/suppliers/{id}", get(directory::get_supplier::<S>))
        .route("/customers", post(directory::create_customer::<S>))
        .route("/customers/{id}", get(directory::get_customer::<S>))
        .route("/users", post(directory::create_user::<S>))
        .route("/users/{id}", get(directory::get_user::<S>))
        .route("/offers", post(directory::create_offer::<S>))
        .route("/offers/{id}", get(directory::get_offer::<S>))
        .route("/offers/{id}/price", put(directory::update_offer_price::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state with both services sharing one store.
pub fn create_default_state<S: AppStore>(store: S, config: &Config) -> Arc<AppState<S>> {
    Arc::new(AppState {
        order_service: OrderService::new(store.clone()),
        directory_service: DirectoryService::new(store),
        default_page_size: config.default_page_size,
        max_page_size: config.max_page_size,
    })
}
