//! Silverline pricing service.
//!
//! Prices silver jewellery orders for the reseller portal: line and order
//! totals from the live silver rate, GST apportionment between CGST/SGST
//! and IGST, and printable invoices for stored orders.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pricing;
pub mod qr;
pub mod routes;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::cache::AppCache;
use crate::config::Config;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub config: Arc<Config>,
}

fn cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin.clone()))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
        None => CorsLayer::new(),
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(routes::health))
        .route("/orders/:order_id/invoice", get(routes::invoice::invoice))
        .nest("/api/pricing", pricing::router())
        .nest_service("/static", static_dir)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
