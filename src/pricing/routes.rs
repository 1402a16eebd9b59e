//! HTTP handlers for the pricing API.
//!
//! Mounted under `/api/pricing`. Calculation endpoints are pure; only
//! `/quote` reads from the database.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::AppState;

use super::calculators::{
    calculate_line_price, calculate_order_totals, LineInput, OrderTotals, PriceBreakdown,
};
use super::gst::{all_states, calculate_gst_breakdown, GstBreakdown};
use super::requests::{GstBreakdownRequest, OrderTotalsRequest, QuoteRequest};
use super::responses::{GstinResponse, OrderQuoteResponse, PricingErrorResponse, StateResponse};
use super::services::{self, PricingError, QuoteLineInput};

/// Pricing API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/line", post(line_price))
        .route("/order-totals", post(order_totals))
        .route("/gst-breakdown", post(gst_breakdown))
        .route("/quote", post(quote))
        .route("/states", get(states))
        .route("/gstin/:gst_number", get(gstin))
}

impl PricingError {
    /// HTTP status and machine-readable tag for this error.
    ///
    /// Unusable carts are the caller's fault (422). Missing setup on our side
    /// (no published rate, no company settings, database down) is 503.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            PricingError::MissingSilverRate => {
                (StatusCode::SERVICE_UNAVAILABLE, "missing_silver_rate")
            }
            PricingError::ResellerNotFound { .. } => {
                (StatusCode::NOT_FOUND, "reseller_not_found")
            }
            PricingError::InactiveReseller { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "inactive_reseller")
            }
            PricingError::ProductNotFound { .. } => (StatusCode::NOT_FOUND, "product_not_found"),
            PricingError::ConfigurationError { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "configuration_error")
            }
            PricingError::InvalidQuote { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_quote")
            }
            PricingError::Database(_) => (StatusCode::SERVICE_UNAVAILABLE, "database_error"),
        }
    }
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();

        let details = match &self {
            PricingError::ConfigurationError { errors, .. }
            | PricingError::InvalidQuote { errors, .. } => {
                Some(serde_json::json!({ "errors": errors }))
            }
            _ => None,
        };

        // Database details stay in the log
        let message = match &self {
            PricingError::Database(e) => {
                tracing::error!("Database error during pricing: {}", e);
                "Pricing data is temporarily unavailable".to_string()
            }
            other => other.to_string(),
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Price a single line
async fn line_price(Json(input): Json<LineInput>) -> Json<PriceBreakdown> {
    Json(calculate_line_price(&input))
}

/// Price all items of an order
async fn order_totals(Json(req): Json<OrderTotalsRequest>) -> Json<OrderTotals> {
    Json(calculate_order_totals(
        &req.items,
        req.silver_rate,
        req.gst_rate,
        req.extra_percent,
    ))
}

/// Split GST between CGST/SGST and IGST
async fn gst_breakdown(Json(req): Json<GstBreakdownRequest>) -> Json<GstBreakdown> {
    Json(calculate_gst_breakdown(
        req.taxable_amount,
        req.gst_rate,
        req.company_state_code.as_deref(),
        req.reseller_state_code.as_deref(),
    ))
}

/// Quote a reseller's cart at the current silver rate
async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<OrderQuoteResponse>, PricingError> {
    let lines: Vec<QuoteLineInput> = req.lines.iter().map(QuoteLineInput::from).collect();
    let quote = services::quote_order(&state.db, &state.cache, req.reseller_id, &lines).await?;
    Ok(Json(quote.into()))
}

/// GST state table
async fn states() -> Json<Vec<StateResponse>> {
    Json(
        all_states()
            .map(|(code, name)| StateResponse { code, name })
            .collect(),
    )
}

/// Describe a GSTIN
async fn gstin(Path(gst_number): Path<String>) -> Json<GstinResponse> {
    Json(GstinResponse::from_gst_number(gst_number.trim()))
}
