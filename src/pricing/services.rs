//! Pricing service functions with database access.
//!
//! These functions fetch pricing inputs from the cache and database and
//! hand them to the pure calculators.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::AppError;

use super::calculators::{calculate_order_totals, OrderItem, OrderTotals};
use super::gst::{calculate_gst_breakdown, get_invoice_title, GstBreakdown};
use super::models::{to_f64, CompanySettings, SilverRate};
use super::queries;

/// One requested line of a quote
#[derive(Debug, Clone)]
pub struct QuoteLineInput {
    pub product_id: Uuid,
    pub weight_kg: f64,
}

/// Priced quote for a reseller's cart
#[derive(Debug, Clone, Serialize)]
pub struct OrderQuote {
    pub reseller_id: Uuid,
    pub invoice_title: &'static str,
    pub silver_rate: f64,
    pub silver_rate_effective_at: DateTime<Utc>,
    pub extra_percent: f64,
    pub gst_rate: f64,
    pub totals: OrderTotals,
    pub gst: GstBreakdown,
}

/// Pricing service error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum PricingError {
    #[error("No silver rate has been published")]
    MissingSilverRate,

    #[error("Reseller {reseller_id} not found")]
    ResellerNotFound { reseller_id: String },

    #[error("Reseller {reseller_id} is not active")]
    InactiveReseller { reseller_id: String },

    #[error("No product found for {product_id} ({context})")]
    ProductNotFound { product_id: String, context: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String, errors: Vec<String> },

    /// The cart itself is unusable (no lines, bad weights).
    #[error("Invalid quote: {message}")]
    InvalidQuote { message: String, errors: Vec<String> },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<AppError> for PricingError {
    fn from(err: AppError) -> Self {
        PricingError::Database(err.to_string())
    }
}

/// Current silver rate, cache first.
pub async fn current_silver_rate(
    pool: &PgPool,
    cache: &AppCache,
) -> Result<SilverRate, PricingError> {
    if let Some(cached) = cache.silver_rate.get(AppCache::SILVER_RATE_KEY).await {
        tracing::debug!("Cache HIT for silver rate");
        return Ok((*cached).clone());
    }

    tracing::debug!("Cache MISS for silver rate");
    let rate = queries::get_current_silver_rate(pool, Utc::now())
        .await?
        .ok_or(PricingError::MissingSilverRate)?;

    cache
        .silver_rate
        .insert(AppCache::SILVER_RATE_KEY.to_string(), Arc::new(rate.clone()))
        .await;

    Ok(rate)
}

/// Company settings, cache first.
pub async fn company_settings(
    pool: &PgPool,
    cache: &AppCache,
) -> Result<CompanySettings, PricingError> {
    if let Some(cached) = cache.company_settings.get(AppCache::COMPANY_SETTINGS_KEY).await {
        tracing::debug!("Cache HIT for company settings");
        return Ok((*cached).clone());
    }

    tracing::debug!("Cache MISS for company settings");
    let settings = queries::get_company_settings(pool)
        .await?
        .ok_or_else(|| PricingError::ConfigurationError {
            message: "Company settings have not been configured".to_string(),
            errors: vec!["company_settings is empty".to_string()],
        })?;

    cache
        .company_settings
        .insert(
            AppCache::COMPANY_SETTINGS_KEY.to_string(),
            Arc::new(settings.clone()),
        )
        .await;

    Ok(settings)
}

fn validate_lines(lines: &[QuoteLineInput]) -> Result<(), PricingError> {
    if lines.is_empty() {
        return Err(PricingError::InvalidQuote {
            message: "A quote needs at least one line".to_string(),
            errors: vec!["lines is empty".to_string()],
        });
    }

    let errors: Vec<String> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.weight_kg.is_finite() || line.weight_kg <= 0.0)
        .map(|(i, line)| format!("lines[{}].weight_kg must be positive, got {}", i, line.weight_kg))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(PricingError::InvalidQuote {
            message: "Invalid quote lines".to_string(),
            errors,
        })
    }
}

/// Price a reseller's cart against the current silver rate.
///
/// Each line takes its tunch and labor from the product and the offer
/// from the reseller's discount setup. GST is apportioned on the order
/// subtotal using the company and reseller state codes.
pub async fn quote_order(
    pool: &PgPool,
    cache: &AppCache,
    reseller_id: Uuid,
    lines: &[QuoteLineInput],
) -> Result<OrderQuote, PricingError> {
    validate_lines(lines)?;

    let reseller = queries::get_reseller(pool, reseller_id)
        .await?
        .ok_or_else(|| PricingError::ResellerNotFound {
            reseller_id: reseller_id.to_string(),
        })?;
    if !reseller.is_active {
        return Err(PricingError::InactiveReseller {
            reseller_id: reseller_id.to_string(),
        });
    }

    let rate = current_silver_rate(pool, cache).await?;
    let settings = company_settings(pool, cache).await?;

    let product_ids: Vec<Uuid> = lines.iter().map(|line| line.product_id).collect();
    let products: HashMap<Uuid, _> = queries::get_products(pool, &product_ids)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let offer_type = reseller.offer_type();
    let offer_value = reseller.offer_value();

    let items = lines
        .iter()
        .map(|line| {
            let product = products
                .get(&line.product_id)
                .ok_or_else(|| PricingError::ProductNotFound {
                    product_id: line.product_id.to_string(),
                    context: "not in catalog".to_string(),
                })?;
            if !product.is_active {
                return Err(PricingError::ProductNotFound {
                    product_id: line.product_id.to_string(),
                    context: "product is inactive".to_string(),
                });
            }

            Ok(OrderItem {
                product_id: Some(product.id),
                product_name: Some(product.name.clone()),
                weight_kg: line.weight_kg,
                tunch_percentage: to_f64(product.tunch_percentage),
                labor_per_kg: to_f64(product.labor_per_kg),
                offer_enabled: reseller.offer_enabled,
                offer_type,
                offer_value,
            })
        })
        .collect::<Result<Vec<_>, PricingError>>()?;

    let silver_rate = to_f64(rate.rate_per_gram);
    let gst_rate = settings.effective_gst_rate();
    let extra_percent = to_f64(settings.extra_percent);

    let totals = calculate_order_totals(&items, silver_rate, gst_rate, extra_percent);

    let company_state = settings.effective_state_code();
    let reseller_state = reseller.effective_state_code();
    let gst = calculate_gst_breakdown(
        totals.subtotal,
        gst_rate,
        company_state.as_deref(),
        reseller_state.as_deref(),
    );

    tracing::info!(
        reseller_id = %reseller_id,
        lines = items.len(),
        grand_total = totals.grand_total,
        same_state = gst.is_same_state,
        "Order quoted"
    );

    Ok(OrderQuote {
        reseller_id,
        invoice_title: get_invoice_title(gst.is_gst_enabled),
        silver_rate,
        silver_rate_effective_at: rate.effective_at,
        extra_percent,
        gst_rate,
        totals,
        gst,
    })
}
