//! Database queries for the pricing engine.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::{CompanySettings, Product, Reseller, SilverRate};

/// Latest silver rate in effect at `check_time`
pub async fn get_current_silver_rate(
    pool: &PgPool,
    check_time: DateTime<Utc>,
) -> Result<Option<SilverRate>, AppError> {
    let rate = sqlx::query_as::<_, SilverRate>(
        r#"
        SELECT id, rate_per_gram, effective_at
        FROM silver_rates
        WHERE effective_at <= $1
        ORDER BY effective_at DESC
        LIMIT 1
        "#,
    )
    .bind(check_time)
    .fetch_optional(pool)
    .await?;

    Ok(rate)
}

/// Company settings singleton
pub async fn get_company_settings(pool: &PgPool) -> Result<Option<CompanySettings>, AppError> {
    let settings = sqlx::query_as::<_, CompanySettings>(
        r#"
        SELECT
            id, company_name, address, gst_number, state_code,
            gst_rate, gst_enabled, extra_percent, upi_vpa
        FROM company_settings
        ORDER BY updated_at DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(settings)
}

/// Get a reseller by id
pub async fn get_reseller(pool: &PgPool, reseller_id: Uuid) -> Result<Option<Reseller>, AppError> {
    let reseller = sqlx::query_as::<_, Reseller>(
        r#"
        SELECT
            id, business_name, gst_number, state_code,
            offer_enabled, offer_type, offer_value, is_active
        FROM resellers
        WHERE id = $1
        "#,
    )
    .bind(reseller_id)
    .fetch_optional(pool)
    .await?;

    Ok(reseller)
}

/// Get the products with the given ids (active or not)
pub async fn get_products(pool: &PgPool, product_ids: &[Uuid]) -> Result<Vec<Product>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, sku, tunch_percentage, labor_per_kg, is_active
        FROM products
        WHERE id = ANY($1)
        "#,
    )
    .bind(product_ids)
    .fetch_all(pool)
    .await?;

    Ok(products)
}
