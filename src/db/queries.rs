//! Database queries for stored orders

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Order, OrderLine};

/// Get an order with its reseller details
pub async fn get_order(pool: &PgPool, order_id: Uuid) -> Result<Order> {
    let order = sqlx::query_as::<_, Order>(
        r#"
        SELECT
            o.id,
            o.order_number,
            o.created_at,
            o.silver_rate,
            o.gst_rate,
            o.is_gst_enabled,
            o.subtotal,
            o.total_gst,
            o.total_weight,
            o.grand_total,
            o.company_state_code,
            r.business_name AS reseller_name,
            r.gst_number AS reseller_gst_number,
            r.state_code AS reseller_state_code
        FROM orders o
        JOIN resellers r ON r.id = o.reseller_id
        WHERE o.id = $1
        "#,
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(order)
}

/// Get the priced lines of an order in the order they were placed
pub async fn get_order_lines(pool: &PgPool, order_id: Uuid) -> Result<Vec<OrderLine>> {
    let lines = sqlx::query_as::<_, OrderLine>(
        r#"
        SELECT
            product_name,
            weight_kg,
            tunch_percentage,
            labor,
            offer,
            subtotal_after_offer,
            gst,
            line_total
        FROM order_items
        WHERE order_id = $1
        ORDER BY position
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(lines)
}
