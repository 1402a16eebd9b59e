//! Stored orders and the line view used by the invoice page

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::format::{format_currency, format_rate, format_weight};
use crate::pricing::models::to_f64;

/// Order header joined with the reseller it was placed by
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub created_at: DateTime<Utc>,
    pub silver_rate: Decimal,
    pub gst_rate: Decimal,
    pub is_gst_enabled: bool,
    pub subtotal: Decimal,
    pub total_gst: Decimal,
    pub total_weight: Decimal,
    pub grand_total: Decimal,
    /// Company state at the time the order was placed
    pub company_state_code: Option<String>,
    pub reseller_name: String,
    pub reseller_gst_number: Option<String>,
    pub reseller_state_code: Option<String>,
}

/// Priced line from order_items, stored when the order was placed
#[derive(Debug, Clone, FromRow)]
pub struct OrderLine {
    pub product_name: String,
    pub weight_kg: Decimal,
    pub tunch_percentage: Decimal,
    pub labor: Decimal,
    pub offer: Decimal,
    pub subtotal_after_offer: Decimal,
    pub gst: Decimal,
    pub line_total: Decimal,
}

/// Invoice line ready for rendering
#[derive(Debug, Clone)]
pub struct InvoiceLine {
    pub product_name: String,
    pub weight: String,
    pub tunch: String,
    pub labor: String,
    pub offer: String,
    pub has_offer: bool,
    pub taxable: String,
    pub gst: String,
    pub total: String,
}

impl From<&OrderLine> for InvoiceLine {
    fn from(line: &OrderLine) -> Self {
        Self {
            product_name: line.product_name.clone(),
            weight: format_weight(to_f64(line.weight_kg)),
            tunch: format_rate(to_f64(line.tunch_percentage)),
            labor: format_currency(to_f64(line.labor)),
            offer: format_currency(to_f64(line.offer)),
            has_offer: !line.offer.is_zero(),
            taxable: format_currency(to_f64(line.subtotal_after_offer)),
            gst: format_currency(to_f64(line.gst)),
            total: format_currency(to_f64(line.line_total)),
        }
    }
}
