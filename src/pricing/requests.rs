//! Request DTOs for pricing API endpoints.
//!
//! Single-line pricing accepts [`LineInput`](super::LineInput) as is.

use serde::Deserialize;
use uuid::Uuid;

use super::calculators::{OrderItem, DEFAULT_EXTRA_PERCENT};
use super::services::QuoteLineInput;

fn default_extra_percent() -> f64 {
    DEFAULT_EXTRA_PERCENT
}

/// Request to calculate order totals
#[derive(Debug, Deserialize)]
pub struct OrderTotalsRequest {
    pub items: Vec<OrderItem>,
    pub silver_rate: f64,
    pub gst_rate: f64,
    #[serde(default = "default_extra_percent")]
    pub extra_percent: f64,
}

/// Request to apportion GST on a taxable amount
#[derive(Debug, Deserialize)]
pub struct GstBreakdownRequest {
    pub taxable_amount: f64,
    pub gst_rate: f64,
    #[serde(default)]
    pub company_state_code: Option<String>,
    #[serde(default)]
    pub reseller_state_code: Option<String>,
}

/// Request to quote a reseller's cart
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub reseller_id: Uuid,
    pub lines: Vec<QuoteLineRequest>,
}

/// A cart line in the quote request
#[derive(Debug, Deserialize)]
pub struct QuoteLineRequest {
    pub product_id: Uuid,
    pub weight_kg: f64,
}

impl From<&QuoteLineRequest> for QuoteLineInput {
    fn from(line: &QuoteLineRequest) -> Self {
        QuoteLineInput {
            product_id: line.product_id,
            weight_kg: line.weight_kg,
        }
    }
}
