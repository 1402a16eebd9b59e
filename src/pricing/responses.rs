//! Response DTOs for pricing API endpoints.

use serde::Serialize;

use super::format::{format_currency, format_rate, format_weight};
use super::gst::{extract_state_code_from_gst, format_gst_for_display, get_state_name};
use super::services::OrderQuote;

/// One entry of the GST state table
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub code: &'static str,
    pub name: &'static str,
}

/// What a GSTIN says about its holder's state
#[derive(Debug, Serialize)]
pub struct GstinResponse {
    pub gst_number: String,
    pub display: String,
    pub state_code: Option<String>,
    pub state_name: Option<&'static str>,
    pub is_valid_state: bool,
}

impl GstinResponse {
    pub fn from_gst_number(gst_number: &str) -> Self {
        let state_code = extract_state_code_from_gst(Some(gst_number));
        let state_name = state_code.as_deref().and_then(get_state_name);
        Self {
            gst_number: gst_number.to_string(),
            display: format_gst_for_display(gst_number),
            state_code,
            state_name,
            is_valid_state: state_name.is_some(),
        }
    }
}

/// Rounded, human-readable figures of a quote
#[derive(Debug, Serialize)]
pub struct QuoteDisplay {
    pub silver_rate: String,
    pub total_weight: String,
    pub subtotal: String,
    pub total_gst: String,
    pub grand_total: String,
    pub gst_split: String,
}

/// Response for an order quote
#[derive(Debug, Serialize)]
pub struct OrderQuoteResponse {
    #[serde(flatten)]
    pub quote: OrderQuote,
    pub display: QuoteDisplay,
}

impl From<OrderQuote> for OrderQuoteResponse {
    fn from(quote: OrderQuote) -> Self {
        let gst = &quote.gst;
        let gst_split = if !gst.is_gst_enabled {
            "GST not applicable".to_string()
        } else if gst.is_same_state {
            format!(
                "CGST {} + SGST {}",
                format_rate(gst.cgst_rate),
                format_rate(gst.sgst_rate)
            )
        } else {
            format!("IGST {}", format_rate(gst.igst_rate))
        };

        let display = QuoteDisplay {
            silver_rate: format!("{}/g", format_currency(quote.silver_rate)),
            total_weight: format_weight(quote.totals.total_weight),
            subtotal: format_currency(quote.totals.subtotal),
            total_gst: format_currency(quote.totals.total_gst),
            grand_total: format_currency(quote.totals.grand_total),
            gst_split,
        };

        Self { quote, display }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
