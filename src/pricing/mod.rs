//! Pricing engine for the reseller portal.
//!
//! Line and order pricing from live silver rates, GST apportionment and
//! display formatting. The portal calls this module via HTTP/JSON.

pub mod calculators;
pub mod format;
pub mod gst;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    calculate_line_price, calculate_order_totals, LineInput, OfferType, OrderItem, OrderTotals,
    PriceBreakdown, DEFAULT_EXTRA_PERCENT,
};
pub use format::{format_amount, format_currency, format_rate, format_weight, round_money};
pub use gst::{
    calculate_gst_breakdown, extract_state_code_from_gst, format_gst_for_display,
    get_invoice_title, get_state_name, is_valid_state_code, GstBreakdown,
};
pub use routes::router;
pub use services::{OrderQuote, PricingError, QuoteLineInput};
