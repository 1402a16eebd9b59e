//! Core pricing calculation functions.
//!
//! Pure functions for line and order pricing - no database access.
//! Every amount is an unrounded `f64`; rounding is left to
//! [`format`](super::format) at display time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extra percent folded into the deduction when the caller doesn't supply one.
pub const DEFAULT_EXTRA_PERCENT: f64 = 2.0;

fn default_extra_percent() -> f64 {
    DEFAULT_EXTRA_PERCENT
}

/// How an offer value is applied to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    Percentage,
    Fixed,
}

impl OfferType {
    /// Parse the value stored in the `offer_type` column.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "percentage" => Some(OfferType::Percentage),
            "fixed" => Some(OfferType::Fixed),
            _ => None,
        }
    }
}

/// Physical and commercial attributes of one order line.
///
/// `weight_kg` is in kilograms while `silver_rate` is per gram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineInput {
    pub weight_kg: f64,
    pub silver_rate: f64,
    pub tunch_percentage: f64,
    pub labor_per_kg: f64,
    #[serde(default = "default_extra_percent")]
    pub extra_percent: f64,
    #[serde(default)]
    pub offer_enabled: bool,
    #[serde(default)]
    pub offer_type: Option<OfferType>,
    #[serde(default)]
    pub offer_value: Option<f64>,
    pub gst_rate: f64,
}

/// Priced line, all values in currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base: f64,
    pub deduction: f64,
    pub labor: f64,
    pub subtotal_before_offer: f64,
    pub offer: f64,
    pub subtotal_after_offer: f64,
    pub gst: f64,
    pub line_total: f64,
}

/// Calculate the price of a single line.
///
/// Inputs are not validated: a negative weight or a fixed offer larger
/// than the subtotal yields negative amounts rather than an error.
///
/// # Examples
/// ```
/// use silverline_pricing::pricing::{calculate_line_price, LineInput};
///
/// let breakdown = calculate_line_price(&LineInput {
///     weight_kg: 1.0,
///     silver_rate: 100.0,
///     tunch_percentage: 98.0,
///     labor_per_kg: 0.0,
///     extra_percent: 2.0,
///     offer_enabled: false,
///     offer_type: None,
///     offer_value: None,
///     gst_rate: 0.0,
/// });
/// assert_eq!(breakdown.deduction, 0.0);
/// assert_eq!(breakdown.line_total, 100000.0);
/// ```
pub fn calculate_line_price(input: &LineInput) -> PriceBreakdown {
    let base = input.weight_kg * 1000.0 * input.silver_rate;

    let deduction_percent = (100.0 - (input.tunch_percentage + input.extra_percent)).max(0.0);
    let deduction = base * deduction_percent / 100.0;

    let labor = input.labor_per_kg * input.weight_kg;
    let subtotal_before_offer = base - deduction + labor;

    let offer_value = input.offer_value.unwrap_or(0.0);
    let offer = if input.offer_enabled && offer_value > 0.0 {
        match input.offer_type {
            Some(OfferType::Percentage) => subtotal_before_offer * offer_value / 100.0,
            Some(OfferType::Fixed) => offer_value,
            None => 0.0,
        }
    } else {
        0.0
    };

    let subtotal_after_offer = subtotal_before_offer - offer;
    let gst = subtotal_after_offer * input.gst_rate / 100.0;

    PriceBreakdown {
        base,
        deduction,
        labor,
        subtotal_before_offer,
        offer,
        subtotal_after_offer,
        gst,
        line_total: subtotal_after_offer + gst,
    }
}

/// One item of an order. Silver rate, GST rate and extra percent are
/// shared across the order and supplied separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub weight_kg: f64,
    pub tunch_percentage: f64,
    pub labor_per_kg: f64,
    #[serde(default)]
    pub offer_enabled: bool,
    #[serde(default)]
    pub offer_type: Option<OfferType>,
    #[serde(default)]
    pub offer_value: Option<f64>,
}

impl OrderItem {
    fn to_line_input(&self, silver_rate: f64, gst_rate: f64, extra_percent: f64) -> LineInput {
        LineInput {
            weight_kg: self.weight_kg,
            silver_rate,
            tunch_percentage: self.tunch_percentage,
            labor_per_kg: self.labor_per_kg,
            extra_percent,
            offer_enabled: self.offer_enabled,
            offer_type: self.offer_type,
            offer_value: self.offer_value,
            gst_rate,
        }
    }
}

/// An order item together with its computed breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedOrderItem {
    #[serde(flatten)]
    pub item: OrderItem,
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
}

/// Result of order totals calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub items: Vec<PricedOrderItem>,
    pub subtotal: f64,
    pub total_gst: f64,
    pub total_weight: f64,
    pub grand_total: f64,
}

/// Price every item of an order and sum the results.
///
/// Sums accumulate in input order so repeated calls over the same list
/// are bit-identical.
pub fn calculate_order_totals(
    items: &[OrderItem],
    silver_rate: f64,
    gst_rate: f64,
    extra_percent: f64,
) -> OrderTotals {
    let mut subtotal = 0.0;
    let mut total_gst = 0.0;
    let mut total_weight = 0.0;

    let priced: Vec<PricedOrderItem> = items
        .iter()
        .map(|item| {
            let breakdown =
                calculate_line_price(&item.to_line_input(silver_rate, gst_rate, extra_percent));
            subtotal += breakdown.subtotal_after_offer;
            total_gst += breakdown.gst;
            total_weight += item.weight_kg;
            PricedOrderItem {
                item: item.clone(),
                breakdown,
            }
        })
        .collect();

    OrderTotals {
        items: priced,
        subtotal,
        total_gst,
        total_weight,
        grand_total: subtotal + total_gst,
    }
}
