//! Database models for pricing queries.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.
//! Numeric columns arrive as `Decimal` and are converted to `f64` at the
//! calculator boundary.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::calculators::OfferType;
use super::gst::extract_state_code_from_gst;

pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Explicit state code if set, otherwise the one embedded in the GSTIN.
pub(crate) fn resolve_state_code(
    state_code: Option<&str>,
    gst_number: Option<&str>,
) -> Option<String> {
    match state_code.map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) => Some(code.to_string()),
        None => extract_state_code_from_gst(gst_number.map(str::trim)),
    }
}

/// Published silver rate from silver_rates
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SilverRate {
    pub id: Uuid,
    pub rate_per_gram: Decimal,
    pub effective_at: DateTime<Utc>,
}

/// Company settings singleton from company_settings
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompanySettings {
    pub id: Uuid,
    pub company_name: String,
    pub address: Option<String>,
    pub gst_number: Option<String>,
    pub state_code: Option<String>,
    pub gst_rate: Decimal,
    pub gst_enabled: bool,
    pub extra_percent: Decimal,
    pub upi_vpa: Option<String>,
}

impl CompanySettings {
    pub fn effective_state_code(&self) -> Option<String> {
        resolve_state_code(self.state_code.as_deref(), self.gst_number.as_deref())
    }

    /// GST rate applied to orders: the configured rate, or zero when GST is off.
    pub fn effective_gst_rate(&self) -> f64 {
        if self.gst_enabled {
            to_f64(self.gst_rate)
        } else {
            0.0
        }
    }
}

/// Reseller from resellers, including its discount setup
#[derive(Debug, Clone, FromRow)]
pub struct Reseller {
    pub id: Uuid,
    pub business_name: String,
    pub gst_number: Option<String>,
    pub state_code: Option<String>,
    pub offer_enabled: bool,
    pub offer_type: Option<String>,
    pub offer_value: Option<Decimal>,
    pub is_active: bool,
}

impl Reseller {
    pub fn effective_state_code(&self) -> Option<String> {
        resolve_state_code(self.state_code.as_deref(), self.gst_number.as_deref())
    }

    pub fn offer_type(&self) -> Option<OfferType> {
        self.offer_type.as_deref().and_then(OfferType::parse)
    }

    pub fn offer_value(&self) -> Option<f64> {
        self.offer_value.map(to_f64)
    }
}

/// Product from products
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: Option<String>,
    pub tunch_percentage: Decimal,
    pub labor_per_kg: Decimal,
    pub is_active: bool,
}
