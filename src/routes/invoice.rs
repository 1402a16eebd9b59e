//! Invoice page for a stored order

use askama::Template;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::db;
use crate::error::Result;
use crate::models::{InvoiceLine, Order, OrderLine};
use crate::pricing::format::{format_currency, format_rate, format_weight};
use crate::pricing::gst::{
    calculate_gst_breakdown, format_gst_for_display, get_invoice_title, get_state_name,
};
use crate::pricing::models::{resolve_state_code, to_f64, CompanySettings};
use crate::pricing::services;
use crate::qr;
use crate::AppState;

/// Tax invoice / estimate template
#[derive(Template)]
#[template(path = "invoice/preview.html")]
pub struct InvoiceTemplate {
    pub title: &'static str,
    pub order_number: String,
    pub order_date: String,
    pub company_name: String,
    pub company_address: String,
    pub has_company_address: bool,
    pub company_gstin: String,
    pub has_company_gstin: bool,
    pub company_state: String,
    pub reseller_name: String,
    pub reseller_gstin: String,
    pub has_reseller_gstin: bool,
    pub reseller_state: String,
    pub silver_rate: String,
    pub lines: Vec<InvoiceLine>,
    pub total_weight: String,
    pub subtotal: String,
    pub is_gst_enabled: bool,
    pub is_same_state: bool,
    pub cgst_label: String,
    pub cgst_amount: String,
    pub sgst_label: String,
    pub sgst_amount: String,
    pub igst_label: String,
    pub igst_amount: String,
    pub grand_total: String,
    pub qr_data_uri: String,
    pub has_qr: bool,
}

fn state_label(code: Option<&str>) -> String {
    match code {
        Some(code) => match get_state_name(code.trim()) {
            Some(name) => format!("{} ({})", name, code.trim()),
            None => code.to_string(),
        },
        None => "-".to_string(),
    }
}

/// Assemble the invoice view; the payment QR is attached separately.
///
/// State codes resolve the same way as for quotes (explicit code, then
/// GSTIN). The tax rows split the stored `total_gst` so they always add
/// up to the stored grand total.
pub fn build_invoice(
    order: &Order,
    lines: &[OrderLine],
    settings: &CompanySettings,
) -> InvoiceTemplate {
    let gst_rate = if order.is_gst_enabled {
        to_f64(order.gst_rate)
    } else {
        0.0
    };
    let company_state = order
        .company_state_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .or_else(|| settings.effective_state_code());
    let reseller_state = resolve_state_code(
        order.reseller_state_code.as_deref(),
        order.reseller_gst_number.as_deref(),
    );

    let mut gst = calculate_gst_breakdown(
        to_f64(order.subtotal),
        gst_rate,
        company_state.as_deref(),
        reseller_state.as_deref(),
    );
    if gst.is_gst_enabled {
        let stored = to_f64(order.total_gst);
        if gst.is_same_state {
            gst.cgst_amount = stored / 2.0;
            gst.sgst_amount = stored / 2.0;
        } else {
            gst.igst_amount = stored;
        }
        gst.total_gst_amount = stored;
    }

    let company_gstin = settings.gst_number.clone().unwrap_or_default();
    let reseller_gstin = order.reseller_gst_number.clone().unwrap_or_default();
    let company_address = settings.address.clone().unwrap_or_default();

    InvoiceTemplate {
        title: get_invoice_title(gst.is_gst_enabled),
        order_number: order.order_number.clone(),
        order_date: order.created_at.format("%d %b %Y").to_string(),
        company_name: settings.company_name.clone(),
        has_company_address: !company_address.is_empty(),
        company_address,
        has_company_gstin: !company_gstin.is_empty(),
        company_gstin: format_gst_for_display(&company_gstin),
        company_state: state_label(company_state.as_deref()),
        reseller_name: order.reseller_name.clone(),
        has_reseller_gstin: !reseller_gstin.is_empty(),
        reseller_gstin: format_gst_for_display(&reseller_gstin),
        reseller_state: state_label(reseller_state.as_deref()),
        silver_rate: format!("{}/g", format_currency(to_f64(order.silver_rate))),
        lines: lines.iter().map(InvoiceLine::from).collect(),
        total_weight: format_weight(to_f64(order.total_weight)),
        subtotal: format_currency(to_f64(order.subtotal)),
        is_gst_enabled: gst.is_gst_enabled,
        is_same_state: gst.is_same_state,
        cgst_label: format!("CGST @ {}", format_rate(gst.cgst_rate)),
        cgst_amount: format_currency(gst.cgst_amount),
        sgst_label: format!("SGST @ {}", format_rate(gst.sgst_rate)),
        sgst_amount: format_currency(gst.sgst_amount),
        igst_label: format!("IGST @ {}", format_rate(gst.igst_rate)),
        igst_amount: format_currency(gst.igst_amount),
        grand_total: format_currency(to_f64(order.grand_total)),
        qr_data_uri: String::new(),
        has_qr: false,
    }
}

/// Invoice page handler
pub async fn invoice(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<InvoiceTemplate> {
    let order = db::get_order(&state.db, order_id).await?;
    let lines = db::get_order_lines(&state.db, order_id).await?;
    let settings = services::company_settings(&state.db, &state.cache).await?;

    let mut template = build_invoice(&order, &lines, &settings);

    let grand_total = to_f64(order.grand_total);
    if let Some(vpa) = settings.upi_vpa.as_deref().filter(|vpa| !vpa.trim().is_empty()) {
        if grand_total > 0.0 {
            let uri = qr::upi_payment_uri(
                vpa.trim(),
                &settings.company_name,
                grand_total,
                &order.order_number,
            )?;
            template.qr_data_uri = qr::qr_data_uri(&uri)?;
            template.has_qr = true;
        }
    }

    tracing::debug!(order = %order.order_number, title = template.title, "Rendering invoice");

    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn order(reseller_state: Option<&str>, is_gst_enabled: bool) -> Order {
        order_with_gstin(reseller_state, Some("08AAAPL1234C1Z5"), is_gst_enabled)
    }

    fn order_with_gstin(
        reseller_state: Option<&str>,
        reseller_gstin: Option<&str>,
        is_gst_enabled: bool,
    ) -> Order {
        Order {
            id: Uuid::new_v4(),
            order_number: "SO-1001".to_string(),
            created_at: chrono::Utc.with_ymd_and_hms(2026, 3, 5, 10, 0, 0).unwrap(),
            silver_rate: dec!(100),
            gst_rate: dec!(3),
            is_gst_enabled,
            subtotal: dec!(1000),
            total_gst: if is_gst_enabled { dec!(30) } else { dec!(0) },
            total_weight: dec!(0.012),
            grand_total: if is_gst_enabled { dec!(1030) } else { dec!(1000) },
            company_state_code: None,
            reseller_name: "Jaipur Silver House".to_string(),
            reseller_gst_number: reseller_gstin.map(str::to_string),
            reseller_state_code: reseller_state.map(str::to_string),
        }
    }

    fn settings() -> CompanySettings {
        CompanySettings {
            id: Uuid::new_v4(),
            company_name: "Silverline Traders".to_string(),
            address: Some("Zaveri Bazaar, Mumbai".to_string()),
            gst_number: Some("27ABCDE1234F1Z5".to_string()),
            state_code: None,
            gst_rate: dec!(3),
            gst_enabled: true,
            extra_percent: dec!(2),
            upi_vpa: None,
        }
    }

    #[test]
    fn test_state_label() {
        assert_eq!(state_label(Some("27")), "Maharashtra (27)");
        assert_eq!(state_label(Some("28")), "28");
        assert_eq!(state_label(None), "-");
    }

    #[test]
    fn test_build_invoice_same_state() {
        let t = build_invoice(&order(Some("27"), true), &[], &settings());

        assert_eq!(t.title, "Tax Invoice");
        assert_eq!(t.order_date, "05 Mar 2026");
        assert_eq!(t.company_gstin, "27 ABCDE 1234 F1Z5");
        assert_eq!(t.company_state, "Maharashtra (27)");
        assert!(t.is_same_state);
        assert_eq!(t.cgst_label, "CGST @ 1.5%");
        assert_eq!(t.cgst_amount, "₹15.00");
        assert_eq!(t.sgst_amount, "₹15.00");
        assert_eq!(t.grand_total, "₹1,030.00");
    }

    #[test]
    fn test_build_invoice_inter_state() {
        let t = build_invoice(&order(Some("08"), true), &[], &settings());

        assert!(!t.is_same_state);
        assert_eq!(t.igst_label, "IGST @ 3%");
        assert_eq!(t.igst_amount, "₹30.00");
        assert_eq!(t.reseller_state, "Rajasthan (08)");
    }

    #[test]
    fn test_build_invoice_estimate_when_gst_disabled() {
        let t = build_invoice(&order(Some("27"), false), &[], &settings());

        assert_eq!(t.title, "Estimate");
        assert!(!t.is_gst_enabled);
    }

    #[test]
    fn test_build_invoice_reseller_state_from_gstin() {
        // same rule as quotes: no state_code, so the GSTIN prefix decides
        let t = build_invoice(
            &order_with_gstin(None, Some("27AAAPL1234C1Z5"), true),
            &[],
            &settings(),
        );

        assert!(t.is_same_state);
        assert_eq!(t.reseller_state, "Maharashtra (27)");
        assert_eq!(t.cgst_amount, "₹15.00");
        assert_eq!(t.sgst_amount, "₹15.00");
    }

    #[test]
    fn test_build_invoice_blank_reseller_state_falls_back_to_gstin() {
        let t = build_invoice(
            &order_with_gstin(Some("  "), Some("27AAAPL1234C1Z5"), true),
            &[],
            &settings(),
        );
        assert!(t.is_same_state);
    }

    #[test]
    fn test_build_invoice_no_reseller_state_is_inter_state() {
        let t = build_invoice(&order_with_gstin(None, None, true), &[], &settings());

        assert!(!t.is_same_state);
        assert_eq!(t.reseller_state, "-");
        assert_eq!(t.igst_amount, "₹30.00");
    }

    #[test]
    fn test_build_invoice_zero_rate_is_estimate() {
        let mut o = order(Some("27"), true);
        o.gst_rate = dec!(0);
        o.total_gst = dec!(0);
        o.grand_total = dec!(1000);
        let t = build_invoice(&o, &[], &settings());

        assert_eq!(t.title, "Estimate");
        assert!(!t.is_gst_enabled);
    }

    #[test]
    fn test_build_invoice_splits_stored_gst() {
        // stored tax differs from a fresh 3% of the subtotal
        let mut o = order(Some("27"), true);
        o.total_gst = dec!(31);
        o.grand_total = dec!(1031);
        let t = build_invoice(&o, &[], &settings());
        assert_eq!(t.cgst_amount, "₹15.50");
        assert_eq!(t.sgst_amount, "₹15.50");
        assert_eq!(t.grand_total, "₹1,031.00");

        let mut o = order(Some("08"), true);
        o.total_gst = dec!(31);
        let t = build_invoice(&o, &[], &settings());
        assert_eq!(t.igst_amount, "₹31.00");
    }

    #[test]
    fn test_invoice_renders() {
        let line = OrderLine {
            product_name: "Payal 925".to_string(),
            weight_kg: dec!(0.012),
            tunch_percentage: dec!(90),
            labor: dec!(6),
            offer: dec!(0),
            subtotal_after_offer: dec!(1000),
            gst: dec!(30),
            line_total: dec!(1030),
        };
        let html = build_invoice(&order(Some("27"), true), &[line], &settings())
            .render()
            .unwrap();

        assert!(html.contains("Tax Invoice"));
        assert!(html.contains("Payal 925"));
        assert!(html.contains("CGST @ 1.5%"));
        assert!(!html.contains("IGST @"));
    }

    #[test]
    fn test_estimate_renders_without_tax_rows() {
        let html = build_invoice(&order(Some("27"), false), &[], &settings())
            .render()
            .unwrap();

        assert!(html.contains("Estimate"));
        assert!(!html.contains("CGST @"));
        assert!(!html.contains("IGST @"));
    }
}
