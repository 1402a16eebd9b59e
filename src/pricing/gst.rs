//! GST apportionment between CGST/SGST (intra-state) and IGST (inter-state).
//!
//! Pure functions plus the fixed table of GST state codes.

use serde::{Deserialize, Serialize};

/// GST state/UT codes as they appear in the first two characters of a GSTIN.
///
/// Codes 25 and 28 are retired and intentionally absent.
static STATES: [(&str, &str); 38] = [
    ("01", "Jammu and Kashmir"),
    ("02", "Himachal Pradesh"),
    ("03", "Punjab"),
    ("04", "Chandigarh"),
    ("05", "Uttarakhand"),
    ("06", "Haryana"),
    ("07", "Delhi"),
    ("08", "Rajasthan"),
    ("09", "Uttar Pradesh"),
    ("10", "Bihar"),
    ("11", "Sikkim"),
    ("12", "Arunachal Pradesh"),
    ("13", "Nagaland"),
    ("14", "Manipur"),
    ("15", "Mizoram"),
    ("16", "Tripura"),
    ("17", "Meghalaya"),
    ("18", "Assam"),
    ("19", "West Bengal"),
    ("20", "Jharkhand"),
    ("21", "Odisha"),
    ("22", "Chhattisgarh"),
    ("23", "Madhya Pradesh"),
    ("24", "Gujarat"),
    ("26", "Dadra and Nagar Haveli and Daman and Diu"),
    ("27", "Maharashtra"),
    ("29", "Karnataka"),
    ("30", "Goa"),
    ("31", "Lakshadweep"),
    ("32", "Kerala"),
    ("33", "Tamil Nadu"),
    ("34", "Puducherry"),
    ("35", "Andaman and Nicobar Islands"),
    ("36", "Telangana"),
    ("37", "Andhra Pradesh"),
    ("38", "Ladakh"),
    ("97", "Other Territory"),
    ("99", "Centre Jurisdiction"),
];

/// Split of a GST amount into its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstBreakdown {
    pub is_gst_enabled: bool,
    pub is_same_state: bool,
    pub total_gst_rate: f64,
    pub cgst_rate: f64,
    pub sgst_rate: f64,
    pub igst_rate: f64,
    pub cgst_amount: f64,
    pub sgst_amount: f64,
    pub igst_amount: f64,
    pub total_gst_amount: f64,
    pub company_state_code: Option<String>,
    pub reseller_state_code: Option<String>,
}

impl GstBreakdown {
    fn exempt() -> Self {
        Self {
            is_gst_enabled: false,
            is_same_state: false,
            total_gst_rate: 0.0,
            cgst_rate: 0.0,
            sgst_rate: 0.0,
            igst_rate: 0.0,
            cgst_amount: 0.0,
            sgst_amount: 0.0,
            igst_amount: 0.0,
            total_gst_amount: 0.0,
            company_state_code: None,
            reseller_state_code: None,
        }
    }
}

/// Apportion GST on `taxable_amount` between CGST/SGST and IGST.
///
/// Same state (after trimming) splits the rate evenly into CGST and SGST.
/// A different state, or a missing code on either side, is treated as
/// inter-state and charged IGST. A zero rate returns the exempt breakdown
/// with both state codes cleared.
pub fn calculate_gst_breakdown(
    taxable_amount: f64,
    gst_rate: f64,
    company_state_code: Option<&str>,
    reseller_state_code: Option<&str>,
) -> GstBreakdown {
    if gst_rate == 0.0 {
        return GstBreakdown::exempt();
    }

    let is_same_state = match (company_state_code, reseller_state_code) {
        (Some(company), Some(reseller)) => company.trim() == reseller.trim(),
        _ => false,
    };

    let (cgst_rate, sgst_rate, igst_rate) = if is_same_state {
        (gst_rate / 2.0, gst_rate / 2.0, 0.0)
    } else {
        (0.0, 0.0, gst_rate)
    };

    let cgst_amount = taxable_amount * cgst_rate / 100.0;
    let sgst_amount = taxable_amount * sgst_rate / 100.0;
    let igst_amount = taxable_amount * igst_rate / 100.0;

    GstBreakdown {
        is_gst_enabled: true,
        is_same_state,
        total_gst_rate: gst_rate,
        cgst_rate,
        sgst_rate,
        igst_rate,
        cgst_amount,
        sgst_amount,
        igst_amount,
        total_gst_amount: cgst_amount + sgst_amount + igst_amount,
        company_state_code: company_state_code.map(str::to_string),
        reseller_state_code: reseller_state_code.map(str::to_string),
    }
}

/// State code of a GSTIN (its first two characters).
pub fn extract_state_code_from_gst(gst_number: Option<&str>) -> Option<String> {
    let gst_number = gst_number?;
    if gst_number.chars().count() < 2 {
        return None;
    }
    Some(gst_number.chars().take(2).collect())
}

/// Name of the state or UT for a GST state code
pub fn get_state_name(state_code: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(code, _)| *code == state_code)
        .map(|(_, name)| *name)
}

pub fn is_valid_state_code(state_code: &str) -> bool {
    get_state_name(state_code).is_some()
}

/// All known state codes with their names, in code order
pub fn all_states() -> impl Iterator<Item = (&'static str, &'static str)> {
    STATES.iter().copied()
}

/// Group a 15-character GSTIN for display (`27 ABCDE 1234 F1Z5`).
///
/// Anything that isn't exactly 15 characters comes back unchanged.
pub fn format_gst_for_display(gst_number: &str) -> String {
    let chars: Vec<char> = gst_number.chars().collect();
    if chars.len() != 15 {
        return gst_number.to_string();
    }

    let mut out = String::with_capacity(18);
    for (i, c) in chars.iter().enumerate() {
        if i == 2 || i == 7 || i == 11 {
            out.push(' ');
        }
        out.push(*c);
    }
    out
}

pub fn get_invoice_title(is_gst_enabled: bool) -> &'static str {
    if is_gst_enabled {
        "Tax Invoice"
    } else {
        "Estimate"
    }
}
