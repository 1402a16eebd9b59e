//! Display formatting for amounts, weights and rates.
//!
//! This is the only place values get rounded. Floats are converted to
//! `Decimal` first so that `2.675` rounds the way a reader expects.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Round to specified decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use silverline_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(-2.5), 0), dec!(-3));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

fn to_fixed(value: f64, places: u32) -> Decimal {
    let mut rounded = round_money(Decimal::from_f64(value).unwrap_or(Decimal::ZERO), places);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(places);
    rounded
}

/// Group an integer digit string the Indian way: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format a rupee amount, e.g. `₹1,23,456.78`.
///
/// NaN and infinities format as `₹0.00`.
pub fn format_currency(amount: f64) -> String {
    let value = to_fixed(amount, 2);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let text = value.abs().to_string();
    let (rupees, paise) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}₹{}.{}", sign, group_indian(rupees), paise)
}

/// Plain two-decimal amount without symbol or grouping, e.g. `85747.50`.
pub fn format_amount(amount: f64) -> String {
    to_fixed(amount, 2).to_string()
}

/// Format a weight in kilograms with gram precision, e.g. `1.250 kg`.
pub fn format_weight(weight_kg: f64) -> String {
    format!("{} kg", to_fixed(weight_kg, 3))
}

/// Format a percentage rate without trailing zeros, e.g. `1.5%`.
pub fn format_rate(rate: f64) -> String {
    let rate = to_fixed(rate, 2).normalize();
    format!("{}%", rate)
}
