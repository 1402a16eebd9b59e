//! UPI payment QR codes for invoices.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use url::Url;

use crate::error::{AppError, Result};
use crate::pricing::format_amount;

/// Build a `upi://pay` link for `amount` rupees to `vpa`.
pub fn upi_payment_uri(vpa: &str, payee_name: &str, amount: f64, note: &str) -> Result<String> {
    let amount = format_amount(amount);
    let uri = Url::parse_with_params(
        "upi://pay",
        &[
            ("pa", vpa),
            ("pn", payee_name),
            ("am", amount.as_str()),
            ("cu", "INR"),
            ("tn", note),
        ],
    )
    .map_err(|e| AppError::Internal(format!("invalid UPI uri: {}", e)))?;

    Ok(uri.to_string())
}

/// Render `data` as a PNG QR code and return it as a data URI.
pub fn qr_data_uri(data: &str) -> Result<String> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| AppError::Internal(format!("QR encoding failed: {}", e)))?;
    let image = code.render::<Luma<u8>>().min_dimensions(200, 200).build();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AppError::Internal(format!("PNG encoding failed: {}", e)))?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upi_payment_uri() {
        let uri = upi_payment_uri("silverline@okbank", "Silverline Traders", 85747.5, "SO-1001")
            .unwrap();
        assert!(uri.starts_with("upi://pay?"));
        assert!(uri.contains("pa=silverline%40okbank"));
        assert!(uri.contains("am=85747.50"));
        assert!(uri.contains("cu=INR"));
        assert!(uri.contains("tn=SO-1001"));
    }

    #[test]
    fn test_qr_data_uri_is_png() {
        let uri = qr_data_uri("upi://pay?pa=silverline%40okbank&am=1.00").unwrap();
        let encoded = uri.strip_prefix("data:image/png;base64,").unwrap();
        let png = STANDARD.decode(encoded).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
