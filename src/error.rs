//! Errors surfaced by the HTML pages (invoice, health)

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::pricing::PricingError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Order not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code plus the sentence shown to the reseller.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "We could not find that order. Check the order link and try again.".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error while rendering page");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Order records are unavailable right now.".to_string(),
                )
            }
            AppError::Pricing(e) => {
                let (status, kind) = e.status();
                tracing::warn!(error = %e, kind, "Pricing error while rendering page");
                let message = if status.is_client_error() {
                    e.to_string()
                } else {
                    "Prices are unavailable until a silver rate is published.".to_string()
                };
                (status, message)
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error while rendering page");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while preparing this page.".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let reason = status.canonical_reason().unwrap_or("Error");

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{reason} | Silverline Pricing</title>
<link rel="stylesheet" href="/static/invoice.css"></head>
<body class="error-page">
    <h1>{code} {reason}</h1>
    <p>{message}</p>
    <p>If this keeps happening, contact your Silverline account manager.</p>
</body>
</html>"#,
            code = status.as_u16(),
        );

        (status, Html(html)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_rate_is_unavailable() {
        let response = AppError::from(PricingError::MissingSilverRate).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_invalid_quote_keeps_client_status() {
        let err = AppError::from(PricingError::InvalidQuote {
            message: "A quote needs at least one line".to_string(),
            errors: vec![],
        });
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(message.contains("at least one line"));
    }

    #[test]
    fn test_reseller_not_found_maps_to_404() {
        let err = AppError::from(PricingError::ResellerNotFound {
            reseller_id: "r-1".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
