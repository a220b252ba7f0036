//! # Promo Error Types
//!
//! Typed error handling for the coupon engine.
//! All catalog and evaluation operations return `Result<T, PromoError>`.

use thiserror::Error;

/// Core error type for coupon operations
#[derive(Debug, Error)]
pub enum PromoError {
    /// A coupon with this code is already registered
    #[error("Coupon already exists: {code}")]
    CouponExists { code: String },

    /// No coupon with this code is registered
    #[error("Coupon not found: {code}")]
    CouponNotFound { code: String },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Catalog or ledger backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PromoError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PromoError::CouponExists { .. } => 409,
            PromoError::CouponNotFound { .. } => 404,
            PromoError::InvalidRequest(_) => 400,
            PromoError::Storage(_) => 500,
        }
    }
}

/// Result type alias for coupon operations
pub type PromoResult<T> = Result<T, PromoError>;
