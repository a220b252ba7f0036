//! # Request Handlers
//!
//! Axum request handlers for the coupon API: coupon registration,
//! catalog listing, and best-coupon evaluation.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use promo_core::{engine, Cart, Coupon, PromoError, UserContext};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Best-coupon evaluation request
#[derive(Debug, Deserialize)]
pub struct BestCouponRequest {
    /// Shopper context
    pub user: UserContext,
    /// Cart being checked out
    pub cart: Cart,
}

/// Best-coupon evaluation response.
///
/// `coupon` is always present (null when nothing is eligible); the
/// discount and final price only accompany a winning coupon.
#[derive(Debug, Serialize)]
pub struct BestCouponResponse {
    /// Winning coupon code, or null
    pub coupon: Option<String>,
    /// Discount the winning coupon pays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// Cart total minus the discount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
}

impl BestCouponResponse {
    fn none() -> Self {
        Self {
            coupon: None,
            discount: None,
            final_price: None,
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn promo_error_to_response(err: PromoError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "promo-engine",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Register a new coupon
#[instrument(skip(state, coupon), fields(code = %coupon.code))]
pub async fn create_coupon(
    State(state): State<AppState>,
    Json(coupon): Json<Coupon>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if coupon.code.trim().is_empty() {
        return Err(promo_error_to_response(PromoError::InvalidRequest(
            "Coupon code must not be blank".to_string(),
        )));
    }

    state
        .catalog
        .insert(coupon.clone())
        .await
        .map_err(promo_error_to_response)?;

    state
        .ledger
        .register_coupon(&coupon.code)
        .await
        .map_err(promo_error_to_response)?;

    info!("Created coupon: {}", coupon.code);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Coupon created",
            "coupon": coupon
        })),
    ))
}

/// List every registered coupon, in registration order
pub async fn list_coupons(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let coupons = state.catalog.list().await.map_err(promo_error_to_response)?;

    Ok(Json(serde_json::json!({
        "coupons": coupons,
        "count": coupons.len()
    })))
}

/// Get a single coupon by code
pub async fn get_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let coupon = state
        .catalog
        .get(&code)
        .await
        .map_err(promo_error_to_response)?
        .ok_or_else(|| promo_error_to_response(PromoError::CouponNotFound { code }))?;

    Ok(Json(coupon))
}

/// Evaluate the best coupon for a user and cart.
///
/// "Nothing eligible" is a normal 200 response with a null coupon,
/// never an error.
#[instrument(skip(state, request), fields(user = %request.user.user_id, items = request.cart.items.len()))]
pub async fn best_coupon(
    State(state): State<AppState>,
    Json(request): Json<BestCouponRequest>,
) -> Result<Json<BestCouponResponse>, (StatusCode, Json<ErrorResponse>)> {
    let today = Local::now().date_naive();
    let cart_total = request.cart.total();

    let best = engine::select_best(
        state.catalog.as_ref(),
        state.ledger.as_ref(),
        &request.user,
        &request.cart,
        today,
    )
    .await
    .map_err(promo_error_to_response)?;

    let response = match best {
        Some(pick) => {
            info!(
                "Best coupon for {}: {} (discount {})",
                request.user.user_id, pick.coupon.code, pick.discount
            );
            BestCouponResponse {
                coupon: Some(pick.coupon.code),
                discount: Some(pick.discount),
                final_price: Some(cart_total - pick.discount),
            }
        }
        None => {
            info!("No eligible coupon for {}", request.user.user_id);
            BestCouponResponse::none()
        }
    };

    Ok(Json(response))
}
