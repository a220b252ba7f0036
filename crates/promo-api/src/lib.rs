//! # promo-api
//!
//! HTTP API layer for promo-engine-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for coupon registration and catalog listing
//! - Best-coupon evaluation for a shopper and cart
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/coupons` | Register a coupon |
//! | GET | `/api/v1/coupons` | List coupons |
//! | GET | `/api/v1/coupons/:code` | Get coupon |
//! | POST | `/api/v1/best-coupon` | Evaluate best coupon |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
