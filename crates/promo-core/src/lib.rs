//! # promo-core
//!
//! Core types and coupon-selection engine for promo-engine-rs.
//!
//! This crate provides:
//! - `Coupon`, `DiscountType`, and `Eligibility` for the coupon catalog
//! - `Cart`, `CartItem`, and `UserContext` for evaluation requests
//! - `engine::select_best` for picking the highest-paying eligible coupon
//! - `CouponCatalog` and `UsageLedger` traits for pluggable storage
//! - `PromoError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use promo_core::{engine, Cart, CartItem, Coupon, UserContext};
//!
//! // Describe the cart being checked out
//! let mut cart = Cart::new();
//! cart.add_item(CartItem::new("sku-1", 25.0, 2).with_category("books"));
//!
//! let user = UserContext::new("user-42").with_tier("gold");
//!
//! // Ask the engine for the best coupon the catalog offers
//! let best = engine::select_best(&catalog, &ledger, &user, &cart, today).await?;
//!
//! if let Some(pick) = best {
//!     println!("{} saves {}", pick.coupon.code, pick.discount);
//! }
//! ```

pub mod cart;
pub mod coupon;
pub mod engine;
pub mod error;
pub mod store;

// Re-exports for convenience
pub use cart::{Cart, CartItem, UserContext};
pub use coupon::{Coupon, DiscountType, Eligibility};
pub use engine::{compute_discount, is_eligible, select_best, BestCoupon};
pub use error::{PromoError, PromoResult};
pub use store::{BoxedCouponCatalog, BoxedUsageLedger, CouponCatalog, UsageLedger};
