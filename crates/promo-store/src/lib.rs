//! # promo-store
//!
//! In-memory storage for promo-engine-rs.
//!
//! This crate provides the concrete collaborators behind the
//! `promo-core` storage traits:
//!
//! 1. **MemoryCatalog** - `Vec`-backed coupon catalog
//!    - Put-if-absent inserts keyed by coupon code
//!    - Insertion-order enumeration (the selector's tie-break order)
//! 2. **MemoryLedger** - nested-map redemption counter
//!    - Zero-default reads for unseen `(code, user)` pairs
//!
//! Plus TOML seed-file loading for pre-registering coupons at startup.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use promo_store::{seed_catalog, CouponFile, MemoryCatalog, MemoryLedger};
//!
//! let catalog = MemoryCatalog::new();
//! let ledger = MemoryLedger::new();
//!
//! let file = CouponFile::from_toml(&std::fs::read_to_string("config/coupons.toml")?)?;
//! let registered = seed_catalog(&catalog, &ledger, file).await?;
//! ```

pub mod memory;
pub mod seed;

// Re-exports
pub use memory::{MemoryCatalog, MemoryLedger};
pub use seed::{seed_catalog, CouponFile};
