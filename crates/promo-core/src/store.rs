//! # Storage Traits
//!
//! Collaborator capabilities the engine consumes. The engine only ever
//! reads through these traits; the creation path is the single writer.
//! Any backend (in-memory, SQL, remote) can stand behind them.

use crate::coupon::Coupon;
use crate::error::PromoResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Keyed store of coupon definitions.
///
/// `code` is the identity key and must stay unique for the life of the
/// store. Enumeration order is part of the contract: `list` yields
/// coupons in insertion order, which is what breaks discount ties during
/// selection.
#[async_trait]
pub trait CouponCatalog: Send + Sync {
    /// Insert a coupon if its code is not already present.
    ///
    /// Fails with `PromoError::CouponExists` on a duplicate code and
    /// leaves the catalog unchanged.
    async fn insert(&self, coupon: Coupon) -> PromoResult<()>;

    /// Look up a single coupon by code.
    async fn get(&self, code: &str) -> PromoResult<Option<Coupon>>;

    /// Snapshot of every registered coupon, in insertion order.
    async fn list(&self) -> PromoResult<Vec<Coupon>>;
}

/// Per-coupon, per-user redemption counter.
#[async_trait]
pub trait UsageLedger: Send + Sync {
    /// Times `user_id` has redeemed `code`. Unknown pairs count as 0.
    async fn usage_count(&self, code: &str, user_id: &str) -> PromoResult<u32>;

    /// Create the empty counter map for a newly registered coupon.
    async fn register_coupon(&self, code: &str) -> PromoResult<()>;
}

/// Type alias for a shared catalog handle (dynamic dispatch)
pub type BoxedCouponCatalog = Arc<dyn CouponCatalog>;

/// Type alias for a shared ledger handle (dynamic dispatch)
pub type BoxedUsageLedger = Arc<dyn UsageLedger>;
