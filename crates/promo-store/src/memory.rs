//! # In-Memory Storage
//!
//! Process-local catalog and ledger implementations. Both are safe to
//! share across request handlers behind an `Arc`; each method takes one
//! lock for one consistent snapshot or write.

use async_trait::async_trait;
use promo_core::{Coupon, CouponCatalog, PromoError, PromoResult, UsageLedger};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory coupon catalog.
///
/// Backed by a `Vec`, so enumeration order is exactly insertion order —
/// the tie-break order the selector relies on.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    coupons: RwLock<Vec<Coupon>>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered coupons
    pub async fn len(&self) -> usize {
        self.coupons.read().await.len()
    }

    /// Check if no coupons are registered
    pub async fn is_empty(&self) -> bool {
        self.coupons.read().await.is_empty()
    }
}

#[async_trait]
impl CouponCatalog for MemoryCatalog {
    async fn insert(&self, coupon: Coupon) -> PromoResult<()> {
        let mut coupons = self.coupons.write().await;
        if coupons.iter().any(|c| c.code == coupon.code) {
            return Err(PromoError::CouponExists { code: coupon.code });
        }
        coupons.push(coupon);
        Ok(())
    }

    async fn get(&self, code: &str) -> PromoResult<Option<Coupon>> {
        let coupons = self.coupons.read().await;
        Ok(coupons.iter().find(|c| c.code == code).cloned())
    }

    async fn list(&self) -> PromoResult<Vec<Coupon>> {
        Ok(self.coupons.read().await.clone())
    }
}

/// In-memory usage ledger: `code -> user_id -> redemption count`.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    counts: RwLock<HashMap<String, HashMap<String, u32>>>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the redemption count for `(code, user_id)`.
    ///
    /// The evaluation path never calls this; it exists for fulfilment
    /// flows and tests that need pre-existing usage history.
    pub async fn record_redemption(&self, code: &str, user_id: &str) {
        let mut counts = self.counts.write().await;
        let per_user = counts.entry(code.to_string()).or_default();
        *per_user.entry(user_id.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl UsageLedger for MemoryLedger {
    async fn usage_count(&self, code: &str, user_id: &str) -> PromoResult<u32> {
        let counts = self.counts.read().await;
        Ok(counts
            .get(code)
            .and_then(|per_user| per_user.get(user_id))
            .copied()
            .unwrap_or(0))
    }

    async fn register_coupon(&self, code: &str) -> PromoResult<()> {
        let mut counts = self.counts.write().await;
        counts.entry(code.to_string()).or_default();
        Ok(())
    }
}
