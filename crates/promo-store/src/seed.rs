//! # Seed File Loading
//!
//! Coupons can be pre-registered from a TOML file at startup so the
//! service is usable without a provisioning call. Dates in the file are
//! quoted ISO strings ("2026-01-01").

use promo_core::{Coupon, CouponCatalog, PromoError, PromoResult, UsageLedger};
use serde::Deserialize;
use tracing::warn;

/// Parsed seed file: a list of coupon definitions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CouponFile {
    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

impl CouponFile {
    /// Parse a seed file from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Register every seed coupon in the catalog and ledger.
///
/// Duplicate codes are logged and skipped; any other storage failure
/// aborts the load. Returns how many coupons were registered.
pub async fn seed_catalog(
    catalog: &dyn CouponCatalog,
    ledger: &dyn UsageLedger,
    file: CouponFile,
) -> PromoResult<usize> {
    let mut registered = 0;

    for coupon in file.coupons {
        let code = coupon.code.clone();
        match catalog.insert(coupon).await {
            Ok(()) => {
                ledger.register_coupon(&code).await?;
                registered += 1;
            }
            Err(PromoError::CouponExists { code }) => {
                warn!("Skipping duplicate seed coupon: {}", code);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryCatalog, MemoryLedger};
    use promo_core::DiscountType;

    const SEED: &str = r#"
        [[coupons]]
        code = "WELCOME10"
        description = "Flat 10 off your first order"
        discount_type = "FLAT"
        discount_value = 10.0
        start_date = "2026-01-01"
        end_date = "2026-12-31"

        [coupons.eligibility]
        first_order_only = true

        [[coupons]]
        code = "SPRING20"
        discount_type = "PERCENT"
        discount_value = 20.0
        max_discount_amount = 15.0
        start_date = "2026-03-01"
        end_date = "2026-05-31"
        usage_limit_per_user = 1
    "#;

    #[test]
    fn test_parse_seed_file() {
        let file = CouponFile::from_toml(SEED).unwrap();
        assert_eq!(file.coupons.len(), 2);

        let welcome = &file.coupons[0];
        assert_eq!(welcome.code, "WELCOME10");
        assert_eq!(welcome.discount_type, DiscountType::Flat);
        assert_eq!(
            welcome.eligibility.as_ref().unwrap().first_order_only,
            Some(true)
        );

        let spring = &file.coupons[1];
        assert_eq!(spring.discount_type, DiscountType::Percent);
        assert_eq!(spring.max_discount_amount, Some(15.0));
        assert_eq!(spring.usage_limit_per_user, Some(1));
    }

    #[test]
    fn test_empty_file_parses() {
        let file = CouponFile::from_toml("").unwrap();
        assert!(file.coupons.is_empty());
    }

    #[tokio::test]
    async fn test_seed_catalog() {
        let catalog = MemoryCatalog::new();
        let ledger = MemoryLedger::new();
        let file = CouponFile::from_toml(SEED).unwrap();

        let registered = seed_catalog(&catalog, &ledger, file).await.unwrap();
        assert_eq!(registered, 2);
        assert!(catalog.get("WELCOME10").await.unwrap().is_some());
        assert_eq!(ledger.usage_count("SPRING20", "anyone").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_skips_duplicates() {
        let catalog = MemoryCatalog::new();
        let ledger = MemoryLedger::new();

        let first = seed_catalog(&catalog, &ledger, CouponFile::from_toml(SEED).unwrap())
            .await
            .unwrap();
        assert_eq!(first, 2);

        // Re-seeding the same file registers nothing and does not fail
        let second = seed_catalog(&catalog, &ledger, CouponFile::from_toml(SEED).unwrap())
            .await
            .unwrap();
        assert_eq!(second, 0);
        assert_eq!(catalog.len().await, 2);
    }
}
