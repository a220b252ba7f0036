//! # Selection Engine
//!
//! Eligibility evaluation, discount calculation, and best-coupon
//! selection. Everything here is a deterministic function of its inputs
//! and the two read-only collaborator lookups; nothing is mutated, so
//! concurrent callers only need each store to be internally consistent
//! for the duration of one snapshot.

use crate::cart::{Cart, UserContext};
use crate::coupon::{Coupon, DiscountType};
use crate::error::PromoResult;
use crate::store::{CouponCatalog, UsageLedger};
use chrono::NaiveDate;

/// The winning coupon for a cart, with its computed discount
#[derive(Debug, Clone)]
pub struct BestCoupon {
    pub coupon: Coupon,
    pub discount: f64,
}

/// Decide whether `coupon` may be applied for this user and cart on
/// `today`.
///
/// Checks run in order and short-circuit: validity window, then every
/// configured eligibility rule, then the per-user usage limit. The
/// ledger is the only external call and is consulted last, only when a
/// non-zero limit is configured.
pub async fn is_eligible(
    coupon: &Coupon,
    user: &UserContext,
    cart: &Cart,
    today: NaiveDate,
    ledger: &dyn UsageLedger,
) -> PromoResult<bool> {
    if !coupon.in_window(today) {
        return Ok(false);
    }

    if let Some(rules) = &coupon.eligibility {
        if !rules.matches(user, cart) {
            return Ok(false);
        }
    }

    if let Some(limit) = coupon.usage_limit_per_user {
        // Zero means unlimited, same as an absent limit
        if limit > 0 {
            let used = ledger.usage_count(&coupon.code, &user.user_id).await?;
            if used >= limit {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Compute the discount an already-eligible coupon pays on `cart_total`.
///
/// Flat coupons pay their face value even when it exceeds the cart
/// total. Percent coupons are capped by `max_discount_amount` only when
/// a non-zero cap is configured.
pub fn compute_discount(coupon: &Coupon, cart_total: f64) -> f64 {
    match coupon.discount_type {
        DiscountType::Flat => coupon.discount_value,
        DiscountType::Percent => {
            let raw = coupon.discount_value / 100.0 * cart_total;
            match coupon.max_discount_amount {
                Some(cap) if cap != 0.0 => raw.min(cap),
                _ => raw,
            }
        }
    }
}

/// Pick the eligible coupon paying the strictly largest discount.
///
/// Iterates one catalog snapshot in insertion order. Only a strictly
/// greater discount replaces the running best, so the first-enumerated
/// coupon wins ties and a discount of zero or less never beats
/// "no coupon".
pub async fn select_best(
    catalog: &dyn CouponCatalog,
    ledger: &dyn UsageLedger,
    user: &UserContext,
    cart: &Cart,
    today: NaiveDate,
) -> PromoResult<Option<BestCoupon>> {
    let cart_total = cart.total();
    let mut best: Option<BestCoupon> = None;

    for coupon in catalog.list().await? {
        if !is_eligible(&coupon, user, cart, today, ledger).await? {
            continue;
        }

        let discount = compute_discount(&coupon, cart_total);
        if discount > best.as_ref().map_or(0.0, |b| b.discount) {
            best = Some(BestCoupon { coupon, discount });
        }
    }

    Ok(best)
}
