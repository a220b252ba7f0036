//! # Coupon Types
//!
//! Coupon definitions and the optional eligibility rule-set a coupon
//! may impose on the user and cart.

use crate::cart::{Cart, UserContext};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a coupon's `discount_value` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Fixed amount off the cart total
    Flat,
    /// Percentage of the cart total, optionally capped
    Percent,
}

/// Optional eligibility rules attached to a coupon.
///
/// Every field is an independent predicate: absent means "not enforced".
/// A configured value of zero / empty list / `false` is also treated as
/// not enforced, so `Some(0.0)` and `None` gate nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Eligibility {
    /// User must belong to one of these tiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_user_tiers: Option<Vec<String>>,

    /// Floor on the user's lifetime spend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_lifetime_spend: Option<f64>,

    /// Floor on the user's completed order count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_orders_placed: Option<u32>,

    /// Only users with zero placed orders qualify
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_order_only: Option<bool>,

    /// User's country must be one of these codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_countries: Option<Vec<String>>,

    /// Floor on the cart total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cart_value: Option<f64>,

    /// Cart must contain at least one item from these categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_categories: Option<Vec<String>>,

    /// Cart must contain no item from these categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_categories: Option<Vec<String>>,

    /// Floor on the total item quantity in the cart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items_count: Option<u32>,
}

impl Eligibility {
    /// Create an empty rule-set (matches every user and cart)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict to user tiers
    pub fn with_allowed_tiers(mut self, tiers: Vec<String>) -> Self {
        self.allowed_user_tiers = Some(tiers);
        self
    }

    /// Builder: set lifetime-spend floor
    pub fn with_min_lifetime_spend(mut self, amount: f64) -> Self {
        self.min_lifetime_spend = Some(amount);
        self
    }

    /// Builder: set orders-placed floor
    pub fn with_min_orders_placed(mut self, count: u32) -> Self {
        self.min_orders_placed = Some(count);
        self
    }

    /// Builder: restrict to first orders
    pub fn first_order_only(mut self) -> Self {
        self.first_order_only = Some(true);
        self
    }

    /// Builder: restrict to countries
    pub fn with_allowed_countries(mut self, countries: Vec<String>) -> Self {
        self.allowed_countries = Some(countries);
        self
    }

    /// Builder: set cart-total floor
    pub fn with_min_cart_value(mut self, amount: f64) -> Self {
        self.min_cart_value = Some(amount);
        self
    }

    /// Builder: require at least one of these categories in the cart
    pub fn with_applicable_categories(mut self, categories: Vec<String>) -> Self {
        self.applicable_categories = Some(categories);
        self
    }

    /// Builder: reject carts containing any of these categories
    pub fn with_excluded_categories(mut self, categories: Vec<String>) -> Self {
        self.excluded_categories = Some(categories);
        self
    }

    /// Builder: set item-quantity floor
    pub fn with_min_items_count(mut self, count: u32) -> Self {
        self.min_items_count = Some(count);
        self
    }

    /// Evaluate every configured rule against a user and cart.
    ///
    /// Returns `false` as soon as one configured rule fails. Rules whose
    /// configured value is zero / empty / `false` are skipped.
    pub fn matches(&self, user: &UserContext, cart: &Cart) -> bool {
        if let Some(tiers) = &self.allowed_user_tiers {
            if !tiers.is_empty() && !user.user_tier.as_ref().is_some_and(|t| tiers.contains(t)) {
                return false;
            }
        }

        if let Some(min) = self.min_lifetime_spend {
            if min != 0.0 && user.lifetime_spend < min {
                return false;
            }
        }

        if let Some(min) = self.min_orders_placed {
            if min != 0 && user.orders_placed < min {
                return false;
            }
        }

        if self.first_order_only.unwrap_or(false) && user.orders_placed > 0 {
            return false;
        }

        if let Some(countries) = &self.allowed_countries {
            if !countries.is_empty()
                && !user.country.as_ref().is_some_and(|c| countries.contains(c))
            {
                return false;
            }
        }

        if let Some(min) = self.min_cart_value {
            if min != 0.0 && cart.total() < min {
                return false;
            }
        }

        // Uncategorized items show up as None here and never match a
        // configured category name.
        let categories = cart.categories();

        if let Some(allowed) = &self.applicable_categories {
            if !allowed.is_empty()
                && !allowed.iter().any(|c| categories.contains(&Some(c.as_str())))
            {
                return false;
            }
        }

        if let Some(excluded) = &self.excluded_categories {
            if excluded.iter().any(|c| categories.contains(&Some(c.as_str()))) {
                return false;
            }
        }

        if let Some(min) = self.min_items_count {
            if min != 0 && cart.item_count() < min {
                return false;
            }
        }

        true
    }
}

/// A promotional coupon.
///
/// Immutable once registered in a catalog; `code` is the identity key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    /// Unique coupon code (e.g., "WELCOME10")
    pub code: String,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Flat amount or percentage
    pub discount_type: DiscountType,

    /// Amount for `Flat`, percentage for `Percent`
    pub discount_value: f64,

    /// Payout cap for `Percent` coupons; zero behaves as uncapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<f64>,

    /// First calendar day the coupon is valid (inclusive)
    pub start_date: NaiveDate,

    /// Last calendar day the coupon is valid (inclusive)
    pub end_date: NaiveDate,

    /// Per-user redemption cap; absent or zero means unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit_per_user: Option<u32>,

    /// Optional eligibility rule-set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Eligibility>,
}

impl Coupon {
    /// Create a flat-amount coupon valid over `[start, end]`
    pub fn flat(code: impl Into<String>, value: f64, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            code: code.into(),
            description: None,
            discount_type: DiscountType::Flat,
            discount_value: value,
            max_discount_amount: None,
            start_date: start,
            end_date: end,
            usage_limit_per_user: None,
            eligibility: None,
        }
    }

    /// Create a percentage coupon valid over `[start, end]`
    pub fn percent(code: impl Into<String>, value: f64, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            discount_type: DiscountType::Percent,
            ..Self::flat(code, value, start, end)
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Builder: cap the payout of a percentage coupon
    pub fn with_max_discount(mut self, cap: f64) -> Self {
        self.max_discount_amount = Some(cap);
        self
    }

    /// Builder: set the per-user usage limit
    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit_per_user = Some(limit);
        self
    }

    /// Builder: attach an eligibility rule-set
    pub fn with_eligibility(mut self, rules: Eligibility) -> Self {
        self.eligibility = Some(rules);
        self
    }

    /// Check whether `day` falls inside the validity window (inclusive
    /// at both ends)
    pub fn in_window(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}
