//! # Cart and User Types
//!
//! Per-request shopping cart and shopper context. Cart totals, category
//! sets, and item counts are derived on demand, never stored.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A line item in a shopping cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID
    pub product_id: String,

    /// Product category, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Unit price
    pub unit_price: f64,

    /// Quantity
    pub quantity: u32,
}

impl CartItem {
    /// Create an uncategorized line item
    pub fn new(product_id: impl Into<String>, unit_price: f64, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            category: None,
            unit_price,
            quantity,
        }
    }

    /// Builder: set the product category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Price of this line (unit price times quantity)
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// A shopping cart: an ordered sequence of line items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a line item
    pub fn add_item(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Monetary total across all line items
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Distinct categories present in the cart.
    ///
    /// Items without a category contribute a single `None` member.
    pub fn categories(&self) -> HashSet<Option<&str>> {
        self.items.iter().map(|i| i.category.as_deref()).collect()
    }

    /// Total quantity across all line items
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the cart has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shopper context supplied with each evaluation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    /// Ledger lookup key
    pub user_id: String,

    /// Loyalty tier, if the shopper has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_tier: Option<String>,

    /// ISO country code, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Total spend across the shopper's order history
    #[serde(default)]
    pub lifetime_spend: f64,

    /// Number of orders the shopper has placed
    #[serde(default)]
    pub orders_placed: u32,
}

impl UserContext {
    /// Create a context with no history
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_tier: None,
            country: None,
            lifetime_spend: 0.0,
            orders_placed: 0,
        }
    }

    /// Builder: set the loyalty tier
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.user_tier = Some(tier.into());
        self
    }

    /// Builder: set the country code
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Builder: set the lifetime spend
    pub fn with_lifetime_spend(mut self, amount: f64) -> Self {
        self.lifetime_spend = amount;
        self
    }

    /// Builder: set the placed-order count
    pub fn with_orders_placed(mut self, count: u32) -> Self {
        self.orders_placed = count;
        self
    }
}
