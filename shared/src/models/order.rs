//! Order Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order line with the unit price captured at purchase time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
    #[serde(with = "serde_helpers::money")]
    pub price: Decimal,
}

impl OrderLine {
    /// `price x quantity`; `None` on overflow
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Persisted order, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Owning account
    pub username: String,
    pub order_date: DateTime<Utc>,
    pub ship_address: String,
    pub products: Vec<OrderLine>,
}

impl Order {
    /// Sum of all line subtotals, rounded to cents; `None` on overflow
    pub fn total(&self) -> Option<Decimal> {
        line_total(&self.products)
    }
}

/// Checked sum of line subtotals, rounded to cents
pub fn line_total(lines: &[OrderLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.subtotal()?))
        .map(|total| total.round_dp(2))
}

/// One cart entry of a checkout request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutItem {
    #[serde(default, deserialize_with = "serde_helpers::id_string")]
    #[validate(length(min = 1, message = "Product ID is required for each product"))]
    pub product_id: String,
    #[serde(default, deserialize_with = "serde_helpers::integer_opt")]
    #[validate(
        required(message = "Quantity must be a positive integer"),
        range(min = 1, max = 4_294_967_295_i64, message = "Quantity must be a positive integer")
    )]
    pub quantity: Option<i64>,
}

/// Checkout payload (`POST /checkout`)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Products array is required and must not be empty"),
        nested
    )]
    pub products: Vec<CheckoutItem>,
    #[serde(default, deserialize_with = "serde_helpers::trimmed")]
    #[validate(length(min = 1, message = "Shipping address is required"))]
    pub ship_address: String,
}
