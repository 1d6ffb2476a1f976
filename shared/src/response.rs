//! API Response types
//!
//! Success bodies for every endpoint. Reads carry `success: true`,
//! mutations carry a human-readable `message`.

use crate::models::{Order, Product, UserProfile};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `GET /products`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub count: usize,
    pub products: Vec<Product>,
}

impl ProductListResponse {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            success: true,
            count: products.len(),
            products,
        }
    }
}

/// `GET /products/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSearchResponse {
    pub success: bool,
    pub query: String,
    pub count: usize,
    pub products: Vec<Product>,
}

impl ProductSearchResponse {
    pub fn new(query: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            success: true,
            query: query.into(),
            count: products.len(),
            products,
        }
    }
}

/// Product create/update/delete confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMutationResponse {
    pub message: String,
    pub product: Product,
}

impl ProductMutationResponse {
    pub fn new(message: impl Into<String>, product: Product) -> Self {
        Self {
            message: message.into(),
            product,
        }
    }
}

/// `GET /users/{username}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserProfile,
}

impl UserResponse {
    pub fn new(user: UserProfile) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

/// Registration and profile update confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMutationResponse {
    pub message: String,
    pub user: UserProfile,
}

impl UserMutationResponse {
    pub fn new(message: impl Into<String>, user: UserProfile) -> Self {
        Self {
            message: message.into(),
            user,
        }
    }
}

/// `GET /orders`, `GET /users/{username}/orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub success: bool,
    pub count: usize,
    pub orders: Vec<Order>,
}

impl OrderListResponse {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            success: true,
            count: orders.len(),
            orders,
        }
    }
}

/// `GET /orders/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

impl OrderResponse {
    pub fn new(order: Order) -> Self {
        Self {
            success: true,
            order,
        }
    }
}

/// `POST /checkout`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub message: String,
    pub order: Order,
    /// Order total formatted with two decimals (`"39.98"`)
    pub total_amount: String,
}

impl CheckoutResponse {
    pub fn new(order: Order, total: Decimal) -> Self {
        Self {
            message: "Order placed successfully".to_string(),
            order,
            total_amount: format!("{:.2}", total.round_dp(2)),
        }
    }
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok(version: impl Into<String>) -> Self {
        Self {
            status: "OK".to_string(),
            timestamp: Utc::now(),
            version: version.into(),
        }
    }
}
