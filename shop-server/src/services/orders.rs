//! Order Service
//!
//! Listing, lookup and checkout.
//!
//! # Checkout
//!
//! ```text
//! validate cart ─▶ quote (snapshot) ─▶ charge ─▶ commit (one Store::write)
//!                     │                  │          │
//!                     ▼                  ▼          ▼
//!                 400 invalid /      402 declined   re-check stock, decrement,
//!                 insufficient                      insert order; refund on failure
//! ```
//!
//! Nothing is written before the commit step, and the commit either applies
//! every decrement plus the order insert or none of them.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use shared::models::{CheckoutRequest, Order, OrderLine, line_total};
use shared::{AppError, AppResult, ErrorCode};
use validator::Validate;

use super::payment::{PaymentGateway, PaymentReceipt};
use crate::auth::{CurrentUser, require_admin, require_order_access};
use crate::db::repository::OrderRepository;
use crate::db::{Document, Store};

/// Cart line after validation
#[derive(Debug, Clone, PartialEq)]
struct CartLine {
    product_id: String,
    quantity: u32,
}

/// Priced cart, ready to charge
#[derive(Debug, Clone)]
struct Quote {
    lines: Vec<OrderLine>,
    total: Decimal,
}

#[derive(Debug, Clone)]
pub struct OrderService {
    store: Arc<Store>,
    orders: OrderRepository,
    gateway: Arc<dyn PaymentGateway>,
}

impl OrderService {
    pub fn new(store: Arc<Store>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            orders: OrderRepository::new(store.clone()),
            store,
            gateway,
        }
    }

    /// Every order; admin only
    pub fn list_all(&self, caller: &CurrentUser) -> AppResult<Vec<Order>> {
        require_admin(caller)?;
        Ok(self.orders.find_all())
    }

    /// One order; resolved before the ownership check so unknown ids are 404
    pub fn get(&self, caller: &CurrentUser, id: &str) -> AppResult<Order> {
        let order = self.orders.find_by_id(id).ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, "The requested order does not exist")
        })?;
        require_order_access(caller, &order)?;
        Ok(order)
    }

    /// Turn a cart into a persisted order for `caller`
    pub async fn checkout(&self, caller: &CurrentUser, req: CheckoutRequest) -> AppResult<Order> {
        req.validate()?;
        let cart = cart_lines(&req)?;

        let quote = self.store.read(|doc| price_cart(doc, &cart))?;

        let receipt = self.gateway.charge(quote.total).await.map_err(|e| {
            tracing::info!(
                username = %caller.username,
                amount = %quote.total,
                error = %e,
                "Checkout payment failed"
            );
            AppError::with_message(ErrorCode::PaymentFailed, "Could not process payment")
        })?;

        let committed = self.store.write(|doc| {
            // Stock may have moved while the payment was in flight
            check_availability(doc, &cart)?;

            for line in &quote.lines {
                if let Some(product) = doc.product_mut(&line.product_id) {
                    product.on_hand -= line.quantity;
                }
            }

            let order = Order {
                id: doc.next_id::<Order>(),
                username: caller.username.clone(),
                order_date: Utc::now(),
                ship_address: req.ship_address.clone(),
                products: quote.lines.clone(),
            };
            doc.orders.push(order.clone());
            Ok::<_, AppError>(order)
        });

        match committed {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.id,
                    username = %order.username,
                    total = %quote.total,
                    transaction_id = %receipt.transaction_id,
                    "Order placed"
                );
                Ok(order)
            }
            Err(e) => {
                self.refund(&receipt).await;
                Err(e)
            }
        }
    }

    async fn refund(&self, receipt: &PaymentReceipt) {
        if let Err(e) = self.gateway.refund(receipt).await {
            tracing::error!(
                transaction_id = %receipt.transaction_id,
                amount = %receipt.amount,
                error = %e,
                "Refund after failed checkout did not go through"
            );
        }
    }
}

fn cart_lines(req: &CheckoutRequest) -> AppResult<Vec<CartLine>> {
    req.products
        .iter()
        .map(|item| {
            let quantity = item
                .quantity
                .and_then(|q| u32::try_from(q).ok())
                .filter(|q| *q > 0)
                .ok_or_else(|| AppError::validation("Quantity must be a positive integer"))?;
            Ok(CartLine {
                product_id: item.product_id.clone(),
                quantity,
            })
        })
        .collect()
}

/// Price the cart against the current catalog
///
/// Lines are checked in cart order and the first failure wins. Repeated
/// product ids draw on the same stock.
fn price_cart(doc: &Document, cart: &[CartLine]) -> AppResult<Quote> {
    check_availability(doc, cart)?;

    let lines: Vec<OrderLine> = cart
        .iter()
        .filter_map(|line| {
            doc.product(&line.product_id).map(|p| OrderLine {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                price: p.price,
            })
        })
        .collect();

    let total = line_total(&lines).ok_or_else(|| {
        AppError::validation("Order total is too large").with_detail("products", "total out of range")
    })?;

    Ok(Quote { lines, total })
}

/// Availability check only
fn check_availability(doc: &Document, cart: &[CartLine]) -> AppResult<()> {
    let mut requested: HashMap<&str, u64> = HashMap::new();

    for line in cart {
        let product = doc.product(&line.product_id).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CheckoutProductNotFound,
                format!("Product with ID {} not found", line.product_id),
            )
        })?;

        let wanted = requested.entry(product.id.as_str()).or_insert(0);
        *wanted += u64::from(line.quantity);

        if *wanted > u64::from(product.on_hand) {
            return Err(AppError::with_message(
                ErrorCode::InsufficientInventory,
                format!("Only {} units of {} available", product.on_hand, product.name),
            )
            .with_detail("product_id", product.id.clone()));
        }
    }
    Ok(())
}
