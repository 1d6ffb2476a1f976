//! Payment gateway
//!
//! Checkout only talks to [`PaymentGateway`]; the shipped implementation is a
//! mock that waits a little and approves most charges.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Proof of a successful charge
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment declined")]
    Declined,

    #[error("Refund failed: {0}")]
    RefundFailed(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Charge the given amount
    async fn charge(&self, amount: Decimal) -> Result<PaymentReceipt, PaymentError>;

    /// Reverse an earlier charge
    async fn refund(&self, receipt: &PaymentReceipt) -> Result<(), PaymentError>;
}

/// Simulated gateway: sleeps `delay`, then approves with probability `success_rate`
///
/// Approved charges stay open until refunded once; clones share them.
#[derive(Debug, Clone)]
pub struct MockPaymentGateway {
    success_rate: f64,
    delay: Duration,
    open_charges: Arc<Mutex<HashSet<String>>>,
}

impl MockPaymentGateway {
    pub fn new(success_rate: f64, delay: Duration) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            success_rate,
            delay,
            open_charges: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Always approves, no delay
    pub fn always_approve() -> Self {
        Self::new(1.0, Duration::ZERO)
    }

    /// Always declines, no delay
    pub fn always_decline() -> Self {
        Self::new(0.0, Duration::ZERO)
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new(0.9, Duration::from_millis(100))
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn charge(&self, amount: Decimal) -> Result<PaymentReceipt, PaymentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let approved = rand::thread_rng().gen_bool(self.success_rate);
        if !approved {
            tracing::info!(amount = %amount, "Mock payment declined");
            return Err(PaymentError::Declined);
        }

        let receipt = PaymentReceipt {
            transaction_id: Uuid::new_v4().to_string(),
            amount,
        };
        self.open_charges.lock().insert(receipt.transaction_id.clone());
        tracing::debug!(
            transaction_id = %receipt.transaction_id,
            amount = %amount,
            "Mock payment approved"
        );
        Ok(receipt)
    }

    async fn refund(&self, receipt: &PaymentReceipt) -> Result<(), PaymentError> {
        if !self.open_charges.lock().remove(&receipt.transaction_id) {
            return Err(PaymentError::RefundFailed(format!(
                "no open charge {}",
                receipt.transaction_id
            )));
        }
        tracing::info!(
            transaction_id = %receipt.transaction_id,
            amount = %receipt.amount,
            "Mock payment refunded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_approve() {
        let gateway = MockPaymentGateway::always_approve();
        let receipt = gateway.charge(Decimal::new(3998, 2)).await.unwrap();
        assert_eq!(receipt.amount, Decimal::new(3998, 2));
        assert!(!receipt.transaction_id.is_empty());
        assert!(gateway.refund(&receipt).await.is_ok());
    }

    #[tokio::test]
    async fn test_always_decline() {
        let gateway = MockPaymentGateway::always_decline();
        assert!(matches!(
            gateway.charge(Decimal::ONE).await,
            Err(PaymentError::Declined)
        ));
    }

    #[tokio::test]
    async fn test_refund_only_once() {
        let gateway = MockPaymentGateway::always_approve();
        let receipt = gateway.charge(Decimal::new(1299, 2)).await.unwrap();
        gateway.refund(&receipt).await.unwrap();

        let err = gateway.refund(&receipt).await.unwrap_err();
        assert!(matches!(err, PaymentError::RefundFailed(_)));
        assert!(err.to_string().contains(&receipt.transaction_id));
    }

    #[tokio::test]
    async fn test_refund_unknown_charge_fails() {
        let gateway = MockPaymentGateway::always_approve();
        let other = MockPaymentGateway::always_approve();
        let receipt = other.charge(Decimal::ONE).await.unwrap();

        assert!(matches!(
            gateway.refund(&receipt).await,
            Err(PaymentError::RefundFailed(_))
        ));
        assert!(other.clone().refund(&receipt).await.is_ok());
    }

    #[test]
    fn test_success_rate_clamped() {
        let gateway = MockPaymentGateway::new(7.0, Duration::ZERO);
        assert_eq!(gateway.success_rate, 1.0);
        let gateway = MockPaymentGateway::new(-1.0, Duration::ZERO);
        assert_eq!(gateway.success_rate, 0.0);
    }
}
