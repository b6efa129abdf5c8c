// Payment gateway seam - the real processors (Stripe/Paystack) live behind
// this trait; the mock gateway settles in-process after a simulated delay

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::StoreError;

/// Share of every sale kept by the platform. The remainder goes to the artist.
pub const PLATFORM_FEE_RATE: f64 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Declined,
}

#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub email: String,
    pub amount: f64,
    pub currency: String,
}

/// Settled charge returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    pub reference: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub settled_at: DateTime<Utc>,
}

pub trait PaymentGateway {
    fn charge(
        &mut self,
        request: ChargeRequest,
    ) -> impl std::future::Future<Output = Result<Charge, StoreError>> + Send;
}

/// In-process stand-in for the hosted payment widget. Sleeps for the
/// configured settlement latency, then succeeds unless told otherwise.
#[derive(Debug, Clone)]
pub struct MockGateway {
    latency: Duration,
    always_decline: bool,
}

impl MockGateway {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            always_decline: false,
        }
    }

    /// Gateway that declines every charge. Used to exercise failure paths.
    pub fn declining(latency: Duration) -> Self {
        Self {
            latency,
            always_decline: true,
        }
    }
}

impl PaymentGateway for MockGateway {
    async fn charge(&mut self, request: ChargeRequest) -> Result<Charge, StoreError> {
        tokio::time::sleep(self.latency).await;

        if request.amount <= 0.0 {
            return Err(StoreError::PaymentDeclined(
                "charge amount must be positive".to_string(),
            ));
        }

        if self.always_decline {
            return Err(StoreError::PaymentDeclined(
                "card declined by issuer".to_string(),
            ));
        }

        let reference = format!("mock_ref_{}", Uuid::new_v4().simple());
        info!("Charge settled: {} {:.2} {}", reference, request.amount, request.currency);

        Ok(Charge {
            reference,
            amount: request.amount,
            currency: request.currency,
            status: PaymentStatus::Completed,
            settled_at: Utc::now(),
        })
    }
}

/// Split a sale into (platform_fee, artist_revenue), both rounded to cents.
/// The two parts always sum back to the rounded amount.
pub fn split_amount(amount: f64) -> (f64, f64) {
    let cents = (amount * 100.0).round() as i64;
    let fee_cents = (cents as f64 * PLATFORM_FEE_RATE).round() as i64;
    let revenue_cents = cents - fee_cents;
    (fee_cents as f64 / 100.0, revenue_cents as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sums_to_amount() {
        for amount in [0.99, 1.99, 4.50, 7.00, 0.49] {
            let (fee, revenue) = split_amount(amount);
            assert!((fee + revenue - amount).abs() < 1e-9, "split of {} leaks cents", amount);
            assert!(fee >= 0.0 && revenue >= 0.0);
        }
    }

    #[test]
    fn test_split_takes_thirty_percent() {
        let (fee, revenue) = split_amount(10.0);
        assert_eq!(fee, 3.0);
        assert_eq!(revenue, 7.0);
    }

    #[tokio::test]
    async fn test_mock_gateway_settles() {
        let mut gateway = MockGateway::new(Duration::ZERO);
        let charge = gateway
            .charge(ChargeRequest {
                email: "john@example.com".into(),
                amount: 1.99,
                currency: "USD".into(),
            })
            .await
            .unwrap();

        assert_eq!(charge.status, PaymentStatus::Completed);
        assert!(charge.reference.starts_with("mock_ref_"));
    }

    #[tokio::test]
    async fn test_declining_gateway_fails() {
        let mut gateway = MockGateway::declining(Duration::ZERO);
        let result = gateway
            .charge(ChargeRequest {
                email: "john@example.com".into(),
                amount: 1.99,
                currency: "USD".into(),
            })
            .await;

        assert!(matches!(result, Err(StoreError::PaymentDeclined(_))));
    }

    #[tokio::test]
    async fn test_zero_amount_is_rejected() {
        let mut gateway = MockGateway::new(Duration::ZERO);
        let result = gateway
            .charge(ChargeRequest {
                email: "john@example.com".into(),
                amount: 0.0,
                currency: "USD".into(),
            })
            .await;

        assert!(matches!(result, Err(StoreError::PaymentDeclined(_))));
    }
}
