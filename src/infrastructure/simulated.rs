use crate::domain::payment::{PaymentReceipt, PaymentRequest};
use crate::domain::ports::PaymentGateway;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_secs(3);

/// A stand-in for a mobile-money gateway.
///
/// Waits a fixed delay and then always succeeds. The phone number is never
/// looked at and nothing leaves the process.
#[derive(Debug)]
pub struct SimulatedGateway {
    delay: Duration,
    sequence: AtomicU64,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_PAYMENT_DELAY)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: PaymentRequest) -> Result<PaymentReceipt> {
        debug!(
            package = %request.package_id,
            amount = %request.amount,
            delay_ms = self.delay.as_millis() as u64,
            "simulating payment"
        );
        tokio::time::sleep(self.delay).await;

        let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(PaymentReceipt {
            reference: format!("SIM-{n:06}"),
            package_id: request.package_id,
            amount: request.amount,
        })
    }
}
