use super::payment::{PaymentReceipt, PaymentRequest};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: PaymentRequest) -> Result<PaymentReceipt>;
}

pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
