#![allow(dead_code)]

use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use wifi_portal::application::controller::PortalController;
use wifi_portal::domain::package::Catalog;
use wifi_portal::domain::payment::{PaymentReceipt, PaymentRequest};
use wifi_portal::domain::ports::PaymentGateway;
use wifi_portal::error::{PortalError, Result};
use wifi_portal::infrastructure::simulated::SimulatedGateway;

/// A gateway that declines every charge with the given reason.
pub struct DecliningGateway(pub &'static str);

#[async_trait]
impl PaymentGateway for DecliningGateway {
    async fn charge(&self, _request: PaymentRequest) -> Result<PaymentReceipt> {
        Err(PortalError::PaymentFailed(self.0.to_string()))
    }
}

pub fn simulated_controller() -> PortalController {
    PortalController::new(Catalog::default(), Arc::new(SimulatedGateway::default()))
}

pub fn instant_controller() -> PortalController {
    PortalController::new(
        Catalog::default(),
        Arc::new(SimulatedGateway::new(Duration::ZERO)),
    )
}

pub fn declining_controller(reason: &'static str) -> PortalController {
    PortalController::new(Catalog::default(), Arc::new(DecliningGateway(reason)))
}

pub fn write_temp(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}
