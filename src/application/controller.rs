use super::view::PortalView;
use crate::domain::package::Catalog;
use crate::domain::payment::{PaymentReceipt, PaymentRequest, PhoneNumber};
use crate::domain::ports::PaymentGatewayRef;
use crate::domain::session::{SessionEvent, SessionState, Status};
use crate::error::{PortalError, Result};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// An in-flight charge: the task running it and the channel its outcome
/// arrives on.
struct PendingPayment {
    task: JoinHandle<()>,
    outcome: oneshot::Receiver<Result<PaymentReceipt>>,
}

/// Drives one visitor's checkout session.
///
/// `PortalController` owns the catalog, the session state and the payment
/// gateway. All state changes go through [`SessionState::next`], so events
/// that do not fit the current state are refused here rather than relying on
/// the UI to hide the buttons.
///
/// Submitting a phone number spawns exactly one Tokio task per payment. The
/// session stays in `processing` until [`wait_for_payment`] or
/// [`poll_payment`] observes the outcome. The visitor cannot cancel a
/// payment; the task is only aborted if the controller itself is dropped.
///
/// [`wait_for_payment`]: PortalController::wait_for_payment
/// [`poll_payment`]: PortalController::poll_payment
pub struct PortalController {
    catalog: Catalog,
    gateway: PaymentGatewayRef,
    state: SessionState,
    pending: Option<PendingPayment>,
}

impl PortalController {
    /// Creates a controller with an idle session.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The packages on offer for the lifetime of the session.
    /// * `gateway` - Where payments are charged.
    pub fn new(catalog: Catalog, gateway: PaymentGatewayRef) -> Self {
        Self {
            catalog,
            gateway,
            state: SessionState::Idle,
            pending: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn view(&self) -> PortalView {
        PortalView::from(&self.state)
    }

    /// The visitor picked a package from the grid.
    pub fn select_package(&mut self, package_id: &str) -> Result<&SessionState> {
        let package = self
            .catalog
            .get(package_id)
            .cloned()
            .ok_or_else(|| PortalError::UnknownPackage(package_id.to_string()))?;
        self.transition(SessionEvent::Select(package))
    }

    /// The visitor closed the phone-entry modal.
    pub fn cancel(&mut self) -> Result<&SessionState> {
        self.transition(SessionEvent::Cancel)
    }

    /// The visitor submitted a phone number; starts the charge.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit_phone(&mut self, phone: PhoneNumber) -> Result<&SessionState> {
        self.transition(SessionEvent::SubmitPhone)?;

        // Only the request keeps the phone number; the session never does.
        if let Some(package) = self.state.selected_package() {
            let request = PaymentRequest::new(package, phone);
            self.pending = Some(self.spawn_charge(request));
        }
        Ok(&self.state)
    }

    /// Waits for the in-flight payment and applies its outcome.
    pub async fn wait_for_payment(&mut self) -> Result<&SessionState> {
        let pending = self.pending.take().ok_or(PortalError::NoPaymentPending)?;
        let outcome = pending.outcome.await.unwrap_or_else(|_| {
            Err(PortalError::PaymentFailed(
                "payment task ended without a result".to_string(),
            ))
        });
        self.settle(outcome)
    }

    /// Applies the payment outcome if it has arrived, without waiting.
    ///
    /// Returns `true` when the session moved out of `processing`.
    pub fn poll_payment(&mut self) -> Result<bool> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(false);
        };

        let outcome = match pending.outcome.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return Ok(false),
            Err(TryRecvError::Closed) => Err(PortalError::PaymentFailed(
                "payment task ended without a result".to_string(),
            )),
        };
        self.pending = None;
        self.settle(outcome)?;
        Ok(true)
    }

    /// The visitor closed the success or failure banner.
    pub fn dismiss(&mut self) -> Result<&SessionState> {
        self.transition(SessionEvent::Dismiss)
    }

    /// The visitor chose to try paying again after a failure.
    pub fn retry(&mut self) -> Result<&SessionState> {
        self.transition(SessionEvent::Retry)
    }

    pub fn is_payment_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn spawn_charge(&self, request: PaymentRequest) -> PendingPayment {
        let gateway = Arc::clone(&self.gateway);
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let outcome = gateway.charge(request).await;
            // The receiver is gone only if the controller was dropped.
            let _ = tx.send(outcome);
        });
        PendingPayment { task, outcome: rx }
    }

    fn settle(&mut self, outcome: Result<PaymentReceipt>) -> Result<&SessionState> {
        let outcome = outcome.map_err(|e| e.to_string());
        if let Err(reason) = &outcome {
            warn!(%reason, "payment failed");
        }
        self.transition(SessionEvent::PaymentSettled(outcome))
    }

    fn transition(&mut self, event: SessionEvent) -> Result<&SessionState> {
        let from = self.state.status();
        match self.state.next(event) {
            Ok(next) => {
                self.state = next;
                info!(
                    %from,
                    to = %self.state.status(),
                    package = self.state.selected_package().map(|p| p.id.as_str()),
                    "session transition"
                );
                Ok(&self.state)
            }
            Err(e) => {
                warn!(error = %e, "rejected session event");
                Err(e)
            }
        }
    }
}

impl Drop for PortalController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }
}
