use super::package::Package;
use super::payment::PaymentReceipt;
use crate::error::{PortalError, Result};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Selecting,
    Processing,
    Success,
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Idle => "idle",
            Status::Selecting => "selecting",
            Status::Processing => "processing",
            Status::Success => "success",
            Status::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Where the visitor currently is in the checkout flow.
///
/// Every non-idle variant carries the selected package, so a session can
/// never be past `Idle` without one, nor idle while still holding one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Selecting(Package),
    Processing(Package),
    Success(Package, PaymentReceipt),
    Failed(Package, String),
}

/// Inputs that can move a session between states.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Select(Package),
    Cancel,
    SubmitPhone,
    PaymentSettled(std::result::Result<PaymentReceipt, String>),
    Dismiss,
    Retry,
}

impl SessionEvent {
    fn describe(&self) -> &'static str {
        match self {
            SessionEvent::Select(_) => "select a package",
            SessionEvent::Cancel => "cancel",
            SessionEvent::SubmitPhone => "submit a phone number",
            SessionEvent::PaymentSettled(_) => "settle a payment",
            SessionEvent::Dismiss => "dismiss",
            SessionEvent::Retry => "retry",
        }
    }
}

impl SessionState {
    pub fn status(&self) -> Status {
        match self {
            SessionState::Idle => Status::Idle,
            SessionState::Selecting(_) => Status::Selecting,
            SessionState::Processing(_) => Status::Processing,
            SessionState::Success(..) => Status::Success,
            SessionState::Failed(..) => Status::Failed,
        }
    }

    pub fn selected_package(&self) -> Option<&Package> {
        match self {
            SessionState::Idle => None,
            SessionState::Selecting(p)
            | SessionState::Processing(p)
            | SessionState::Success(p, _)
            | SessionState::Failed(p, _) => Some(p),
        }
    }

    pub fn receipt(&self) -> Option<&PaymentReceipt> {
        match self {
            SessionState::Success(_, receipt) => Some(receipt),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            SessionState::Failed(_, reason) => Some(reason),
            _ => None,
        }
    }

    /// Computes the state `event` leads to.
    ///
    /// Pairs not in the transition table are rejected with
    /// [`PortalError::InvalidTransition`]; `self` is never modified, so a
    /// rejected event leaves the session where it was. In particular a new
    /// selection is refused while a flow is already under way.
    pub fn next(&self, event: SessionEvent) -> Result<SessionState> {
        let next = match (self, event) {
            (SessionState::Idle, SessionEvent::Select(package)) => {
                SessionState::Selecting(package)
            }
            (SessionState::Selecting(_), SessionEvent::Cancel) => SessionState::Idle,
            (SessionState::Selecting(p), SessionEvent::SubmitPhone) => {
                SessionState::Processing(p.clone())
            }
            (SessionState::Processing(p), SessionEvent::PaymentSettled(Ok(receipt))) => {
                SessionState::Success(p.clone(), receipt)
            }
            (SessionState::Processing(p), SessionEvent::PaymentSettled(Err(reason))) => {
                SessionState::Failed(p.clone(), reason)
            }
            (SessionState::Success(..), SessionEvent::Dismiss)
            | (SessionState::Failed(..), SessionEvent::Dismiss) => SessionState::Idle,
            (SessionState::Failed(p, _), SessionEvent::Retry) => {
                SessionState::Selecting(p.clone())
            }
            (state, event) => {
                return Err(PortalError::InvalidTransition {
                    from: state.status().to_string(),
                    event: event.describe().to_string(),
                });
            }
        };
        Ok(next)
    }
}
