use crate::domain::package::Package;
use crate::domain::payment::PaymentReceipt;
use crate::domain::session::{SessionState, Status};
use serde::Serialize;

/// Flags and data handed down to the presentational surfaces: the package
/// grid, the phone-entry modal, the spinner and the confirmation banner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortalView {
    pub status: Status,
    pub is_modal_open: bool,
    pub is_loading: bool,
    pub is_success_visible: bool,
    pub is_failure_visible: bool,
    pub selected_package: Option<Package>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<PaymentReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl From<&SessionState> for PortalView {
    fn from(state: &SessionState) -> Self {
        let status = state.status();
        Self {
            status,
            is_modal_open: status == Status::Selecting,
            is_loading: status == Status::Processing,
            is_success_visible: status == Status::Success,
            is_failure_visible: status == Status::Failed,
            selected_package: state.selected_package().cloned(),
            receipt: state.receipt().cloned(),
            failure: state.failure().map(str::to_string),
        }
    }
}
