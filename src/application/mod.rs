//! Application layer containing the checkout orchestration.
//!
//! This module defines the `PortalController`, which owns a visitor's session
//! state and runs payments as spawned `tokio` tasks whose outcome comes back
//! over a oneshot channel, and the `PortalView` it derives for the UI.

pub mod controller;
pub mod view;
