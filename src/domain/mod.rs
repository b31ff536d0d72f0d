//! Domain layer: the catalog, the checkout session state machine, and the
//! port through which payments are charged. Nothing in here performs I/O.

pub mod package;
pub mod payment;
pub mod ports;
pub mod session;
