use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Catalog must contain at least one package")]
    EmptyCatalog,
    #[error("Duplicate package id: {0}")]
    DuplicatePackageId(String),
    #[error("Unknown package: {0}")]
    UnknownPackage(String),
    #[error("Cannot {event} while {from}")]
    InvalidTransition { from: String, event: String },
    #[error("No payment is pending")]
    NoPaymentPending,
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
    #[error("Invalid command: {0}")]
    ParseCommand(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;
