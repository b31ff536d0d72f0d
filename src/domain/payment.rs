use super::package::{Package, Price};
use serde::Serialize;
use std::fmt;

/// Phone number as typed into the payment modal.
///
/// Validation is the modal's concern; the checkout accepts whatever it is
/// handed, minus surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a gateway needs to charge for one package.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub package_id: String,
    pub amount: Price,
    pub phone: PhoneNumber,
}

impl PaymentRequest {
    pub fn new(package: &Package, phone: PhoneNumber) -> Self {
        Self {
            package_id: package.id.clone(),
            amount: package.price,
            phone,
        }
    }
}

/// Proof of a settled payment. Carries no customer data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub package_id: String,
    pub amount: Price,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_phone_number_is_trimmed_not_validated() {
        assert_eq!(PhoneNumber::new("  0712 345 678 ").as_str(), "0712 345 678");
        assert_eq!(PhoneNumber::new("not a number").as_str(), "not a number");
    }

    #[test]
    fn test_request_copies_package_price() {
        let package = Package::new("4", "24 Hours", Price::new(dec!(150)).unwrap());
        let request = PaymentRequest::new(&package, PhoneNumber::new("0700000000"));
        assert_eq!(request.package_id, "4");
        assert_eq!(request.amount.value(), dec!(150));
    }
}
