use crate::error::{PortalError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A strictly positive package price in the portal's single currency unit.
///
/// Wraps `rust_decimal::Decimal` so a zero or negative price can never reach
/// the catalog, whether it was compiled in or loaded from a file.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PortalError::ValidationError(
                "Price must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PortalError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A purchasable, time-bounded access plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Opaque identifier, unique within a catalog.
    pub id: String,
    /// Human-readable label for the access window, e.g. "2 Hours".
    pub duration: String,
    pub price: Price,
    /// Marketing hint only.
    #[serde(rename = "popular", default, deserialize_with = "deserialize_flag")]
    pub is_popular: bool,
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid popular flag: {other}"
            ))),
        },
    }
}

impl Package {
    pub fn new(id: impl Into<String>, duration: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            duration: duration.into(),
            price,
            is_popular: false,
        }
    }

    pub fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }
}

/// The fixed, ordered list of packages on offer.
///
/// A catalog has no mutators: it is built once at startup and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    packages: Vec<Package>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty lists and duplicate ids.
    pub fn new(packages: Vec<Package>) -> Result<Self> {
        if packages.is_empty() {
            return Err(PortalError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(packages.len());
        for package in &packages {
            if !seen.insert(package.id.as_str()) {
                return Err(PortalError::DuplicatePackageId(package.id.clone()));
            }
        }

        Ok(Self { packages })
    }

    /// All packages, in display order.
    pub fn list_packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn get(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Always `false`: [`Catalog::new`] refuses empty lists.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl Default for Catalog {
    /// The compiled-in sample offering.
    fn default() -> Self {
        Self {
            packages: vec![
                Package::new("1", "1 Hour", Price(dec!(10))),
                Package::new("2", "2 Hours", Price(dec!(15))).popular(),
                Package::new("3", "6 Hours", Price(dec!(45))),
                Package::new("4", "24 Hours", Price(dec!(150))),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(value: Decimal) -> Price {
        Price::new(value).unwrap()
    }

    #[test]
    fn test_price_validation() {
        assert!(Price::new(dec!(0.01)).is_ok());
        assert!(matches!(
            Price::new(dec!(0)),
            Err(PortalError::ValidationError(_))
        ));
        assert!(matches!(
            Price::new(dec!(-5)),
            Err(PortalError::ValidationError(_))
        ));
    }

    #[test]
    fn test_default_catalog_contents() {
        let catalog = Catalog::default();
        let summary: Vec<(&str, &str, Decimal, bool)> = catalog
            .list_packages()
            .iter()
            .map(|p| (p.id.as_str(), p.duration.as_str(), p.price.value(), p.is_popular))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("1", "1 Hour", dec!(10), false),
                ("2", "2 Hours", dec!(15), true),
                ("3", "6 Hours", dec!(45), false),
                ("4", "24 Hours", dec!(150), false),
            ]
        );
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Package::new("a", "1 Hour", price(dec!(10))),
            Package::new("a", "2 Hours", price(dec!(15))),
        ]);
        assert!(matches!(result, Err(PortalError::DuplicatePackageId(id)) if id == "a"));
    }

    #[test]
    fn test_catalog_rejects_empty() {
        assert!(matches!(Catalog::new(vec![]), Err(PortalError::EmptyCatalog)));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::default();
        assert_eq!(catalog.get("3").unwrap().duration, "6 Hours");
        assert!(catalog.get("99").is_none());
    }

    #[test]
    fn test_package_serializes_price_and_flag() {
        let package = Package::new("2", "2 Hours", price(dec!(15))).popular();
        let json = serde_json::to_value(&package).unwrap();
        assert_eq!(json["price"], "15");
        assert_eq!(json["popular"], true);
    }

    #[test]
    fn test_package_deserialization_rejects_zero_price() {
        let json = r#"{"id":"x","duration":"1 Hour","price":"0"}"#;
        assert!(serde_json::from_str::<Package>(json).is_err());
    }
}
