use crate::domain::package::{Catalog, Package};
use crate::error::{PortalError, Result};
use std::io::Read;

/// Reads a package catalog from a CSV source.
///
/// Expects the header `id,duration,price,popular`. Whitespace is trimmed and
/// the trailing `popular` column may be left empty or omitted.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily deserializes one package per row.
    pub fn packages(self) -> impl Iterator<Item = Result<Package>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PortalError::from))
    }

    /// Reads every row and builds a validated catalog.
    ///
    /// Unlike a transaction stream, a catalog is all-or-nothing: the first bad
    /// row fails the whole load.
    pub fn read_catalog(self) -> Result<Catalog> {
        let packages = self.packages().collect::<Result<Vec<_>>>()?;
        Catalog::new(packages)
    }
}
