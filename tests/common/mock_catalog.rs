/*!
 * Mock catalog source for testing
 *
 * Stands in for the remote book-name service so tests never touch the
 * network. Counts fetches so tests can check that the cache is used.
 */

use std::cell::Cell;

use cutup::catalog::{BookCatalog, CatalogSource};
use cutup::errors::CatalogError;

/// Catalog source returning a fixed catalog for one language
#[derive(Debug)]
pub struct MockCatalogSource {
    /// Language the source knows about
    pub language: String,
    /// Catalog returned for that language
    pub catalog: BookCatalog,
    /// Number of fetch calls made
    pub fetch_count: Cell<usize>,
}

impl MockCatalogSource {
    pub fn new(language: &str, catalog: BookCatalog) -> Self {
        Self {
            language: language.to_string(),
            catalog,
            fetch_count: Cell::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetch_count.get()
    }
}

impl CatalogSource for MockCatalogSource {
    fn fetch(&self, language: &str) -> Result<BookCatalog, CatalogError> {
        self.fetch_count.set(self.fetch_count.get() + 1);
        if language != self.language {
            return Err(CatalogError::InvalidLanguage(language.to_string()));
        }
        Ok(self.catalog.clone())
    }
}
