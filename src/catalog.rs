/*!
 * Book number to book name catalogs.
 *
 * A catalog maps two digit book numbers (`"01"` to `"66"`) to the display
 * name of each book in one publication language. Catalogs come from a
 * [`CatalogSource`] and are cached on disk as `lang-<LANG>.json` in the
 * working directory so the source is only consulted once per language.
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use crate::errors::CatalogError;
use crate::file_utils::FileManager;

/// Number of books in a complete catalog
pub const BOOK_COUNT: u32 = 66;

/// Format a book index as a catalog key, `1` becomes `"01"`
pub fn book_number(index: u32) -> String {
    format!("{:02}", index)
}

/// Provider of catalogs for languages that are not cached yet
pub trait CatalogSource {
    /// Fetch the complete catalog for `language`
    fn fetch(&self, language: &str) -> Result<BookCatalog, CatalogError>;
}

// @struct: Book number to display name mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookCatalog {
    books: BTreeMap<String, String>,
}

impl BookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    // @returns: Previous name for the number, if any
    pub fn insert(&mut self, book_number: impl Into<String>, name: impl Into<String>) -> Option<String> {
        self.books.insert(book_number.into(), name.into())
    }

    pub fn get(&self, book_number: &str) -> Option<&str> {
        self.books.get(book_number).map(String::as_str)
    }

    /// Display name for a book number, or [`CatalogError::UnknownBook`]
    pub fn name_for(&self, book_number: &str) -> Result<&str, CatalogError> {
        self.get(book_number)
            .ok_or_else(|| CatalogError::UnknownBook(book_number.to_string()))
    }

    /// Entries in book number order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.books.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Check that every key is a book number between `01` and `66` and every name is usable
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (number, name) in self.iter() {
            let valid_number = number.len() == 2
                && number.chars().all(|c| c.is_ascii_digit())
                && number.parse::<u32>().is_ok_and(|n| (1..=BOOK_COUNT).contains(&n));
            if !valid_number {
                return Err(CatalogError::InvalidEntry {
                    book_number: number.to_string(),
                    reason: format!("book number must be between 01 and {}", BOOK_COUNT),
                });
            }

            if name.trim().is_empty() {
                return Err(CatalogError::InvalidEntry {
                    book_number: number.to_string(),
                    reason: "book name is empty".to_string(),
                });
            }

            if name.contains(['/', '\\']) {
                return Err(CatalogError::InvalidEntry {
                    book_number: number.to_string(),
                    reason: format!("book name '{}' contains a path separator", name),
                });
            }
        }
        Ok(())
    }

    // @returns: Cache file location for a language
    pub fn cache_path<P: AsRef<Path>>(work_dir: P, language: &str) -> PathBuf {
        work_dir.as_ref().join(format!("lang-{}.json", language))
    }

    /// Load a catalog from a JSON object file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the catalog as indented JSON, keeping non-ASCII names readable
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let io_error = |source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, json).map_err(io_error)
    }

    /// Cached catalog for a language, `None` when nothing is cached yet
    pub fn load_cached<P: AsRef<Path>>(work_dir: P, language: &str) -> Result<Option<Self>, CatalogError> {
        let path = Self::cache_path(work_dir, language);
        if !path.is_file() {
            return Ok(None);
        }
        debug!("Loading cached catalog from {:?}", path);
        Self::load_from_file(&path).map(Some)
    }

    /// Store the catalog in the language cache file and hide it
    pub fn save_cached<P: AsRef<Path>>(&self, work_dir: P, language: &str) -> Result<PathBuf, CatalogError> {
        let path = Self::cache_path(work_dir, language);
        self.save_to_file(&path)?;
        if let Err(e) = FileManager::hide_file(&path) {
            warn!("Could not hide catalog cache {:?}: {}", path, e);
        }
        Ok(path)
    }

    /// Cached catalog if present, otherwise fetch it from `source` and cache it
    pub fn load_or_fetch<P: AsRef<Path>>(
        work_dir: P,
        language: &str,
        source: &dyn CatalogSource,
    ) -> Result<Self, CatalogError> {
        let work_dir = work_dir.as_ref();
        if let Some(catalog) = Self::load_cached(work_dir, language)? {
            return Ok(catalog);
        }

        info!("Getting book numbers and names in {} language", language);
        let catalog = source.fetch(language)?;
        catalog.validate()?;
        for (number, name) in catalog.iter() {
            debug!("{} {}", number, name);
        }

        let path = catalog.save_cached(work_dir, language)?;
        debug!("Cached {} books at {:?}", catalog.len(), path);
        Ok(catalog)
    }
}

impl FromIterator<(String, String)> for BookCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        BookCatalog {
            books: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for BookCatalog {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
