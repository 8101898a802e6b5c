/*!
 * Numeric prefixes for book directories.
 *
 * `add_numeration` renames `Génesis` to `01 Génesis` so a plain name sort
 * follows canonical book order; `remove_numeration` undoes it. Entries that
 * are not present are skipped, so both passes are idempotent and work on a
 * directory holding any subset of the catalog.
 *
 * A pass must not run concurrently with another pass on the same directory.
 */

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use log::{debug, info};
use crate::catalog::BookCatalog;
use crate::errors::NumerationError;

/// Prefixed name for a book entry, `"01 Génesis"`
pub fn numbered_name(book_number: &str, book_name: &str) -> String {
    format!("{} {}", book_number, book_name)
}

/// Rename every `<name>` entry in `dir` to `<number> <name>`.
///
/// Returns the number of entries renamed.
pub fn add_numeration<P: AsRef<Path>>(dir: P, catalog: &BookCatalog) -> Result<usize, NumerationError> {
    toggle(dir.as_ref(), catalog, |number, name| {
        (name.to_string(), numbered_name(number, name))
    })
}

/// Rename every `<number> <name>` entry in `dir` back to `<name>`.
///
/// Returns the number of entries renamed.
pub fn remove_numeration<P: AsRef<Path>>(dir: P, catalog: &BookCatalog) -> Result<usize, NumerationError> {
    toggle(dir.as_ref(), catalog, |number, name| {
        (numbered_name(number, name), name.to_string())
    })
}

fn toggle<F>(dir: &Path, catalog: &BookCatalog, names: F) -> Result<usize, NumerationError>
where
    F: Fn(&str, &str) -> (String, String),
{
    if !dir.is_dir() {
        return Err(NumerationError::NotADirectory(dir.to_path_buf()));
    }

    let mut renamed = 0;
    for (number, name) in catalog.iter() {
        let (from_name, to_name) = names(number, name);
        let from = dir.join(&from_name);
        let to = dir.join(&to_name);

        // symlink_metadata so a dangling link still counts as present
        if fs::symlink_metadata(&to).is_ok() && fs::symlink_metadata(&from).is_ok() {
            return Err(NumerationError::TargetExists { from, to });
        }

        match fs::rename(&from, &to) {
            Ok(()) => {
                info!("{} -> {}", from_name, to_name);
                renamed += 1;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Skipping {:?}, not found", from);
            }
            Err(source) => return Err(NumerationError::Rename { from, to, source }),
        }
    }

    Ok(renamed)
}
