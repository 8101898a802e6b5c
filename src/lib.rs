/*!
 * # cutup - chapter markers for publication videos
 *
 * A Rust library for reading the chapter markers embedded in Bible reading
 * videos and turning them into named verse segments.
 *
 * ## Features
 *
 * - Parse `"Gén. 1:1"` style chapter titles into padded chapter/verse pairs
 * - Build `"<book> <chapter> <verse>"` markers from ffprobe chapter lists
 * - Read book number, alias, language and chapter from video filenames
 * - Cache per-language book catalogs on disk
 * - Add or remove `"01 "` style numbering on book directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `citation`: Chapter/verse citation parsing
 * - `markers`: Marker normalization
 * - `video_name`: Video filename convention
 * - `catalog`: Book number to book name catalogs
 * - `numeration`: Numeric prefixes for book directories
 * - `probe`: ffprobe invocation
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod catalog;
pub mod citation;
pub mod errors;
pub mod file_utils;
pub mod markers;
pub mod numeration;
pub mod probe;
pub mod video_name;

// Re-export main types for easier usage
pub use app_config::Config;
pub use catalog::{BookCatalog, CatalogSource};
pub use citation::{parse_citation, CitationResult};
pub use markers::{build_markers, MarkerBatch, NormalizedMarker, RawChapterMarker};
pub use numeration::{add_numeration, remove_numeration};
pub use video_name::VideoInfo;
pub use errors::{AppError, CatalogError, CitationError, NumerationError, ProbeError, VideoNameError};
