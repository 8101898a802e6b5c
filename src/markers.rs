use serde::{Deserialize, Serialize};
use crate::citation::{parse_citation, CitationResult};
use crate::errors::CitationError;

// @module: Chapter marker normalization

// @struct: Chapter as reported by the probing tool
#[derive(Debug, Clone, PartialEq)]
pub struct RawChapterMarker {
    // @field: Chapter title tag
    pub title: String,

    // @field: Start in seconds
    pub start_time: f64,

    // @field: End in seconds
    pub end_time: f64,
}

impl RawChapterMarker {
    pub fn new(title: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        RawChapterMarker {
            title: title.into(),
            start_time,
            end_time,
        }
    }
}

/// Named time range ready for export or embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMarker {
    /// Media file the marker was probed from
    #[serde(rename = "parent")]
    pub parent_file: String,

    /// `"<book> <chapter> <verse>"` or `"<book> <verse>"`
    pub title: String,

    /// Two digit book number
    #[serde(rename = "booknum")]
    pub book_number: String,

    /// Start in seconds, as probed
    #[serde(rename = "start")]
    pub start_time: f64,

    /// End in seconds, as probed
    #[serde(rename = "end")]
    pub end_time: f64,
}

impl NormalizedMarker {
    // @returns: Marker length in seconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Markers kept from one file plus how many titles had no citation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerBatch {
    pub markers: Vec<NormalizedMarker>,
    pub dropped: usize,
}

impl MarkerBatch {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    // @merges: Another batch onto the end of this one
    pub fn extend(&mut self, other: MarkerBatch) {
        self.markers.extend(other.markers);
        self.dropped += other.dropped;
    }
}

/// Build normalized markers, dropping every title without a citation.
///
/// Output keeps the input order. Times are copied unchanged.
pub fn build_markers(
    parent_file: &str,
    book_display_name: &str,
    book_number: &str,
    raw_markers: &[RawChapterMarker],
) -> Result<Vec<NormalizedMarker>, CitationError> {
    Ok(build_marker_batch(parent_file, book_display_name, book_number, raw_markers)?.markers)
}

/// Same as [`build_markers`] but also reports the number of dropped titles
pub fn build_marker_batch(
    parent_file: &str,
    book_display_name: &str,
    book_number: &str,
    raw_markers: &[RawChapterMarker],
) -> Result<MarkerBatch, CitationError> {
    let mut batch = MarkerBatch::default();

    for raw in raw_markers {
        let title = match parse_citation(raw.title.trim_end())? {
            CitationResult::NoMatch => {
                batch.dropped += 1;
                continue;
            }
            citation => format!("{} {}", book_display_name, citation),
        };

        batch.markers.push(NormalizedMarker {
            parent_file: parent_file.to_string(),
            title,
            book_number: book_number.to_string(),
            start_time: raw.start_time,
            end_time: raw.end_time,
        });
    }

    Ok(batch)
}
