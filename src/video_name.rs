use std::path::Path;
use crate::errors::VideoNameError;

// @module: Publication video filename convention
//
// Names look like `nwt_01_Ge_S_03_r720P.mp4`: publication, book number,
// book alias, language code, chapter, then anything else.

/// Positional fields of a publication video filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoField {
    BookNumber,
    BookAlias,
    Language,
    Chapter,
}

impl VideoField {
    // @returns: Index in the underscore split
    pub fn index(self) -> usize {
        match self {
            Self::BookNumber => 1,
            Self::BookAlias => 2,
            Self::Language => 3,
            Self::Chapter => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::BookNumber => "book number",
            Self::BookAlias => "book alias",
            Self::Language => "language",
            Self::Chapter => "chapter",
        }
    }
}

/// Fields extracted from a publication video filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub book_number: String,
    pub book_alias: String,
    pub language: String,
    pub chapter: String,
}

impl VideoInfo {
    /// Parse the fields from the file stem of `path`.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, VideoNameError> {
        let path = path.as_ref();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| VideoNameError::NoFileName(path.to_path_buf()))?;

        Self::parse_stem(&stem)
    }

    /// Parse the fields from a name that has no extension.
    pub fn parse_stem(stem: &str) -> Result<Self, VideoNameError> {
        let fields: Vec<&str> = stem.split('_').collect();
        let get = |field: VideoField| -> Result<String, VideoNameError> {
            fields
                .get(field.index())
                .filter(|value| !value.is_empty())
                .map(|value| value.to_string())
                .ok_or_else(|| VideoNameError::MissingField {
                    field: field.name(),
                    name: stem.to_string(),
                })
        };

        let book_number = get(VideoField::BookNumber)?;
        if !book_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(VideoNameError::InvalidBookNumber {
                name: stem.to_string(),
                value: book_number,
            });
        }

        Ok(VideoInfo {
            book_number,
            book_alias: get(VideoField::BookAlias)?,
            language: get(VideoField::Language)?,
            chapter: get(VideoField::Chapter)?,
        })
    }

    pub fn field(&self, field: VideoField) -> &str {
        match field {
            VideoField::BookNumber => &self.book_number,
            VideoField::BookAlias => &self.book_alias,
            VideoField::Language => &self.language,
            VideoField::Chapter => &self.chapter,
        }
    }
}
