use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use crate::errors::CitationError;

// @module: Chapter/verse citation parsing for chapter marker titles

// @const: Trailing "chapter:verse" or bare "verse" at the very end of a title
static CITATION_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+:)?\d+$").unwrap()
});

// @const: A single Unicode decimal digit (general category Nd)
static DECIMAL_DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d$").unwrap()
});

/// Result of matching a chapter marker title against the citation pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationResult {
    /// Title ends with `chapter:verse`
    Matched {
        chapter: String,
        verse: String,
    },

    /// Title ends with a bare number
    MatchedVerseOnly {
        verse: String,
    },

    /// Title has no trailing citation (book names, intros, footnote markers)
    NoMatch,
}

impl CitationResult {
    // @checks: Any of the matched shapes
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }

    /// Padded chapter, only present for `chapter:verse` citations
    pub fn chapter(&self) -> Option<&str> {
        match self {
            Self::Matched { chapter, .. } => Some(chapter),
            _ => None,
        }
    }

    /// Padded verse for either matched shape
    pub fn verse(&self) -> Option<&str> {
        match self {
            Self::Matched { verse, .. } | Self::MatchedVerseOnly { verse } => Some(verse),
            Self::NoMatch => None,
        }
    }
}

/// Space separated `"CC VV"` or `"VV"`, empty for `NoMatch`
impl fmt::Display for CitationResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Matched { chapter, verse } => write!(f, "{} {}", chapter, verse),
            Self::MatchedVerseOnly { verse } => write!(f, "{}", verse),
            Self::NoMatch => Ok(()),
        }
    }
}

/// Parse the trailing citation of a chapter marker title.
///
/// Trailing whitespace and carriage returns are ignored. The last
/// `chapter:verse` (or bare verse) run at the end of the title is taken;
/// anything after it, such as a "Nota" annotation, means there is no match.
pub fn parse_citation(title: &str) -> Result<CitationResult, CitationError> {
    let title = title.trim_end();

    let Some(found) = CITATION_SUFFIX_REGEX.find(title) else {
        return Ok(CitationResult::NoMatch);
    };

    let suffix = found.as_str();
    match suffix.split_once(':') {
        Some((chapter, verse)) => Ok(CitationResult::Matched {
            chapter: pad_number(title, chapter)?,
            verse: pad_number(title, verse)?,
        }),
        None => Ok(CitationResult::MatchedVerseOnly {
            verse: pad_number(title, suffix)?,
        }),
    }
}

// @returns: Digits re-rendered in ASCII with a minimum width of two
fn pad_number(title: &str, digits: &str) -> Result<String, CitationError> {
    let mut ascii = String::with_capacity(digits.len());
    for c in digits.chars() {
        let value = digit_value(c).ok_or_else(|| CitationError::InvalidNumber {
            title: title.to_string(),
            digits: digits.to_string(),
        })?;
        ascii.push(char::from(b'0' + value as u8));
    }

    let significant = ascii.trim_start_matches('0');
    let significant = if significant.is_empty() { "0" } else { significant };
    Ok(format!("{:0>2}", significant))
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0; 4];
    DECIMAL_DIGIT_REGEX.is_match(c.encode_utf8(&mut buf))
}

/// Numeric value of a decimal digit from any script.
///
/// Nd digits are laid out as contiguous runs of ten code points from zero
/// to nine, so the value is the offset from the start of the run modulo ten.
fn digit_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut run_start = c as u32;
    while let Some(previous) = run_start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(previous) {
            break;
        }
        run_start -= 1;
    }
    Some((c as u32 - run_start) % 10)
}
