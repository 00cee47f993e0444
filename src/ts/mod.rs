//! The `.ts` translation catalog codec.
//!
//! Parses and serializes the XML catalog format, including the delta-encoded
//! `<location>` scheme: within a file using relative locations, successive
//! records carry a signed line offset against a per-file cursor instead of an
//! absolute line, and omit the filename while it is unchanged. The writer
//! maintains the same cursors the reader reconstructs, so a parse/serialize
//! cycle preserves the catalog exactly.

mod reader;
mod writer;

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::catalog::Catalog;

pub use writer::serialize;

/// A successfully parsed catalog plus the recoverable problems the codec
/// flagged along the way.
#[derive(Debug)]
pub struct ParseResult {
    pub catalog: Catalog,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("unexpected element <{element}> at line {line}")]
    UnknownElement { element: String, line: usize },
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),
}

/// A recoverable problem found while parsing. The catalog is still usable;
/// these are surfaced to the user, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A `numerus="yes"` message whose form count does not match what the
    /// target language requires. The forms were padded, or truncated where
    /// only empty forms had to go; non-empty text is never dropped.
    PluralCountMismatch {
        context: String,
        source: String,
        expected: usize,
        found: usize,
    },
    /// The catalog names a language the plural resolver does not know; the
    /// single-form universal rule is in effect.
    UnknownLanguage { language: String },
    /// Two units share `(context, source, comment)`.
    Duplicate { context: String, source: String },
    /// Two units share `(context, source, comment)` but disagree on
    /// `numerus`.
    NumerusConflict { context: String, source: String },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::PluralCountMismatch {
                context,
                source,
                expected,
                found,
            } => write!(
                f,
                "message '{source}' in context '{context}' has {found} plural form(s), \
                 the target language requires {expected}"
            ),
            ParseWarning::UnknownLanguage { language } => write!(
                f,
                "unknown target language '{language}', using the universal plural form"
            ),
            ParseWarning::Duplicate { context, source } => write!(
                f,
                "duplicate message '{source}' in context '{context}'"
            ),
            ParseWarning::NumerusConflict { context, source } => write!(
                f,
                "message '{source}' in context '{context}' appears both with and without \
                 plural forms"
            ),
        }
    }
}

/// Parse a catalog from its XML text.
pub fn parse(input: &str) -> Result<ParseResult, ParseError> {
    reader::parse(input)
}

/// Load a catalog from a file.
pub fn load(path: impl AsRef<Path>) -> Result<ParseResult, ParseError> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Save a catalog, re-deriving the location encoding it was loaded with.
pub fn save(catalog: &Catalog, path: impl AsRef<Path>) -> io::Result<()> {
    fs::write(path, serialize(catalog))
}

/// Build an index of line start byte offsets for error reporting.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub(crate) fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Translate a byte offset to a 1-based `(line, column)` pair.
pub(crate) fn byte_offset_to_position(line_index: &[usize], offset: usize) -> (usize, usize) {
    let line = match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    };
    let line_start = line_index[line - 1];
    (line, offset.saturating_sub(line_start) + 1)
}
