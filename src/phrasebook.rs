//! Phrase books.
//!
//! A phrase book is an auxiliary, catalog-independent glossary of
//! source→target pairs loaded from a `.qph` file, used as read-only input to
//! batch translation and to the phrase-suggestion check. Once loaded it is
//! immutable and may be shared across catalogs and batch runs.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

use crate::ts::{byte_offset_to_position, build_line_index};

/// One glossary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseEntry {
    pub source: String,
    pub target: String,
    /// Free-form usage note, not consumed by matching.
    pub definition: Option<String>,
}

/// An ordered, read-only collection of phrase entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhraseBook {
    pub language: Option<String>,
    pub entries: Vec<PhraseEntry>,
}

#[derive(Error, Debug)]
pub enum PhraseBookError {
    #[error("failed to read phrase book: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed phrase book at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("unexpected element <{element}> at line {line}")]
    UnknownElement { element: String, line: usize },
}

impl PhraseBook {
    /// Load a phrase book from a `.qph` file.
    ///
    /// A malformed file is rejected as a whole; batch translation fails fast
    /// before touching any catalog.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PhraseBookError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(input: &str) -> Result<Self, PhraseBookError> {
        let line_index = build_line_index(input);
        let position = |offset: usize| byte_offset_to_position(&line_index, offset);

        let mut reader = Reader::from_reader(input.as_bytes());
        reader.config_mut().trim_text(true);

        let mut book = PhraseBook::default();
        let mut in_qph = false;
        let mut depth = 0usize;
        let mut entry: Option<PhraseEntry> = None;
        // element whose text content we are inside, if any
        let mut field: Option<String> = None;
        let mut buf = Vec::new();

        loop {
            let offset = reader.buffer_position() as usize;
            match reader.read_event_into(&mut buf) {
                Ok(Event::Decl(_)) | Ok(Event::DocType(_)) | Ok(Event::Comment(_)) => {}
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    depth += 1;
                    match name.as_str() {
                        "QPH" if !in_qph => {
                            in_qph = true;
                            for attr in e.attributes() {
                                let attr = attr.map_err(|err| syntax(position(offset), err))?;
                                if attr.key.as_ref() == b"language" {
                                    let value = attr
                                        .unescape_value()
                                        .map_err(|err| syntax(position(offset), err))?;
                                    book.language = Some(value.to_string());
                                }
                            }
                        }
                        "phrase" if in_qph && entry.is_none() => {
                            entry = Some(PhraseEntry {
                                source: String::new(),
                                target: String::new(),
                                definition: None,
                            });
                        }
                        "source" | "target" | "definition" if entry.is_some() => {
                            field = Some(name);
                        }
                        _ => {
                            let (line, _) = position(offset);
                            return Err(PhraseBookError::UnknownElement {
                                element: name,
                                line,
                            });
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| syntax(position(offset), err))?
                        .to_string();
                    if let (Some(entry), Some(field)) = (entry.as_mut(), field.as_deref()) {
                        match field {
                            "source" => entry.source.push_str(&text),
                            "target" => entry.target.push_str(&text),
                            "definition" => {
                                entry.definition.get_or_insert_with(String::new).push_str(&text)
                            }
                            _ => unreachable!(),
                        }
                    }
                }
                Ok(Event::End(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    depth = depth.saturating_sub(1);
                    match name.as_str() {
                        "phrase" => {
                            if let Some(entry) = entry.take() {
                                book.entries.push(entry);
                            }
                        }
                        "source" | "target" | "definition" => field = None,
                        _ => {}
                    }
                }
                Ok(Event::Empty(e)) => {
                    // e.g. <definition/> - field stays empty
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    if name == "definition" {
                        if let Some(entry) = entry.as_mut() {
                            entry.definition = Some(String::new());
                        }
                    }
                }
                Ok(Event::Eof) => {
                    if depth > 0 {
                        return Err(syntax(position(offset), "unexpected end of file"));
                    }
                    break;
                }
                Ok(_) => {}
                Err(err) => return Err(syntax(position(offset), err)),
            }
            buf.clear();
        }

        Ok(book)
    }

    /// First entry whose source matches exactly (case-sensitive).
    pub fn lookup(&self, source: &str) -> Option<&PhraseEntry> {
        self.entries.iter().find(|entry| entry.source == source)
    }
}

fn syntax((line, column): (usize, usize), err: impl std::fmt::Display) -> PhraseBookError {
    PhraseBookError::Syntax {
        line,
        column,
        message: err.to_string(),
    }
}
