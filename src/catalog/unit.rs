//! Translation unit types.
//!
//! A [`TranslationUnit`] is one message to translate: its context, source
//! text, auxiliary comments, provenance locations, and one translation text
//! per plural category of the target language.

use std::collections::BTreeMap;

/// Lifecycle state of a translation unit.
///
/// `Obsolete` units are retained for possible resurrection but excluded from
/// release output and from validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Unfinished,
    Finished,
    Obsolete,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Unfinished => write!(f, "unfinished"),
            Status::Finished => write!(f, "finished"),
            Status::Obsolete => write!(f, "obsolete"),
        }
    }
}

/// A `(file, line)` provenance record.
///
/// `line` is `None` for references without line granularity (strings sourced
/// from `.ui` form files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: Option<u32>,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: impl Into<Option<u32>>) -> Self {
        Self {
            file: file.into(),
            line: line.into(),
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file, line),
            None => write!(f, "{}", self.file),
        }
    }
}

/// One message to translate.
///
/// `translations` holds one entry per plural category of the target language,
/// indexed by category; its length is 1 when `numerus` is false.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationUnit {
    /// Logical grouping, typically a class or component name.
    pub context: String,
    /// Original-language text. Immutable once assigned.
    pub source: String,
    /// Developer-supplied disambiguation (the `<comment>` element). Part of
    /// the unit's identity.
    pub comment: Option<String>,
    /// Developer hint for translators (the `<extracomment>` element).
    pub extra_comment: Option<String>,
    /// Free-form note left by the translator.
    pub translator_comment: Option<String>,
    /// Previous source text, kept after a source change.
    pub old_source: Option<String>,
    /// Previous disambiguation comment.
    pub old_comment: Option<String>,
    /// Explicit message id (the `id` attribute), carried as auxiliary data.
    pub id: Option<String>,
    /// Whether this unit has language-dependent plural forms.
    pub numerus: bool,
    /// Translation text per plural category.
    pub translations: Vec<String>,
    pub status: Status,
    /// Provenance records, in document order.
    pub locations: Vec<SourceLocation>,
    /// Tool-internal `<userdata>` payload, round-tripped verbatim.
    pub userdata: Option<String>,
    /// Unknown `extra-*` elements, round-tripped verbatim.
    pub extras: BTreeMap<String, String>,
}

impl TranslationUnit {
    pub fn new(context: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            translations: vec![String::new()],
            ..Self::default()
        }
    }

    pub fn is_obsolete(&self) -> bool {
        self.status == Status::Obsolete
    }

    /// True if at least one plural category has non-empty translation text.
    pub fn is_translated(&self) -> bool {
        self.translations.iter().any(|t| !t.is_empty())
    }

    /// The translation for a plural category, if present.
    pub fn translation(&self, category: usize) -> Option<&str> {
        self.translations.get(category).map(String::as_str)
    }

    /// Set every plural category to the same text.
    ///
    /// Used by batch translation when a non-plural phrase entry fills a
    /// numerus unit.
    pub fn fill_translations(&mut self, text: &str) {
        for t in &mut self.translations {
            *t = text.to_string();
        }
    }

    /// Grow or shrink `translations` to `count` entries.
    ///
    /// New entries are empty. Never drops non-empty trailing entries; returns
    /// false when shrinking would lose text, leaving the excess in place.
    pub fn resize_translations(&mut self, count: usize) -> bool {
        let count = count.max(1);
        if self.translations.len() < count {
            self.translations.resize(count, String::new());
            return true;
        }
        while self.translations.len() > count {
            if self.translations.last().is_some_and(|t| t.is_empty()) {
                self.translations.pop();
            } else {
                return false;
            }
        }
        true
    }
}
