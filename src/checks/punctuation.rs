//! Ending punctuation check.
//!
//! Classifies the trailing punctuation of the source text and each
//! translation into a small set of classes and flags mismatches. Strings
//! ending inside markup look past trailing closing tags, so
//! `<p>Continue?</p>` classifies as a question.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::TranslationUnit;
use crate::findings::{Finding, PunctuationFinding, UnitRef};

/// Trailing punctuation class of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    None,
    Period,
    Colon,
    Ellipsis,
    Question,
    Exclamation,
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ending::None => write!(f, "no punctuation"),
            Ending::Period => write!(f, "a full stop"),
            Ending::Colon => write!(f, "a colon"),
            Ending::Ellipsis => write!(f, "an ellipsis"),
            Ending::Question => write!(f, "a question mark"),
            Ending::Exclamation => write!(f, "an exclamation mark"),
        }
    }
}

static TRAILING_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</[A-Za-z][A-Za-z0-9]*\s*>\s*$").unwrap());

/// Classify the trailing punctuation of `text`.
///
/// Trailing whitespace and trailing closing markup tags are skipped before
/// the last character is inspected.
pub fn classify_ending(text: &str) -> Ending {
    let mut text = text.trim_end().to_string();
    loop {
        let stripped = TRAILING_TAG_REGEX.replace(&text, "").trim_end().to_string();
        if stripped == text {
            break;
        }
        text = stripped;
    }

    let Some(last) = text.chars().next_back() else {
        return Ending::None;
    };

    match last {
        '.' => {
            if text.ends_with("...") {
                Ending::Ellipsis
            } else {
                Ending::Period
            }
        }
        '\u{0589}' | '\u{06d4}' | '\u{3002}' => Ending::Period, // armenian, arabic, ideographic full stops
        '!' | '\u{00a1}' | '\u{01c3}' | '\u{203c}' | '\u{203d}' | '\u{2048}' | '\u{2049}'
        | '\u{2762}' | '\u{ff01}' => Ending::Exclamation,
        '?' | '\u{00bf}' | '\u{037e}' | '\u{061f}' | '\u{ff1f}' => Ending::Question,
        ':' | '\u{ff1a}' => Ending::Colon,
        '\u{2026}' => Ending::Ellipsis,
        _ => Ending::None,
    }
}

pub fn check(unit: &TranslationUnit, unit_ref: &UnitRef) -> Option<Finding> {
    if !unit.is_translated() {
        return None;
    }

    let source_ending = classify_ending(&unit.source);
    for translation in unit.translations.iter().filter(|t| !t.is_empty()) {
        let translation_ending = classify_ending(translation);
        if translation_ending != source_ending {
            return Some(
                PunctuationFinding {
                    unit: unit_ref.clone(),
                    source_ending,
                    translation_ending,
                }
                .into(),
            );
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn classifies_basic_endings() {
        assert_eq!(classify_ending("Done."), Ending::Period);
        assert_eq!(classify_ending("Open file:"), Ending::Colon);
        assert_eq!(classify_ending("Loading..."), Ending::Ellipsis);
        assert_eq!(classify_ending("Loading\u{2026}"), Ending::Ellipsis);
        assert_eq!(classify_ending("Sure?"), Ending::Question);
        assert_eq!(classify_ending("Stop!"), Ending::Exclamation);
        assert_eq!(classify_ending("Plain"), Ending::None);
        assert_eq!(classify_ending(""), Ending::None);
    }

    #[test]
    fn full_width_forms_share_the_class() {
        assert_eq!(classify_ending("\u{3053}\u{3002}"), Ending::Period);
        assert_eq!(classify_ending("\u{ff1f}"), Ending::Question);
        assert_eq!(classify_ending("\u{ff1a}"), Ending::Colon);
    }

    #[test]
    fn looks_past_trailing_closing_tags() {
        assert_eq!(classify_ending("<p>Continue?</p>"), Ending::Question);
        assert_eq!(classify_ending("<b>Save.</b></p>"), Ending::Period);
        assert_eq!(classify_ending("Done. </i>  "), Ending::Period);
    }

    #[test]
    fn trailing_whitespace_ignored() {
        assert_eq!(classify_ending("Done.  "), Ending::Period);
    }

    fn checked(source: &str, translation: &str) -> Option<Finding> {
        let mut unit = TranslationUnit::new("C", source);
        unit.translations = vec![translation.to_string()];
        let mut catalog = Catalog::new();
        let id = catalog.push(unit.clone());
        check(&unit, &UnitRef::from_catalog(&catalog, id))
    }

    #[test]
    fn mismatch_is_flagged() {
        let finding = checked("Save file?", "Gem fil.").unwrap();
        let Finding::Punctuation(finding) = finding else {
            panic!("expected punctuation finding");
        };
        assert_eq!(finding.source_ending, Ending::Question);
        assert_eq!(finding.translation_ending, Ending::Period);
    }

    #[test]
    fn matching_endings_pass() {
        assert_eq!(checked("Save file?", "Gem fil?"), None);
        assert_eq!(checked("Open", "Åbn"), None);
    }
}
