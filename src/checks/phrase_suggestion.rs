//! Phrase suggestion check.
//!
//! Given the phrase-book suggestions that were offered for a unit, flags a
//! translation that diverges from every one of them. Comparison is
//! normalized: case-insensitive, accelerator markers stripped, whitespace
//! simplified. Advisory only; a translator is free to ignore suggestions.

use crate::catalog::TranslationUnit;
use crate::findings::{Finding, IgnoredPhraseSuggestionFinding, UnitRef};
use crate::utils::{simplified, strip_accelerators};

/// Normalize text for loose phrase comparison.
pub fn friendly_string(text: &str, marker: char) -> String {
    simplified(&strip_accelerators(text, marker)).to_lowercase()
}

pub fn check(
    unit: &TranslationUnit,
    unit_ref: &UnitRef,
    suggestions: &[String],
    marker: char,
) -> Option<Finding> {
    if !unit.is_translated() || suggestions.is_empty() {
        return None;
    }

    let translation = friendly_string(&unit.translations[0], marker);
    let used = suggestions
        .iter()
        .map(|s| friendly_string(s, marker))
        .any(|s| !s.is_empty() && translation.contains(&s));
    if used {
        return None;
    }

    Some(
        IgnoredPhraseSuggestionFinding {
            unit: unit_ref.clone(),
            suggestions: suggestions.to_vec(),
        }
        .into(),
    )
}
