//! Place marker check.
//!
//! Positional markers (`%1`, `%2`, ...) and the `%n` count marker must agree
//! between the source text and every non-empty translation. For numerus
//! units, `%n` is required outright in every plural form, not merely
//! consistent; its absence is reported per category so the translator knows
//! which form to fix.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::TranslationUnit;
use crate::findings::{Finding, MissingPluralMarkerFinding, PlaceMarkerFinding, UnitRef};
use crate::plurals::PluralRule;

static MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(?:[0-9]+|n)").unwrap());

/// Extract the set of place markers used in `text`.
pub fn extract_markers(text: &str) -> BTreeSet<String> {
    MARKER_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn check(unit: &TranslationUnit, unit_ref: &UnitRef, rule: PluralRule) -> Vec<Finding> {
    if !unit.is_translated() {
        return Vec::new();
    }

    let mut findings = Vec::new();

    let mut source_markers = extract_markers(&unit.source);
    if unit.numerus {
        // %n is covered by the dedicated per-category check below
        source_markers.remove("%n");
    }

    for translation in unit.translations.iter().filter(|t| !t.is_empty()) {
        let mut translation_markers = extract_markers(translation);
        if unit.numerus {
            translation_markers.remove("%n");
        }
        if translation_markers != source_markers {
            let missing = source_markers
                .difference(&translation_markers)
                .cloned()
                .collect();
            let superfluous = translation_markers
                .difference(&source_markers)
                .cloned()
                .collect();
            findings.push(
                PlaceMarkerFinding {
                    unit: unit_ref.clone(),
                    missing,
                    superfluous,
                }
                .into(),
            );
            break;
        }
    }

    if unit.numerus {
        let names = rule.category_names();
        for (category, translation) in unit.translations.iter().enumerate() {
            if translation.is_empty() || translation.contains("%n") {
                continue;
            }
            findings.push(
                MissingPluralMarkerFinding {
                    unit: unit_ref.clone(),
                    category,
                    category_name: names
                        .get(category)
                        .copied()
                        .unwrap_or("Extra Form")
                        .to_string(),
                }
                .into(),
            );
        }
    }

    findings
}
