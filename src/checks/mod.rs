//! Validation engine.
//!
//! Runs per-unit linters over a catalog and reports advisory findings. Every
//! check is pure and stateless; the caller decides when to re-run (on edit,
//! on load, on demand). Obsolete units are never validated.

pub mod accelerator;
pub mod phrase_suggestion;
pub mod place_marker;
pub mod punctuation;

use crate::cancel::CancelToken;
use crate::catalog::{Catalog, TranslationUnit, UnitId};
use crate::findings::{Finding, UnitRef};
use crate::phrasebook::PhraseBook;
use crate::plurals::PluralRule;

/// Which checks to run, plus the accelerator marker they share.
///
/// Each check is independently toggleable. Defaults to everything on with the
/// conventional `&` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSet {
    pub accelerators: bool,
    pub punctuation: bool,
    pub place_markers: bool,
    pub phrase_suggestions: bool,
    /// The designated accelerator marker character.
    pub accelerator_marker: char,
}

impl Default for CheckSet {
    fn default() -> Self {
        Self {
            accelerators: true,
            punctuation: true,
            place_markers: true,
            phrase_suggestions: true,
            accelerator_marker: '&',
        }
    }
}

impl CheckSet {
    /// A check set with every check disabled.
    pub fn none() -> Self {
        Self {
            accelerators: false,
            punctuation: false,
            place_markers: false,
            phrase_suggestions: false,
            accelerator_marker: '&',
        }
    }
}

/// Run the pure checks for one unit.
///
/// `rule` is the plural rule of the catalog's target language; it only
/// affects the category names attached to plural-marker findings. The
/// phrase-suggestion check needs external input and runs separately, see
/// [`validate_all`].
pub fn validate(
    id: UnitId,
    unit: &TranslationUnit,
    checks: &CheckSet,
    rule: PluralRule,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    if unit.is_obsolete() {
        return findings;
    }

    let unit_ref = UnitRef::new(id, unit);
    if checks.accelerators {
        findings.extend(accelerator::check(unit, &unit_ref, checks.accelerator_marker));
    }
    if checks.punctuation {
        findings.extend(punctuation::check(unit, &unit_ref));
    }
    if checks.place_markers {
        findings.extend(place_marker::check(unit, &unit_ref, rule));
    }
    findings
}

/// Validate every unit of a catalog.
///
/// When phrase books are given and the phrase-suggestion check is enabled,
/// each translated unit is compared against the targets the books suggest
/// for its source text, in book priority order. The iteration is
/// interruptible at unit boundaries.
pub fn validate_all(
    catalog: &Catalog,
    checks: &CheckSet,
    phrase_books: &[&PhraseBook],
    cancel: &CancelToken,
) -> Vec<Finding> {
    let rule = catalog
        .language
        .as_deref()
        .map(PluralRule::for_language_or_universal)
        .unwrap_or(PluralRule::Universal);

    let mut findings = Vec::new();
    for (id, unit) in catalog.iter() {
        if cancel.is_cancelled() {
            break;
        }
        if unit.is_obsolete() {
            continue;
        }
        findings.extend(validate(id, unit, checks, rule));

        if checks.phrase_suggestions && !phrase_books.is_empty() {
            let suggestions: Vec<String> = phrase_books
                .iter()
                .flat_map(|book| book.entries.iter())
                .filter(|entry| entry.source == unit.source)
                .map(|entry| entry.target.clone())
                .collect();
            let unit_ref = UnitRef::new(id, unit);
            findings.extend(phrase_suggestion::check(
                unit,
                &unit_ref,
                &suggestions,
                checks.accelerator_marker,
            ));
        }
    }
    findings
}
