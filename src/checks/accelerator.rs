//! Accelerator marker check.
//!
//! Compares the number of accelerator markers in the source text against each
//! translation. Doubled markers (`&&`) are a literal marker character and XML
//! entities (`&nbsp;`) are not accelerators; neither is counted.

use crate::catalog::TranslationUnit;
use crate::findings::{
    Finding, MissingAcceleratorFinding, SuperfluousAcceleratorFinding, UnitRef,
};

/// Count accelerator markers in `text`.
///
/// A marker counts when it is followed by a printable, non-space character
/// that is not the marker itself and does not start an `&entity;` sequence.
pub fn count_accelerators(text: &str, marker: char) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != marker {
            i += 1;
            continue;
        }
        // marker at end of string
        let Some(&next) = chars.get(i + 1) else {
            break;
        };
        if next == marker {
            // doubled marker, a literal character
            i += 2;
            continue;
        }
        if next.is_whitespace() || next.is_control() {
            i += 1;
            continue;
        }
        // something like &nbsp; is an entity, not an accelerator
        if marker == '&' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_alphabetic() {
                j += 1;
            }
            if j > i + 1 && chars.get(j) == Some(&';') {
                i = j + 1;
                continue;
            }
        }
        count += 1;
        i += 2;
    }

    count
}

pub fn check(unit: &TranslationUnit, unit_ref: &UnitRef, marker: char) -> Option<Finding> {
    if !unit.is_translated() {
        return None;
    }

    let source_count = count_accelerators(&unit.source, marker);
    for translation in unit.translations.iter().filter(|t| !t.is_empty()) {
        let translation_count = count_accelerators(translation, marker);
        if translation_count > source_count {
            return Some(
                SuperfluousAcceleratorFinding {
                    unit: unit_ref.clone(),
                }
                .into(),
            );
        }
        if translation_count < source_count {
            return Some(
                MissingAcceleratorFinding {
                    unit: unit_ref.clone(),
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

    fn unit(source: &str, translation: &str) -> (TranslationUnit, UnitRef) {
        let mut unit = TranslationUnit::new("MainWindow", source);
        unit.translations = vec![translation.to_string()];
        let mut catalog = Catalog::new();
        let id = catalog.push(unit.clone());
        let unit_ref = UnitRef::from_catalog(&catalog, id);
        (unit, unit_ref)
    }

    #[test]
    fn counts_plain_markers() {
        assert_eq!(count_accelerators("&Open", '&'), 1);
        assert_eq!(count_accelerators("Open", '&'), 0);
        assert_eq!(count_accelerators("&A&brir", '&'), 2);
    }

    #[test]
    fn doubled_marker_is_literal() {
        assert_eq!(count_accelerators("Fish && Chips", '&'), 0);
        assert_eq!(count_accelerators("&&&Open", '&'), 1);
    }

    #[test]
    fn entities_are_not_accelerators() {
        assert_eq!(count_accelerators("a&nbsp;b", '&'), 0);
        assert_eq!(count_accelerators("&amp;", '&'), 0);
    }

    #[test]
    fn marker_before_space_or_end_does_not_count() {
        assert_eq!(count_accelerators("Tom & Jerry", '&'), 0);
        assert_eq!(count_accelerators("trailing&", '&'), 0);
    }

    #[test]
    fn missing_accelerator_flagged() {
        let (unit, unit_ref) = unit("&Open", "Abrir");
        let finding = check(&unit, &unit_ref, '&').unwrap();
        assert!(matches!(finding, Finding::MissingAccelerator(_)));
    }

    #[test]
    fn superfluous_accelerator_flagged() {
        let (unit, unit_ref) = unit("&Open", "&A&brir");
        let finding = check(&unit, &unit_ref, '&').unwrap();
        assert!(matches!(finding, Finding::SuperfluousAccelerator(_)));
    }

    #[test]
    fn matching_accelerators_pass() {
        let (unit, unit_ref) = unit("&Open", "&Abrir");
        assert_eq!(check(&unit, &unit_ref, '&'), None);
    }

    #[test]
    fn untranslated_unit_is_skipped() {
        let (unit, unit_ref) = unit("&Open", "");
        assert_eq!(check(&unit, &unit_ref, '&'), None);
    }
}
