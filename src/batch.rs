//! Phrase-book-driven batch translation.
//!
//! Fills untranslated units from phrase books searched in caller order: the
//! ordering of the books *is* the match priority, earlier books win ties.
//! Within a book the first entry whose source matches exactly wins; there is
//! no scoring across books. Units the books cannot answer are left untouched
//! and counted.

use crate::cancel::CancelToken;
use crate::catalog::{Catalog, Status};
use crate::phrasebook::PhraseBook;

/// Options controlling which units a batch run may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchOptions {
    /// Also retranslate units that already have non-empty translation text.
    pub retranslate_existing: bool,
    /// Also touch units already marked finished.
    pub include_finished: bool,
    /// Mark units finished when a match is applied. When false, a modified
    /// unit is reset to unfinished even if it was finished before.
    pub mark_finished_on_match: bool,
}

/// Counts from one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    /// Units that received a translation.
    pub translated: usize,
    /// Eligible units no phrase book could answer.
    pub unmatched: usize,
    /// True when the run was cancelled before reaching the last unit.
    pub cancelled: bool,
}

/// Fill eligible units from `phrase_books`, in catalog order.
///
/// Obsolete units are never eligible. Numerus units are matched on their
/// category-0 source text and a match fills every plural category with the
/// same target text; refining the plural forms is left to the translator.
/// Cancellation is checked at each unit boundary and never rolls back units
/// already translated.
pub fn batch_translate(
    catalog: &mut Catalog,
    phrase_books: &[&PhraseBook],
    options: &BatchOptions,
    cancel: &CancelToken,
) -> BatchReport {
    let mut report = BatchReport::default();

    let ids: Vec<_> = catalog.ids().collect();
    for id in ids {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }

        let unit = catalog.unit(id);
        if unit.is_obsolete() {
            continue;
        }
        if !options.include_finished && unit.status == Status::Finished {
            continue;
        }
        if !options.retranslate_existing && unit.is_translated() {
            continue;
        }

        let target = phrase_books
            .iter()
            .find_map(|book| book.lookup(&unit.source))
            .map(|entry| entry.target.clone());

        match target {
            Some(target) => {
                let unit = catalog.unit_mut(id);
                unit.fill_translations(&target);
                unit.status = if options.mark_finished_on_match {
                    Status::Finished
                } else {
                    Status::Unfinished
                };
                report.translated += 1;
            }
            None => report.unmatched += 1,
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TranslationUnit;
    use crate::phrasebook::PhraseEntry;

    fn book(entries: &[(&str, &str)]) -> PhraseBook {
        PhraseBook {
            language: None,
            entries: entries
                .iter()
                .map(|(source, target)| PhraseEntry {
                    source: source.to_string(),
                    target: target.to_string(),
                    definition: None,
                })
                .collect(),
        }
    }

    fn catalog(sources: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        for source in sources {
            catalog.push(TranslationUnit::new("C", *source));
        }
        catalog
    }

    #[test]
    fn fills_matching_units_in_order() {
        let mut catalog = catalog(&["Open", "Close", "Quit"]);
        let book = book(&[("Open", "Åbn"), ("Close", "Luk")]);
        let report = batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions::default(),
            &CancelToken::new(),
        );

        assert_eq!(report.translated, 2);
        assert_eq!(report.unmatched, 1);
        assert!(!report.cancelled);
        let units: Vec<_> = catalog.iter().map(|(_, u)| u).collect();
        assert_eq!(units[0].translations, vec!["Åbn"]);
        assert_eq!(units[1].translations, vec!["Luk"]);
        assert!(!units[2].is_translated());
    }

    #[test]
    fn earlier_books_win_ties() {
        let mut catalog = catalog(&["Open"]);
        let first = book(&[("Open", "Åbn")]);
        let second = book(&[("Open", "Öffnen")]);
        batch_translate(
            &mut catalog,
            &[&first, &second],
            &BatchOptions::default(),
            &CancelToken::new(),
        );
        let (_, unit) = catalog.iter().next().unwrap();
        assert_eq!(unit.translations, vec!["Åbn"]);
    }

    #[test]
    fn first_entry_within_a_book_wins() {
        let mut catalog = catalog(&["Open"]);
        let book = book(&[("Open", "first"), ("Open", "second")]);
        batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions::default(),
            &CancelToken::new(),
        );
        let (_, unit) = catalog.iter().next().unwrap();
        assert_eq!(unit.translations, vec!["first"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut catalog = catalog(&["open"]);
        let book = book(&[("Open", "Åbn")]);
        let report = batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions::default(),
            &CancelToken::new(),
        );
        assert_eq!(report.translated, 0);
        assert_eq!(report.unmatched, 1);
    }

    #[test]
    fn existing_translations_are_kept_by_default() {
        let mut catalog = Catalog::new();
        let mut unit = TranslationUnit::new("C", "Open");
        unit.translations = vec!["manual".to_string()];
        catalog.push(unit);
        let book = book(&[("Open", "Åbn")]);

        let report = batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions::default(),
            &CancelToken::new(),
        );
        assert_eq!(report.translated, 0);
        let (_, unit) = catalog.iter().next().unwrap();
        assert_eq!(unit.translations, vec!["manual"]);

        let report = batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions {
                retranslate_existing: true,
                ..BatchOptions::default()
            },
            &CancelToken::new(),
        );
        assert_eq!(report.translated, 1);
        let (_, unit) = catalog.iter().next().unwrap();
        assert_eq!(unit.translations, vec!["Åbn"]);
    }

    #[test]
    fn finished_units_are_skipped_unless_included() {
        let mut catalog = Catalog::new();
        let mut unit = TranslationUnit::new("C", "Open");
        unit.status = Status::Finished;
        catalog.push(unit);
        let book = book(&[("Open", "Åbn")]);

        let report = batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions::default(),
            &CancelToken::new(),
        );
        assert_eq!(report.translated, 0);
        assert_eq!(report.unmatched, 0);

        let report = batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions {
                include_finished: true,
                ..BatchOptions::default()
            },
            &CancelToken::new(),
        );
        assert_eq!(report.translated, 1);
    }

    #[test]
    fn touched_finished_unit_is_reset_to_unfinished() {
        let mut catalog = Catalog::new();
        let mut unit = TranslationUnit::new("C", "Open");
        unit.status = Status::Finished;
        catalog.push(unit);
        let book = book(&[("Open", "Åbn")]);

        batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions {
                include_finished: true,
                retranslate_existing: true,
                mark_finished_on_match: false,
            },
            &CancelToken::new(),
        );
        let (_, unit) = catalog.iter().next().unwrap();
        assert_eq!(unit.status, Status::Unfinished);
    }

    #[test]
    fn mark_finished_on_match_promotes_units() {
        let mut catalog = catalog(&["Open"]);
        let book = book(&[("Open", "Åbn")]);
        batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions {
                mark_finished_on_match: true,
                ..BatchOptions::default()
            },
            &CancelToken::new(),
        );
        let (_, unit) = catalog.iter().next().unwrap();
        assert_eq!(unit.status, Status::Finished);
    }

    #[test]
    fn numerus_match_fills_every_category() {
        let mut catalog = Catalog::new();
        let mut unit = TranslationUnit::new("C", "%n file(s)");
        unit.numerus = true;
        unit.translations = vec![String::new(), String::new(), String::new()];
        catalog.push(unit);
        let book = book(&[("%n file(s)", "%n plik(ów)")]);

        batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions::default(),
            &CancelToken::new(),
        );
        let (_, unit) = catalog.iter().next().unwrap();
        assert_eq!(unit.translations.len(), 3);
        assert!(unit.translations.iter().all(|t| t == "%n plik(ów)"));
    }

    #[test]
    fn obsolete_units_are_never_touched() {
        let mut catalog = Catalog::new();
        let mut unit = TranslationUnit::new("C", "Open");
        unit.status = Status::Obsolete;
        catalog.push(unit);
        let book = book(&[("Open", "Åbn")]);

        let report = batch_translate(
            &mut catalog,
            &[&book],
            &BatchOptions {
                include_finished: true,
                retranslate_existing: true,
                ..BatchOptions::default()
            },
            &CancelToken::new(),
        );
        assert_eq!(report.translated, 0);
        assert_eq!(report.unmatched, 0);
    }

    #[test]
    fn second_identical_run_translates_nothing() {
        let mut catalog = catalog(&["Open", "Quit"]);
        let book = book(&[("Open", "Åbn")]);
        let options = BatchOptions::default();

        let first = batch_translate(&mut catalog, &[&book], &options, &CancelToken::new());
        assert_eq!(first.translated, 1);
        assert_eq!(first.unmatched, 1);

        let second = batch_translate(&mut catalog, &[&book], &options, &CancelToken::new());
        assert_eq!(second.translated, 0);
        assert_eq!(second.unmatched, first.unmatched);
    }

    #[test]
    fn cancellation_keeps_completed_units() {
        let mut catalog = catalog(&["Open", "Close"]);
        let book = book(&[("Open", "Åbn"), ("Close", "Luk")]);
        let cancel = CancelToken::new();
        cancel.cancel();

        let report = batch_translate(&mut catalog, &[&book], &BatchOptions::default(), &cancel);
        assert!(report.cancelled);
        assert_eq!(report.translated, 0);
        // nothing was rolled back, nothing was applied after the cancel point
        assert!(catalog.iter().all(|(_, u)| !u.is_translated()));
    }
}
