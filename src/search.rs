//! Scoped search and replace across catalog fields.
//!
//! Searching walks units in catalog order over the selected fields. The
//! stepping cursor wraps: after the last match the next step returns the
//! first match again and says so. Replacement only ever rewrites translation
//! text; matching source texts or comments merely selects which units are
//! eligible, since translations are the only field editable in place.

use regex::{NoExpand, Regex};
use thiserror::Error;

use crate::cancel::CancelToken;
use crate::catalog::{Catalog, TranslationUnit, UnitId};
use crate::utils::strip_accelerators;

/// Which catalog fields a search inspects. At least one must be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchScope {
    pub source_text: bool,
    pub translations: bool,
    pub comments: bool,
}

impl Default for SearchScope {
    fn default() -> Self {
        Self {
            source_text: true,
            translations: true,
            comments: true,
        }
    }
}

impl SearchScope {
    pub fn is_empty(&self) -> bool {
        !self.source_text && !self.translations && !self.comments
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub match_case: bool,
    /// Match whole words only (word-boundary aware, not substring).
    pub whole_word: bool,
    /// Strip the accelerator marker from the haystack before comparing.
    pub ignore_accelerators: bool,
    pub skip_obsolete: bool,
    pub accelerator_marker: char,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            match_case: false,
            whole_word: false,
            ignore_accelerators: true,
            skip_obsolete: true,
            accelerator_marker: '&',
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("search scope must select at least one field")]
    InvalidScope,
    #[error("search text must not be empty")]
    EmptyQuery,
}

/// Counts from one replace-all run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaceReport {
    /// Units the query matched within the scope.
    pub matched: usize,
    /// Units whose translation text actually changed.
    pub replaced: usize,
    /// Matched units with no translation to replace into.
    pub skipped: usize,
    pub cancelled: bool,
}

/// Compiled query, shared by find and replace.
struct Matcher {
    regex: Regex,
    strip_marker: Option<char>,
}

impl Matcher {
    fn new(query: &str, options: &SearchOptions) -> Result<Self, SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let mut pattern = regex::escape(query);
        if options.whole_word {
            pattern = format!(r"\b{pattern}\b");
        }
        if !options.match_case {
            pattern = format!("(?i){pattern}");
        }
        // the pattern is an escaped literal plus fixed affixes, it always compiles
        let regex = Regex::new(&pattern).expect("escaped search pattern is valid");
        Ok(Self {
            regex,
            strip_marker: options
                .ignore_accelerators
                .then_some(options.accelerator_marker),
        })
    }

    fn matches(&self, text: &str) -> bool {
        match self.strip_marker {
            Some(marker) if text.contains(marker) => {
                self.regex.is_match(&strip_accelerators(text, marker))
            }
            _ => self.regex.is_match(text),
        }
    }

    fn unit_matches(&self, unit: &TranslationUnit, scope: &SearchScope) -> bool {
        if scope.source_text && self.matches(&unit.source) {
            return true;
        }
        if scope.translations && unit.translations.iter().any(|t| self.matches(t)) {
            return true;
        }
        if scope.comments {
            let comments = [
                unit.comment.as_deref(),
                unit.extra_comment.as_deref(),
                unit.translator_comment.as_deref(),
            ];
            if comments.iter().flatten().any(|c| self.matches(c)) {
                return true;
            }
        }
        false
    }

    fn replace_in(&self, text: &str, replacement: &str) -> String {
        self.regex
            .replace_all(text, NoExpand(replacement))
            .into_owned()
    }
}

fn check_scope(scope: &SearchScope) -> Result<(), SearchError> {
    if scope.is_empty() {
        Err(SearchError::InvalidScope)
    } else {
        Ok(())
    }
}

/// Lazily iterate the units matching `query`, in catalog order.
///
/// The iterator is restartable by calling `find` again; for stepping with
/// wrap-around semantics use [`SearchCursor`].
pub fn find<'a>(
    catalog: &'a Catalog,
    query: &str,
    scope: SearchScope,
    options: &SearchOptions,
) -> Result<impl Iterator<Item = UnitId> + 'a, SearchError> {
    check_scope(&scope)?;
    let matcher = Matcher::new(query, options)?;
    let skip_obsolete = options.skip_obsolete;
    Ok(catalog.iter().filter_map(move |(id, unit)| {
        if skip_obsolete && unit.is_obsolete() {
            return None;
        }
        matcher.unit_matches(unit, &scope).then_some(id)
    }))
}

/// A match returned by [`SearchCursor::find_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundMatch {
    pub unit: UnitId,
    /// True when the search passed the end of the catalog to reach this
    /// match.
    pub wrapped: bool,
}

/// Stateful stepping over matches with wrap-around.
#[derive(Debug, Clone, Default)]
pub struct SearchCursor {
    next: usize,
}

impl SearchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the next match at or after the cursor, wrapping past the end.
    ///
    /// Returns `None` only when nothing in the catalog matches.
    pub fn find_next(
        &mut self,
        catalog: &Catalog,
        query: &str,
        scope: SearchScope,
        options: &SearchOptions,
    ) -> Result<Option<FoundMatch>, SearchError> {
        check_scope(&scope)?;
        let matcher = Matcher::new(query, options)?;

        let start = self.next.min(catalog.len());
        let matches = |unit: &TranslationUnit| {
            if options.skip_obsolete && unit.is_obsolete() {
                return false;
            }
            matcher.unit_matches(unit, &scope)
        };

        for (id, unit) in catalog.iter().skip(start) {
            if matches(unit) {
                self.next = id.index() + 1;
                return Ok(Some(FoundMatch {
                    unit: id,
                    wrapped: false,
                }));
            }
        }
        for (id, unit) in catalog.iter().take(start) {
            if matches(unit) {
                self.next = id.index() + 1;
                return Ok(Some(FoundMatch {
                    unit: id,
                    wrapped: true,
                }));
            }
        }
        Ok(None)
    }
}

/// Replace `query` with `replacement` in the translations of every unit the
/// scope matches.
///
/// A matched unit with no translation text is counted and skipped; there is
/// nothing to replace into. Cancellation is checked at unit boundaries and
/// completed replacements stay committed.
pub fn replace_all(
    catalog: &mut Catalog,
    query: &str,
    replacement: &str,
    scope: SearchScope,
    options: &SearchOptions,
    cancel: &CancelToken,
) -> Result<ReplaceReport, SearchError> {
    check_scope(&scope)?;
    let matcher = Matcher::new(query, options)?;
    let mut report = ReplaceReport::default();

    let ids: Vec<_> = catalog.ids().collect();
    for id in ids {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }
        let unit = catalog.unit(id);
        if options.skip_obsolete && unit.is_obsolete() {
            continue;
        }
        if !matcher.unit_matches(unit, &scope) {
            continue;
        }
        report.matched += 1;
        if !unit.is_translated() {
            report.skipped += 1;
            continue;
        }

        let unit = catalog.unit_mut(id);
        let mut changed = false;
        for translation in &mut unit.translations {
            let replaced = matcher.replace_in(translation, replacement);
            if replaced != *translation {
                *translation = replaced;
                changed = true;
            }
        }
        if changed {
            report.replaced += 1;
        }
    }

    Ok(report)
}
