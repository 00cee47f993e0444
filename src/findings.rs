//! Finding types produced by the validation engine.
//!
//! Each finding is self-contained with all information needed by a reporter
//! (CLI, library caller) to display it: the check that produced it, its
//! severity, and a display snapshot of the offending unit. Findings are
//! advisory; they never mutate the unit and never block an operation.

use enum_dispatch::enum_dispatch;

use crate::catalog::{Catalog, TranslationUnit, UnitId};
use crate::checks::punctuation::Ending;

// ============================================================
// Severity and Check
// ============================================================

/// Severity level of a finding.
///
/// Validation checks only ever produce warnings; `Error` is reserved for
/// format-level problems surfaced through the same reporting pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Identifier for each check, used in reports and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Check {
    Accelerators,
    Punctuation,
    PlaceMarkers,
    PhraseSuggestions,
    Format,
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::Accelerators => write!(f, "accelerators"),
            Check::Punctuation => write!(f, "punctuation"),
            Check::PlaceMarkers => write!(f, "place-markers"),
            Check::PhraseSuggestions => write!(f, "phrase-suggestions"),
            Check::Format => write!(f, "format"),
        }
    }
}

// ============================================================
// Unit display snapshot
// ============================================================

/// Display snapshot of the unit a finding refers to.
///
/// Carries the handle for callers that want to navigate back to the unit,
/// plus the fields reporters render so they need not hold the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRef {
    pub unit: UnitId,
    pub context: String,
    pub source: String,
    /// First provenance record, pre-rendered as `file:line`.
    pub location: Option<String>,
}

impl UnitRef {
    pub fn new(id: UnitId, unit: &TranslationUnit) -> Self {
        Self {
            unit: id,
            context: unit.context.clone(),
            source: unit.source.clone(),
            location: unit.locations.first().map(ToString::to_string),
        }
    }

    pub fn from_catalog(catalog: &Catalog, id: UnitId) -> Self {
        Self::new(id, catalog.unit(id))
    }
}

// ============================================================
// Finding types
// ============================================================

/// Translation is missing accelerator markers the source has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAcceleratorFinding {
    pub unit: UnitRef,
}

impl MissingAcceleratorFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn check() -> Check {
        Check::Accelerators
    }
}

/// Translation has more accelerator markers than the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperfluousAcceleratorFinding {
    pub unit: UnitRef,
}

impl SuperfluousAcceleratorFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn check() -> Check {
        Check::Accelerators
    }
}

/// Source and translation end in different punctuation classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationFinding {
    pub unit: UnitRef,
    pub source_ending: Ending,
    pub translation_ending: Ending,
}

impl PunctuationFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn check() -> Check {
        Check::Punctuation
    }
}

/// Place markers differ between source and a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceMarkerFinding {
    pub unit: UnitRef,
    /// Markers present in the source but absent from the translation.
    pub missing: Vec<String>,
    /// Markers present in the translation but absent from the source.
    pub superfluous: Vec<String>,
}

impl PlaceMarkerFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn check() -> Check {
        Check::PlaceMarkers
    }
}

/// A plural form of a numerus unit does not use the `%n` count marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPluralMarkerFinding {
    pub unit: UnitRef,
    /// Plural category index the marker is missing from.
    pub category: usize,
    /// Display name of that category, e.g. "Paucal".
    pub category_name: String,
}

impl MissingPluralMarkerFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn check() -> Check {
        Check::PlaceMarkers
    }
}

/// The final translation diverges from every phrase-book suggestion offered
/// for this unit. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredPhraseSuggestionFinding {
    pub unit: UnitRef,
    /// The suggestions that were offered, in priority order.
    pub suggestions: Vec<String>,
}

impl IgnoredPhraseSuggestionFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn check() -> Check {
        Check::PhraseSuggestions
    }
}

/// A recoverable problem the codec flagged while loading a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatFinding {
    pub path: String,
    pub message: String,
}

impl FormatFinding {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn check() -> Check {
        Check::Format
    }
}

// ============================================================
// Finding enum and Report trait
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    MissingAccelerator(MissingAcceleratorFinding),
    SuperfluousAccelerator(SuperfluousAcceleratorFinding),
    Punctuation(PunctuationFinding),
    PlaceMarker(PlaceMarkerFinding),
    MissingPluralMarker(MissingPluralMarkerFinding),
    IgnoredPhraseSuggestion(IgnoredPhraseSuggestionFinding),
    Format(FormatFinding),
}

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A translation unit (has context/source display info).
    Unit(&'a UnitRef),
    /// File-level only (format findings - no unit context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all finding types to provide a consistent interface for the
/// report functions. Uses `enum_dispatch` for zero-cost dispatch on the
/// `Finding` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this finding.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Check identifier.
    fn report_check(&self) -> Check;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for MissingAcceleratorFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Unit(&self.unit)
    }

    fn message(&self) -> String {
        "translation does not have the same accelerators as the source text".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_check(&self) -> Check {
        Self::check()
    }
}

impl Report for SuperfluousAcceleratorFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Unit(&self.unit)
    }

    fn message(&self) -> String {
        "translation has more accelerators than the source text".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_check(&self) -> Check {
        Self::check()
    }
}

impl Report for PunctuationFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Unit(&self.unit)
    }

    fn message(&self) -> String {
        "translation does not end with the same punctuation as the source text".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_check(&self) -> Check {
        Self::check()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "source ends with {}, translation ends with {}",
            self.source_ending, self.translation_ending
        ))
    }
}

impl Report for PlaceMarkerFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Unit(&self.unit)
    }

    fn message(&self) -> String {
        "translation does not use the same place markers as the source text".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_check(&self) -> Check {
        Self::check()
    }

    fn details(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing {}", self.missing.join(", ")));
        }
        if !self.superfluous.is_empty() {
            parts.push(format!("superfluous {}", self.superfluous.join(", ")));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

impl Report for MissingPluralMarkerFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Unit(&self.unit)
    }

    fn message(&self) -> String {
        format!(
            "{} form of the translation does not use the %n count marker",
            self.category_name
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_check(&self) -> Check {
        Self::check()
    }
}

impl Report for IgnoredPhraseSuggestionFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Unit(&self.unit)
    }

    fn message(&self) -> String {
        "translation does not use any phrase book suggestion for this source text".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_check(&self) -> Check {
        Self::check()
    }

    fn details(&self) -> Option<String> {
        Some(format!("suggested: {}", self.suggestions.join(", ")))
    }
}

impl Report for FormatFinding {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_check(&self) -> Check {
        Self::check()
    }
}
