//! In-memory catalog model.
//!
//! A [`Catalog`] owns an ordered arena of [`TranslationUnit`]s addressed by
//! stable [`UnitId`] handles. All engine components operate on handles, never
//! on raw positions, so reordering never invalidates outstanding references.
//! Units are grouped by context only at serialization time; in memory the
//! insertion order is authoritative (it drives next/previous navigation and
//! "sort back to message-file order").

mod unit;

use std::collections::BTreeMap;

pub use unit::{SourceLocation, Status, TranslationUnit};

/// Stable, opaque handle to a unit inside its owning catalog.
///
/// Handles are only meaningful for the catalog that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(u32);

impl UnitId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How `<location>` records were encoded in the file this catalog came from.
///
/// The writer re-derives the same encoding so a load/save cycle preserves the
/// location scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationsMode {
    #[default]
    None,
    Relative,
    Absolute,
}

/// Per-catalog status counts, as shown by `lingo stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub finished: usize,
    pub unfinished: usize,
    pub obsolete: usize,
}

impl CatalogStats {
    pub fn total(&self) -> usize {
        self.finished + self.unfinished + self.obsolete
    }
}

/// An ordered collection of translation units plus catalog-level metadata.
///
/// The catalog is the sole owner of its units; import operations copy units,
/// never alias them across catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    units: Vec<TranslationUnit>,
    /// Target language tag, e.g. `"pl"` or `"hu_HU"`.
    pub language: Option<String>,
    /// Source language tag; absent means the tool default.
    pub source_language: Option<String>,
    /// Format version attribute, e.g. `"2.0"`.
    pub version: String,
    pub locations_mode: LocationsMode,
    /// Legacy `<defaultcodec>` element, round-tripped.
    pub default_codec: Option<String>,
    /// Catalog-level `extra-*` elements, round-tripped.
    pub extras: BTreeMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            language: None,
            source_language: None,
            version: "2.0".to_string(),
            locations_mode: LocationsMode::default(),
            default_codec: None,
            extras: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Append a unit, returning its stable handle.
    pub fn push(&mut self, unit: TranslationUnit) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        self.units.push(unit);
        id
    }

    pub fn unit(&self, id: UnitId) -> &TranslationUnit {
        &self.units[id.index()]
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut TranslationUnit {
        &mut self.units[id.index()]
    }

    /// Handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        (0..self.units.len() as u32).map(UnitId)
    }

    /// Units with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &TranslationUnit)> {
        self.units
            .iter()
            .enumerate()
            .map(|(i, u)| (UnitId(i as u32), u))
    }

    /// Distinct contexts in first-seen order, each with its units' handles.
    ///
    /// This is the grouping the serializer emits.
    pub fn contexts(&self) -> Vec<(&str, Vec<UnitId>)> {
        let mut order: Vec<&str> = Vec::new();
        let mut by_context: BTreeMap<&str, Vec<UnitId>> = BTreeMap::new();
        for (id, unit) in self.iter() {
            let slot = by_context.entry(unit.context.as_str()).or_default();
            if slot.is_empty() {
                order.push(unit.context.as_str());
            }
            slot.push(id);
        }
        order
            .into_iter()
            .map(|name| (name, by_context.remove(name).unwrap_or_default()))
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats::default();
        for unit in &self.units {
            match unit.status {
                Status::Finished => stats.finished += 1,
                Status::Unfinished => stats.unfinished += 1,
                Status::Obsolete => stats.obsolete += 1,
            }
        }
        stats
    }
}
