//! `.ts` serializer.
//!
//! Emits units grouped by context in first-seen order. In relative mode the
//! writer keeps the same per-file line cursors the reader reconstructs and
//! emits signed deltas, omitting the filename while it is unchanged; deltas
//! are always re-derived from the absolute locations in the model, never
//! copied through.

use std::collections::HashMap;
use std::fmt::Write;

use quick_xml::escape::escape;

use crate::catalog::{Catalog, LocationsMode, SourceLocation, Status, TranslationUnit};

/// Serialize a catalog to `.ts` XML text.
pub fn serialize(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n");

    out.push_str("<TS version=\"");
    out.push_str(&escape(&catalog.version));
    out.push('"');
    if let Some(language) = &catalog.language {
        let _ = write!(out, " language=\"{}\"", escape(language));
    }
    if let Some(source_language) = &catalog.source_language {
        let _ = write!(out, " sourcelanguage=\"{}\"", escape(source_language));
    }
    out.push_str(">\n");

    if let Some(codec) = &catalog.default_codec {
        let _ = writeln!(out, "<defaultcodec>{}</defaultcodec>", escape(codec));
    }
    for (key, value) in &catalog.extras {
        let _ = writeln!(out, "    <extra-{key}>{}</extra-{key}>", escape(value));
    }

    let mut encoder = LocationEncoder::new(catalog.locations_mode);
    for (name, ids) in catalog.contexts() {
        out.push_str("<context>\n");
        let _ = writeln!(out, "    <name>{}</name>", escape(name));
        for id in ids {
            write_message(&mut out, catalog.unit(id), &mut encoder);
        }
        out.push_str("</context>\n");
    }

    out.push_str("</TS>\n");
    out
}

fn write_message(out: &mut String, unit: &TranslationUnit, encoder: &mut LocationEncoder) {
    out.push_str("    <message");
    if let Some(id) = &unit.id {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    if unit.numerus {
        out.push_str(" numerus=\"yes\"");
    }
    out.push_str(">\n");

    for (filename, line) in encoder.encode(&unit.locations) {
        out.push_str("        <location");
        if let Some(filename) = filename {
            let _ = write!(out, " filename=\"{}\"", escape(&filename));
        }
        if let Some(line) = line {
            let _ = write!(out, " line=\"{line}\"");
        }
        out.push_str("/>\n");
    }

    let _ = writeln!(out, "        <source>{}</source>", escape(&unit.source));
    write_field(out, "oldsource", unit.old_source.as_deref());
    write_field(out, "comment", unit.comment.as_deref());
    write_field(out, "oldcomment", unit.old_comment.as_deref());
    write_field(out, "extracomment", unit.extra_comment.as_deref());
    write_field(out, "translatorcomment", unit.translator_comment.as_deref());

    out.push_str("        <translation");
    match unit.status {
        Status::Unfinished => out.push_str(" type=\"unfinished\""),
        Status::Obsolete => out.push_str(" type=\"obsolete\""),
        Status::Finished => {}
    }
    if unit.numerus {
        out.push_str(">\n");
        for form in &unit.translations {
            let _ = writeln!(out, "            <numerusform>{}</numerusform>", escape(form));
        }
        out.push_str("        </translation>\n");
    } else {
        let text = unit.translations.first().map(String::as_str).unwrap_or("");
        let _ = writeln!(out, ">{}</translation>", escape(text));
    }

    write_field(out, "userdata", unit.userdata.as_deref());
    for (key, value) in &unit.extras {
        let _ = writeln!(out, "        <extra-{key}>{}</extra-{key}>", escape(value));
    }

    out.push_str("    </message>\n");
}

fn write_field(out: &mut String, element: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(out, "        <{element}>{}</{element}>", escape(value));
    }
}

/// Re-derives the `<location>` encoding from absolute locations.
struct LocationEncoder {
    mode: LocationsMode,
    cursors: HashMap<String, i64>,
    current_file: String,
}

impl LocationEncoder {
    fn new(mode: LocationsMode) -> Self {
        Self {
            mode,
            cursors: HashMap::new(),
            current_file: String::new(),
        }
    }

    /// Encode one message's locations as `(filename attr, line attr)` pairs.
    fn encode(&mut self, locations: &[SourceLocation]) -> Vec<(Option<String>, Option<String>)> {
        match self.mode {
            LocationsMode::None => Vec::new(),
            LocationsMode::Absolute => locations
                .iter()
                .map(|loc| {
                    (
                        Some(loc.file.clone()),
                        loc.line.map(|line| line.to_string()),
                    )
                })
                .collect(),
            LocationsMode::Relative => {
                let mut records = Vec::with_capacity(locations.len());
                let mut context_file = self.current_file.clone();
                let mut first = true;
                for loc in locations {
                    let line = loc.line.map(|line| {
                        let cursor = self.cursors.entry(loc.file.clone()).or_insert(0);
                        let delta = i64::from(line) - *cursor;
                        *cursor = i64::from(line);
                        if delta >= 0 {
                            format!("+{delta}")
                        } else {
                            delta.to_string()
                        }
                    });
                    let filename = if loc.file != context_file {
                        if first {
                            self.current_file = loc.file.clone();
                        }
                        context_file = loc.file.clone();
                        Some(loc.file.clone())
                    } else {
                        None
                    };
                    first = false;
                    records.push((filename, line));
                }
                records
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SourceLocation;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_minimal_catalog() {
        let mut catalog = Catalog::new();
        catalog.language = Some("da".to_string());
        let mut unit = TranslationUnit::new("MainWindow", "Open");
        unit.translations = vec!["Åbn".to_string()];
        unit.status = Status::Finished;
        catalog.push(unit);

        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
                        <!DOCTYPE TS>\n\
                        <TS version=\"2.0\" language=\"da\">\n\
                        <context>\n\
                        \x20   <name>MainWindow</name>\n\
                        \x20   <message>\n\
                        \x20       <source>Open</source>\n\
                        \x20       <translation>Åbn</translation>\n\
                        \x20   </message>\n\
                        </context>\n\
                        </TS>\n";
        assert_eq!(serialize(&catalog), expected);
    }

    #[test]
    fn escapes_markup_in_text() {
        let mut catalog = Catalog::new();
        let mut unit = TranslationUnit::new("C", "a < b & c");
        unit.translations = vec!["x > y".to_string()];
        unit.status = Status::Finished;
        catalog.push(unit);

        let xml = serialize(&catalog);
        assert!(xml.contains("<source>a &lt; b &amp; c</source>"));
        assert!(xml.contains("&gt; y</translation>"));
    }

    #[test]
    fn relative_locations_become_deltas() {
        let mut catalog = Catalog::new();
        catalog.locations_mode = LocationsMode::Relative;
        let mut first = TranslationUnit::new("C", "one");
        first.locations = vec![
            SourceLocation::new("a.cpp", 10),
            SourceLocation::new("a.cpp", 15),
        ];
        catalog.push(first);
        let mut second = TranslationUnit::new("C", "two");
        second.locations = vec![SourceLocation::new("a.cpp", 12)];
        catalog.push(second);

        let xml = serialize(&catalog);
        assert!(xml.contains("<location filename=\"a.cpp\" line=\"+10\"/>"));
        assert!(xml.contains("<location line=\"+5\"/>"));
        assert!(xml.contains("<location line=\"-3\"/>"));
    }

    #[test]
    fn unfinished_and_obsolete_keep_type_attributes() {
        let mut catalog = Catalog::new();
        let mut unfinished = TranslationUnit::new("C", "a");
        unfinished.status = Status::Unfinished;
        catalog.push(unfinished);
        let mut obsolete = TranslationUnit::new("C", "b");
        obsolete.translations = vec!["t".to_string()];
        obsolete.status = Status::Obsolete;
        catalog.push(obsolete);

        let xml = serialize(&catalog);
        assert!(xml.contains("<translation type=\"unfinished\"></translation>"));
        assert!(xml.contains("<translation type=\"obsolete\">t</translation>"));
    }

    #[test]
    fn numerus_forms_are_nested() {
        let mut catalog = Catalog::new();
        catalog.language = Some("pl".to_string());
        let mut unit = TranslationUnit::new("C", "%n file(s)");
        unit.numerus = true;
        unit.translations = vec![
            "%n plik".to_string(),
            "%n pliki".to_string(),
            "%n plików".to_string(),
        ];
        unit.status = Status::Finished;
        catalog.push(unit);

        let xml = serialize(&catalog);
        assert!(xml.contains("<message numerus=\"yes\">"));
        assert!(xml.contains("            <numerusform>%n plik</numerusform>\n"));
        assert!(xml.contains("            <numerusform>%n plików</numerusform>\n"));
    }
}
