//! Event-driven `.ts` parser.
//!
//! Walks the document the way the format is defined: `<context>` elements in
//! document order, `<message>` elements within them appended to the catalog
//! in document order. Location records are decoded against catalog-wide
//! per-file line cursors; plural form counts are normalized against the
//! target language with a warning, never by dropping text.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{ParseError, ParseResult, ParseWarning, build_line_index, byte_offset_to_position};
use crate::catalog::{Catalog, LocationsMode, SourceLocation, Status, TranslationUnit};
use crate::plurals::PluralRule;

pub(super) fn parse(input: &str) -> Result<ParseResult, ParseError> {
    Parser::new(input).run()
}

struct Parser<'a> {
    reader: Reader<&'a [u8]>,
    line_index: Vec<usize>,
    catalog: Catalog,
    warnings: Vec<ParseWarning>,
    /// Plural form count the target language requires, once known.
    expected_forms: Option<usize>,
    // location decoding state, catalog-wide like the cursors the writer keeps
    cursors: HashMap<String, i64>,
    current_file: String,
    last_line: Option<u32>,
    saw_location: bool,
    saw_relative: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            reader: Reader::from_reader(input.as_bytes()),
            line_index: build_line_index(input),
            catalog: Catalog::new(),
            warnings: Vec::new(),
            expected_forms: None,
            cursors: HashMap::new(),
            current_file: String::new(),
            last_line: None,
            saw_location: false,
            saw_relative: false,
        }
    }

    fn run(mut self) -> Result<ParseResult, ParseError> {
        let mut saw_ts = false;
        loop {
            let (event, offset) = self.next_event()?;
            match event {
                ParsedEvent::Start(name, e) => {
                    if name == "TS" && !saw_ts {
                        saw_ts = true;
                        self.read_ts_attributes(&e, offset)?;
                        self.parse_ts_body()?;
                    } else {
                        return Err(self.unknown_element(name, offset));
                    }
                }
                ParsedEvent::Eof => break,
                ParsedEvent::Text(t) if t.trim().is_empty() => {}
                ParsedEvent::End | ParsedEvent::Empty(..) | ParsedEvent::Text(_) => {
                    return Err(self.syntax(offset, "unexpected content outside <TS>"));
                }
                ParsedEvent::Ignorable => {}
            }
        }
        if !saw_ts {
            let offset = self.offset();
            return Err(self.syntax(offset, "missing <TS> root element"));
        }

        self.catalog.locations_mode = if self.saw_relative {
            LocationsMode::Relative
        } else if self.saw_location {
            LocationsMode::Absolute
        } else {
            LocationsMode::None
        };

        self.flag_duplicates();

        Ok(ParseResult {
            catalog: self.catalog,
            warnings: self.warnings,
        })
    }

    fn read_ts_attributes(&mut self, e: &BytesStart<'_>, offset: usize) -> Result<(), ParseError> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.syntax(offset, err))?;
            let value = attr
                .unescape_value()
                .map_err(|err| self.syntax(offset, err))?
                .to_string();
            match attr.key.as_ref() {
                b"version" => self.catalog.version = value,
                b"language" => self.catalog.language = Some(value),
                b"sourcelanguage" => self.catalog.source_language = Some(value),
                _ => {}
            }
        }
        if let Some(language) = &self.catalog.language {
            match PluralRule::for_language(language) {
                Some(rule) => self.expected_forms = Some(rule.count()),
                None => {
                    self.warnings.push(ParseWarning::UnknownLanguage {
                        language: language.clone(),
                    });
                    self.expected_forms = Some(1);
                }
            }
        }
        Ok(())
    }

    fn parse_ts_body(&mut self) -> Result<(), ParseError> {
        loop {
            let (event, offset) = self.next_event()?;
            match event {
                ParsedEvent::Start(name, _) => match name.as_str() {
                    "context" => self.parse_context()?,
                    "defaultcodec" => {
                        self.catalog.default_codec = Some(self.read_text("defaultcodec")?);
                    }
                    _ if name.starts_with("extra-") => {
                        let value = self.read_text(&name)?;
                        self.catalog.extras.insert(name["extra-".len()..].to_string(), value);
                    }
                    _ => return Err(self.unknown_element(name, offset)),
                },
                ParsedEvent::Empty(name, _) if name.starts_with("extra-") => {
                    self.catalog
                        .extras
                        .insert(name["extra-".len()..].to_string(), String::new());
                }
                ParsedEvent::Empty(name, _) => return Err(self.unknown_element(name, offset)),
                ParsedEvent::End => return Ok(()),
                ParsedEvent::Text(t) if t.trim().is_empty() => {}
                ParsedEvent::Text(_) => {
                    return Err(self.syntax(offset, "unexpected text inside <TS>"));
                }
                ParsedEvent::Eof => return Err(self.syntax(offset, "unexpected end of file")),
                ParsedEvent::Ignorable => {}
            }
        }
    }

    fn parse_context(&mut self) -> Result<(), ParseError> {
        let mut context_name = String::new();
        loop {
            let (event, offset) = self.next_event()?;
            match event {
                ParsedEvent::Start(name, e) => match name.as_str() {
                    "name" => context_name = self.read_text("name")?,
                    "message" => self.parse_message(&context_name, &e)?,
                    _ => return Err(self.unknown_element(name, offset)),
                },
                ParsedEvent::Empty(name, _) if name == "name" => context_name = String::new(),
                ParsedEvent::Empty(name, _) => return Err(self.unknown_element(name, offset)),
                ParsedEvent::End => return Ok(()),
                ParsedEvent::Text(t) if t.trim().is_empty() => {}
                ParsedEvent::Text(_) => {
                    return Err(self.syntax(offset, "unexpected text inside <context>"));
                }
                ParsedEvent::Eof => return Err(self.syntax(offset, "unexpected end of file")),
                ParsedEvent::Ignorable => {}
            }
        }
    }

    fn parse_message(&mut self, context: &str, e: &BytesStart<'_>) -> Result<(), ParseError> {
        let offset = self.offset();
        let mut unit = TranslationUnit::new(context, "");
        unit.translations.clear();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.syntax(offset, err))?;
            let value = attr
                .unescape_value()
                .map_err(|err| self.syntax(offset, err))?
                .to_string();
            match attr.key.as_ref() {
                b"id" => unit.id = Some(value),
                b"numerus" => unit.numerus = value == "yes",
                _ => {}
            }
        }

        let mut msg_file = self.current_file.clone();
        let mut translation_type: Option<Status> = None;
        let mut forms: Vec<String> = Vec::new();

        loop {
            let (event, offset) = self.next_event()?;
            match event {
                ParsedEvent::Start(name, e) => {
                    match name.as_str() {
                        "location" => {
                            self.decode_location(&e, offset, &mut unit.locations, &mut msg_file)?;
                            self.skip_to_end("location")?;
                        }
                        "source" => unit.source = self.read_text("source")?,
                        "oldsource" => unit.old_source = Some(self.read_text("oldsource")?),
                        "comment" => unit.comment = Some(self.read_text("comment")?),
                        "oldcomment" => unit.old_comment = Some(self.read_text("oldcomment")?),
                        "extracomment" => {
                            unit.extra_comment = Some(self.read_text("extracomment")?)
                        }
                        "translatorcomment" => {
                            unit.translator_comment = Some(self.read_text("translatorcomment")?)
                        }
                        "userdata" => unit.userdata = Some(self.read_text("userdata")?),
                        "translation" => {
                            translation_type = self.translation_type(&e, offset)?;
                            forms = self.parse_translation(unit.numerus)?;
                        }
                        _ if name.starts_with("extra-") => {
                            let value = self.read_text(&name)?;
                            unit.extras.insert(name["extra-".len()..].to_string(), value);
                        }
                        _ => return Err(self.unknown_element(name, offset)),
                    }
                }
                ParsedEvent::Empty(name, e) => {
                    match name.as_str() {
                        "location" => {
                            self.decode_location(&e, offset, &mut unit.locations, &mut msg_file)?;
                        }
                        "source" => unit.source = String::new(),
                        "oldsource" => unit.old_source = Some(String::new()),
                        "comment" => unit.comment = Some(String::new()),
                        "oldcomment" => unit.old_comment = Some(String::new()),
                        "extracomment" => unit.extra_comment = Some(String::new()),
                        "translatorcomment" => unit.translator_comment = Some(String::new()),
                        "userdata" => unit.userdata = Some(String::new()),
                        "translation" => {
                            translation_type = self.translation_type(&e, offset)?;
                        }
                        _ if name.starts_with("extra-") => {
                            unit.extras.insert(name["extra-".len()..].to_string(), String::new());
                        }
                        _ => return Err(self.unknown_element(name, offset)),
                    }
                }
                ParsedEvent::End => break,
                ParsedEvent::Text(t) if t.trim().is_empty() => {}
                ParsedEvent::Text(_) => {
                    return Err(self.syntax(offset, "unexpected text inside <message>"));
                }
                ParsedEvent::Eof => return Err(self.syntax(offset, "unexpected end of file")),
                ParsedEvent::Ignorable => {}
            }
        }

        self.finish_unit(&mut unit, translation_type, forms);
        self.catalog.push(unit);
        Ok(())
    }

    fn translation_type(
        &mut self,
        e: &BytesStart<'_>,
        offset: usize,
    ) -> Result<Option<Status>, ParseError> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.syntax(offset, err))?;
            if attr.key.as_ref() == b"type" {
                let value = attr
                    .unescape_value()
                    .map_err(|err| self.syntax(offset, err))?;
                return Ok(match value.as_ref() {
                    "unfinished" => Some(Status::Unfinished),
                    // vanished is a newer spelling of the same lifecycle state
                    "obsolete" | "vanished" => Some(Status::Obsolete),
                    _ => None,
                });
            }
        }
        Ok(None)
    }

    /// Parse the children of `<translation>`: plain text, or `<numerusform>`
    /// children when the message is plural.
    fn parse_translation(&mut self, numerus: bool) -> Result<Vec<String>, ParseError> {
        let mut forms = Vec::new();
        let mut text = String::new();
        loop {
            let (event, offset) = self.next_event()?;
            match event {
                ParsedEvent::Start(name, _) if numerus && name == "numerusform" => {
                    forms.push(self.read_text("numerusform")?);
                }
                ParsedEvent::Empty(name, _) if numerus && name == "numerusform" => {
                    forms.push(String::new());
                }
                ParsedEvent::Start(name, _) | ParsedEvent::Empty(name, _) => {
                    return Err(self.unknown_element(name, offset));
                }
                ParsedEvent::Text(t) => {
                    if numerus {
                        if !t.trim().is_empty() {
                            return Err(
                                self.syntax(offset, "text not allowed in a plural translation")
                            );
                        }
                    } else {
                        text.push_str(&t);
                    }
                }
                ParsedEvent::End => break,
                ParsedEvent::Eof => return Err(self.syntax(offset, "unexpected end of file")),
                ParsedEvent::Ignorable => {}
            }
        }
        if !numerus {
            forms.push(text);
        }
        Ok(forms)
    }

    /// Apply translation text, normalize plural form counts, settle status.
    fn finish_unit(
        &mut self,
        unit: &mut TranslationUnit,
        translation_type: Option<Status>,
        mut forms: Vec<String>,
    ) {
        if unit.numerus {
            if let Some(expected) = self.expected_forms {
                if forms.is_empty() {
                    // untranslated plural message, nothing to warn about
                    forms = vec![String::new(); expected];
                } else if forms.len() != expected {
                    self.warnings.push(ParseWarning::PluralCountMismatch {
                        context: unit.context.clone(),
                        source: unit.source.clone(),
                        expected,
                        found: forms.len(),
                    });
                    while forms.len() < expected {
                        forms.push(String::new());
                    }
                    // shrink only over empty trailing forms, text is kept
                    while forms.len() > expected && forms.last().is_some_and(|f| f.is_empty()) {
                        forms.pop();
                    }
                }
            }
        }
        if forms.is_empty() {
            forms.push(String::new());
        }
        unit.translations = forms;

        unit.status = match translation_type {
            Some(status) => status,
            None => {
                if unit.is_translated() {
                    Status::Finished
                } else {
                    Status::Unfinished
                }
            }
        };
    }

    fn decode_location(
        &mut self,
        e: &BytesStart<'_>,
        offset: usize,
        refs: &mut Vec<SourceLocation>,
        msg_file: &mut String,
    ) -> Result<(), ParseError> {
        self.saw_location = true;

        let mut filename: Option<String> = None;
        let mut line: Option<String> = None;
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.syntax(offset, err))?;
            let value = attr
                .unescape_value()
                .map_err(|err| self.syntax(offset, err))?
                .to_string();
            match attr.key.as_ref() {
                b"filename" => filename = Some(value),
                b"line" => line = Some(value),
                _ => {}
            }
        }

        let had_filename = filename.is_some();
        if let Some(f) = filename {
            if refs.is_empty() {
                self.current_file = f.clone();
            }
            *msg_file = f;
        } else {
            self.saw_relative = true;
        }
        let file = msg_file.clone();

        match line {
            Some(lin) => {
                let lin = lin.trim();
                if lin.starts_with('+') || lin.starts_with('-') {
                    if let Ok(delta) = lin.parse::<i64>() {
                        let cursor = self.cursors.entry(file.clone()).or_insert(0);
                        *cursor += delta;
                        let ln = (*cursor).max(0) as u32;
                        self.last_line = Some(ln);
                        self.saw_relative = true;
                        refs.push(SourceLocation::new(file, ln));
                    }
                } else if let Ok(abs) = lin.parse::<i64>() {
                    self.cursors.insert(file.clone(), abs);
                    let ln = abs.max(0) as u32;
                    self.last_line = Some(ln);
                    refs.push(SourceLocation::new(file, ln));
                }
                // a line attribute that is not a number drops the record
            }
            None if had_filename => {
                // filename switch with no line: the cursor carries over
                if let Some(ln) = self.last_line {
                    self.cursors.insert(file.clone(), ln as i64);
                }
                refs.push(SourceLocation::new(file, self.last_line));
            }
            None => {
                // bare <location/>: same file, no line granularity
                refs.push(SourceLocation::new(file, None));
            }
        }
        Ok(())
    }

    /// Flag units that violate the `(context, source, comment)` uniqueness
    /// invariant. Obsolete copies are expected and not reported.
    fn flag_duplicates(&mut self) {
        let mut seen: HashMap<(String, String, Option<String>), bool> = HashMap::new();
        let mut warnings = Vec::new();
        for (_, unit) in self.catalog.iter() {
            if unit.is_obsolete() {
                continue;
            }
            let key = (
                unit.context.clone(),
                unit.source.clone(),
                unit.comment.clone(),
            );
            match seen.get(&key) {
                None => {
                    seen.insert(key, unit.numerus);
                }
                Some(&numerus) if numerus != unit.numerus => {
                    warnings.push(ParseWarning::NumerusConflict {
                        context: unit.context.clone(),
                        source: unit.source.clone(),
                    });
                }
                Some(_) => {
                    warnings.push(ParseWarning::Duplicate {
                        context: unit.context.clone(),
                        source: unit.source.clone(),
                    });
                }
            }
        }
        self.warnings.extend(warnings);
    }

    // ---- event plumbing ----

    fn offset(&self) -> usize {
        self.reader.buffer_position() as usize
    }

    /// Read the next event, mapping it into the small set of shapes the
    /// grammar cares about. Comments, processing instructions and the
    /// prolog are ignorable.
    fn next_event(&mut self) -> Result<(ParsedEvent, usize), ParseError> {
        let offset = self.offset();
        let mut buf = Vec::new();
        let event = match self.reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(err) => return Err(self.syntax(offset, err)),
        };
        let parsed = match event {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                ParsedEvent::Start(name, e.into_owned())
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                ParsedEvent::Empty(name, e.into_owned())
            }
            Event::End(_) => ParsedEvent::End,
            Event::Text(t) => {
                let text = t.unescape().map_err(|err| self.syntax(offset, err))?;
                ParsedEvent::Text(text.to_string())
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).to_string();
                ParsedEvent::Text(text)
            }
            Event::Eof => ParsedEvent::Eof,
            // prolog, comments and processing instructions
            _ => ParsedEvent::Ignorable,
        };
        Ok((parsed, offset))
    }

    /// Collect the text content of the current element up to its end tag.
    fn read_text(&mut self, element: &str) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            let (event, offset) = self.next_event()?;
            match event {
                ParsedEvent::Text(t) => text.push_str(&t),
                ParsedEvent::End => return Ok(text),
                ParsedEvent::Start(name, _) | ParsedEvent::Empty(name, _) => {
                    return Err(self.unknown_element(name, offset));
                }
                ParsedEvent::Eof => {
                    return Err(self.syntax(offset, format!("unterminated <{element}>")));
                }
                ParsedEvent::Ignorable => {}
            }
        }
    }

    /// Consume everything up to the end tag of an element whose content is
    /// not meaningful (a `<location>` written in start-end form).
    fn skip_to_end(&mut self, element: &str) -> Result<(), ParseError> {
        loop {
            let (event, offset) = self.next_event()?;
            match event {
                ParsedEvent::End => return Ok(()),
                ParsedEvent::Text(t) if t.trim().is_empty() => {}
                ParsedEvent::Eof => {
                    return Err(self.syntax(offset, format!("unterminated <{element}>")));
                }
                ParsedEvent::Ignorable => {}
                _ => return Err(self.syntax(offset, format!("unexpected content in <{element}>"))),
            }
        }
    }

    fn syntax(&self, offset: usize, message: impl std::fmt::Display) -> ParseError {
        let (line, column) = byte_offset_to_position(&self.line_index, offset);
        ParseError::Syntax {
            line,
            column,
            message: message.to_string(),
        }
    }

    fn unknown_element(&self, element: String, offset: usize) -> ParseError {
        let (line, _) = byte_offset_to_position(&self.line_index, offset);
        ParseError::UnknownElement { element, line }
    }
}

/// The event shapes the `.ts` grammar distinguishes.
enum ParsedEvent {
    Start(String, BytesStart<'static>),
    Empty(String, BytesStart<'static>),
    End,
    Text(String),
    Eof,
    Ignorable,
}
