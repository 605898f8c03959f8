//! Line classifier turning a section document into [`SectionRecord`]s.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::labels::{LabelTable, LabelTarget};
use crate::models::SectionRecord;

/// Marker that turns a line into a list entry while in items mode.
pub const BULLET_MARKER: &str = "- ";

/// UTF-8 byte order mark some editors put at the start of a file.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

fn separator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-{3,}$").expect("invalid separator regex"))
}

/// Returns true for horizontal-rule style lines made of three or more `-`.
pub fn is_separator(line: &str) -> bool {
    separator_pattern().is_match(line.trim())
}

/// Split `raw` into chunks at lines starting with `delimiter` and classify each chunk.
///
/// Text before the first delimiter line is a preamble and never becomes a record.
/// Chunks whose heading is blank are dropped together with their body. The parser
/// never fails: unrecognised lines are skipped according to the current mode.
pub fn parse_sections(raw: &str, delimiter: &str, labels: &LabelTable) -> Vec<SectionRecord> {
    if delimiter.is_empty() {
        return Vec::new();
    }
    let raw = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw);

    let mut records = Vec::new();
    let mut current: Option<ChunkState> = None;

    for line in raw.lines() {
        if let Some(heading) = line.strip_prefix(delimiter) {
            if let Some(record) = current.take().and_then(ChunkState::finish) {
                records.push(record);
            }
            current = Some(ChunkState::new(heading.trim()));
            continue;
        }

        if let Some(chunk) = current.as_mut() {
            chunk.accept(line, labels);
        }
    }

    if let Some(record) = current.and_then(ChunkState::finish) {
        records.push(record);
    }

    records
}

/// Text preceding the first delimiter line.
pub fn preamble<'a>(raw: &'a str, delimiter: &str) -> &'a str {
    if delimiter.is_empty() {
        return raw;
    }

    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        if line.starts_with(delimiter) {
            return &raw[..offset];
        }
        offset += line.len();
    }
    raw
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    None,
    Intro,
    Items,
    Note,
    Field(String),
}

struct ChunkState {
    heading: String,
    mode: Mode,
    intro: String,
    items: Vec<String>,
    note: String,
    fields: BTreeMap<String, String>,
}

impl ChunkState {
    fn new(heading: &str) -> Self {
        Self {
            heading: heading.to_string(),
            mode: Mode::None,
            intro: String::new(),
            items: Vec::new(),
            note: String::new(),
            fields: BTreeMap::new(),
        }
    }

    fn accept(&mut self, line: &str, labels: &LabelTable) {
        let line = line.trim();
        if line.is_empty() || is_separator(line) {
            return;
        }

        if let Some((target, rest)) = labels.match_line(line) {
            self.switch(target, rest);
            return;
        }

        let bullet = line.strip_prefix(BULLET_MARKER).map(str::trim);
        match (&self.mode, bullet) {
            (Mode::Items, Some(item)) => {
                if !item.is_empty() {
                    self.items.push(item.to_string());
                }
            }
            (Mode::Items, None) => {}
            (Mode::Note, _) => append_prose(&mut self.note, line),
            (Mode::Intro | Mode::None, None) => append_prose(&mut self.intro, line),
            (Mode::Field(name), None) => {
                let value = self.fields.entry(name.clone()).or_default();
                append_prose(value, line);
            }
            // Bullets outside items and note modes have nowhere to go.
            (Mode::Intro | Mode::None | Mode::Field(_), Some(_)) => {}
        }
    }

    fn switch(&mut self, target: &LabelTarget, rest: &str) {
        match target {
            LabelTarget::Intro => {
                self.mode = Mode::Intro;
                append_prose(&mut self.intro, rest);
            }
            LabelTarget::Items => self.mode = Mode::Items,
            LabelTarget::Note => {
                self.mode = Mode::Note;
                append_prose(&mut self.note, rest);
            }
            LabelTarget::Field(name) => {
                self.mode = Mode::Field(name.clone());
                let value = self.fields.entry(name.clone()).or_default();
                append_prose(value, rest);
            }
        }
    }

    fn finish(self) -> Option<SectionRecord> {
        if self.heading.is_empty() {
            return None;
        }

        let fields = self
            .fields
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect();

        Some(SectionRecord {
            heading: self.heading,
            intro: self.intro,
            items: self.items,
            note: (!self.note.is_empty()).then_some(self.note),
            fields,
            resolved_asset_url: None,
        })
    }
}

fn append_prose(target: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}
