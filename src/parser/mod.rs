//! Section document parsing broken into focused submodules.
//!
//! [`SectionContentParser`] couples a heading delimiter with a [`LabelTable`] and
//! turns a loosely formatted document into ordered [`SectionRecord`]s. Parsing is
//! best effort: it never fails, and input it cannot classify is dropped.

mod labels;
mod meta;
mod sections;

pub use labels::{LabelRule, LabelTable, LabelTarget};
pub use meta::{extract_title, split_frontmatter};
pub use sections::{BULLET_MARKER, BYTE_ORDER_MARK, is_separator, parse_sections, preamble};

use crate::models::{SectionMeta, SectionRecord};

/// Default marker introducing a record heading.
pub const DEFAULT_HEADING_DELIMITER: &str = "## ";

/// Records and metadata parsed from one section document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSection {
    /// Metadata from frontmatter or the preamble heading.
    pub meta: SectionMeta,
    /// Records in source order.
    pub records: Vec<SectionRecord>,
}

/// Parser configured for one section schema.
#[derive(Debug, Clone)]
pub struct SectionContentParser {
    delimiter: String,
    labels: LabelTable,
}

impl SectionContentParser {
    /// Create a parser for the given delimiter and label table.
    pub fn new(delimiter: impl Into<String>, labels: LabelTable) -> Self {
        Self {
            delimiter: delimiter.into(),
            labels,
        }
    }

    /// Parse raw text into records, ignoring any metadata.
    pub fn parse(&self, raw: &str) -> Vec<SectionRecord> {
        parse_sections(raw, &self.delimiter, &self.labels)
    }

    /// Parse a full document: frontmatter, preamble title and records.
    pub fn parse_document(&self, raw: &str) -> ParsedSection {
        let raw = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw);
        let (mut meta, body) = split_frontmatter(raw, &self.delimiter);
        if meta.title.is_none() {
            meta.title = extract_title(preamble(&body, &self.delimiter));
        }

        ParsedSection {
            meta,
            records: self.parse(&body),
        }
    }
}

impl Default for SectionContentParser {
    fn default() -> Self {
        Self::new(DEFAULT_HEADING_DELIMITER, LabelTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SectionContentParser {
        SectionContentParser::new(
            DEFAULT_HEADING_DELIMITER,
            LabelTable::new(vec![
                LabelRule::new("Key Features", LabelTarget::Items),
                LabelRule::new("Duration", LabelTarget::Field("duration".into())),
            ]),
        )
    }

    #[test]
    fn document_title_falls_back_to_preamble_heading() {
        let parsed = parser().parse_document("# Explore Our Programmes\n\n## B.Tech CSE\n**Key Features:**\n- AI/ML focus\n");
        assert_eq!(parsed.meta.title.as_deref(), Some("Explore Our Programmes"));
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].items, vec!["AI/ML focus".to_string()]);
    }

    #[test]
    fn frontmatter_title_wins_over_heading() {
        let parsed = parser().parse_document("---\ntitle: From Frontmatter\n---\n# From Heading\n## BBA\n");
        assert_eq!(parsed.meta.title.as_deref(), Some("From Frontmatter"));
        assert_eq!(parsed.records[0].heading, "BBA");
    }

    #[test]
    fn record_headings_are_never_titles() {
        let parsed = parser().parse_document("## Only Records\n# Inside a record\n");
        assert_eq!(parsed.meta.title, None);
        assert_eq!(parsed.records[0].intro, "# Inside a record");
    }

    #[test]
    fn leading_separator_pair_keeps_every_record() {
        let raw = "---\n## Library\nBooks and journals.\n---\n## Sports\nCricket.\n";
        let parsed = parser().parse_document(raw);
        let headings: Vec<&str> = parsed.records.iter().map(|r| r.heading.as_str()).collect();
        assert_eq!(headings, vec!["Library", "Sports"]);
        assert_eq!(parsed.records, parser().parse(raw));
        assert_eq!(parsed.meta, SectionMeta::default());
    }

    #[test]
    fn separator_wrapped_items_survive() {
        let parser = SectionContentParser::new(
            DEFAULT_HEADING_DELIMITER,
            LabelTable::new(vec![LabelRule::new("Criteria", LabelTarget::Items)]),
        );
        let parsed = parser.parse_document("---\n## UG\n- stray\n---\n## PG\n**Criteria:**\n- Degree\n");
        let headings: Vec<&str> = parsed.records.iter().map(|r| r.heading.as_str()).collect();
        assert_eq!(headings, vec!["UG", "PG"]);
        assert_eq!(parsed.records[1].items, vec!["Degree".to_string()]);
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let parsed = parser().parse_document("\u{FEFF}## Library\nBooks.\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].heading, "Library");

        let with_frontmatter = parser().parse_document("\u{FEFF}---\ntitle: Campus\n---\n## Library\n");
        assert_eq!(with_frontmatter.meta.title.as_deref(), Some("Campus"));
        assert_eq!(with_frontmatter.records.len(), 1);
    }

    #[test]
    fn parse_and_parse_document_agree_on_records() {
        let raw = "## Design\n**Duration:** 4 years\n";
        assert_eq!(parser().parse(raw), parser().parse_document(raw).records);
    }
}
