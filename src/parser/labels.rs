//! Declarative label table mapping `**Label:**` prefixes to output fields.

use serde::{Deserialize, Serialize};

/// Where the text following a label goes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelTarget {
    /// Seeds the record's intro; following prose lines continue it.
    Intro,
    /// Starts the bullet list; the label line itself produces nothing.
    Items,
    /// Seeds the trailing note; following lines, bullets included, continue it.
    Note,
    /// Seeds a named field such as `duration`.
    Field(String),
}

/// One label string and the field it feeds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabelRule {
    /// Label text without markup or colon, e.g. `Key Features`.
    pub label: String,
    /// Output field for the label.
    pub target: LabelTarget,
}

impl LabelRule {
    /// Create a rule.
    pub fn new(label: impl Into<String>, target: LabelTarget) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }
}

/// Ordered set of label rules for one section schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LabelTable {
    rules: Vec<LabelRule>,
}

impl LabelTable {
    /// Build a table from rules.
    pub fn new(rules: Vec<LabelRule>) -> Self {
        Self { rules }
    }

    /// Match a trimmed line against the table.
    ///
    /// Accepts `**Label:**`, `**Label**:` and bare `Label:` at the start of the line.
    /// When several labels match, the longest one wins so `Notes` never shadows
    /// `Additional Notes`. Returns the target and the trimmed remainder of the line.
    pub fn match_line<'l>(&self, line: &'l str) -> Option<(&LabelTarget, &'l str)> {
        let mut best: Option<(&LabelRule, &'l str)> = None;

        for rule in &self.rules {
            let Some(rest) = strip_label(line, &rule.label) else {
                continue;
            };
            let longer = best.is_none_or(|(current, _)| rule.label.len() > current.label.len());
            if longer {
                best = Some((rule, rest));
            }
        }

        best.map(|(rule, rest)| (&rule.target, rest.trim()))
    }
}

fn strip_label<'l>(line: &'l str, label: &str) -> Option<&'l str> {
    if label.trim().is_empty() {
        return None;
    }

    if let Some(inner) = line.strip_prefix("**") {
        let after = inner.strip_prefix(label)?;
        return after
            .strip_prefix(":**")
            .or_else(|| after.strip_prefix("**:"));
    }

    line.strip_prefix(label)?.strip_prefix(':')
}
