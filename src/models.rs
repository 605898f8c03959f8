//! Data structures produced while resolving section content for a college page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One structured content block parsed from a section's source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
  /// Subsection title, never empty for parsed records.
  pub heading: String,
  /// Lead paragraph assembled from labeled or unlabeled prose lines.
  #[serde(default)]
  pub intro: String,
  /// Bulleted entries in source line order.
  #[serde(default)]
  pub items: Vec<String>,
  /// Trailing remarks, concatenated across contiguous lines.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note: Option<String>,
  /// Values captured by section-specific field labels such as `Duration`.
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub fields: BTreeMap<String, String>,
  /// Asset URL filled in once a candidate has been found.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resolved_asset_url: Option<String>,
}

impl SectionRecord {
  /// Create a heading-only record.
  pub fn new(heading: impl Into<String>) -> Self {
    Self {
      heading: heading.into(),
      ..Self::default()
    }
  }

  /// Returns true when the record carries nothing beyond its heading.
  pub fn is_heading_only(&self) -> bool {
    self.intro.is_empty() && self.items.is_empty() && self.note.is_none() && self.fields.is_empty()
  }
}

/// A single path and extension combination to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCandidate {
  /// Path without extension, e.g. `/acme/campuslife/library`.
  pub base_path: String,
  /// Extension without the leading dot.
  pub extension: String,
}

impl AssetCandidate {
  /// Full URL path for the candidate.
  pub fn url(&self) -> String {
    format!("{}.{}", self.base_path, self.extension)
  }
}

/// Outcome of probing every candidate for one base path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
  /// Whether any candidate proved resolvable.
  pub found: bool,
  /// URL of the first resolvable candidate in preference order, empty otherwise.
  pub url: String,
}

impl ResolutionResult {
  /// Result for a resolvable candidate.
  pub fn found(url: impl Into<String>) -> Self {
    Self {
      found: true,
      url: url.into(),
    }
  }

  /// Result when no candidate resolved.
  pub fn not_found() -> Self {
    Self::default()
  }

  /// Borrow the URL when the resolution succeeded.
  pub fn as_url(&self) -> Option<&str> {
    self.found.then_some(self.url.as_str())
  }
}

/// Where the records of a bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
  /// The college's own section document.
  CollegeSpecific,
  /// The shared default section document.
  Default,
  /// Records shipped with the loader configuration.
  BuiltinFallback,
}

impl std::fmt::Display for Provenance {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let label = match self {
      Self::CollegeSpecific => "college-specific",
      Self::Default => "default",
      Self::BuiltinFallback => "builtin-fallback",
    };
    f.write_str(label)
  }
}

/// Optional descriptive metadata found in a section document's preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SectionMeta {
  /// Section title, from frontmatter or the first top-level heading.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  /// Short description rendered under the section title.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub subtitle: Option<String>,
}

/// Ordered records for one section, tagged with where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionContentBundle {
  /// Section key the bundle was loaded for.
  pub section: String,
  /// Provenance of the records.
  pub source: Provenance,
  /// Metadata from the source preamble, empty for the built-in set.
  pub meta: SectionMeta,
  /// Records in source order.
  pub records: Vec<SectionRecord>,
}

/// Named single asset resolved for a college, such as its logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandingAsset {
  /// Configured asset name.
  pub name: String,
  /// Resolution outcome.
  pub resolution: ResolutionResult,
}

/// Everything a landing page needs, in configuration order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
  /// College identifier from the route.
  pub college_id: String,
  /// Display name resolved through the lookup table.
  pub display_name: String,
  /// Branding assets such as the hero background and logo.
  pub branding: Vec<BrandingAsset>,
  /// Section bundles.
  pub sections: Vec<SectionContentBundle>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn candidate_url_joins_with_dot() {
    let candidate = AssetCandidate {
      base_path: "/acme/campuslife/library".into(),
      extension: "png".into(),
    };
    assert_eq!(candidate.url(), "/acme/campuslife/library.png");
  }

  #[test]
  fn not_found_result_is_never_partially_filled() {
    let result = ResolutionResult::not_found();
    assert!(!result.found);
    assert!(result.url.is_empty());
    assert_eq!(result.as_url(), None);
  }

  #[test]
  fn provenance_serialises_in_kebab_case() {
    let json = serde_json::to_string(&Provenance::BuiltinFallback).expect("serialise provenance");
    assert_eq!(json, "\"builtin-fallback\"");
    assert_eq!(Provenance::CollegeSpecific.to_string(), "college-specific");
  }

  #[test]
  fn record_omits_absent_optionals() {
    let record = SectionRecord::new("Library");
    let json = serde_json::to_value(&record).expect("serialise record");
    assert!(json.get("note").is_none());
    assert!(json.get("resolvedAssetUrl").is_none());
    assert!(record.is_heading_only());
  }
}
