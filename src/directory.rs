//! College display-name lookup table.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::warn;

use crate::source::ContentSource;
use crate::{ContentError, Result};

/// Lookup from college identifier to display name, fetched once per directory.
pub struct CollegeDirectory {
  source: Arc<dyn ContentSource>,
  path: String,
  default_key: String,
  fallback_name: String,
  timeout: Duration,
  names: OnceCell<BTreeMap<String, String>>,
}

impl CollegeDirectory {
  /// Create a directory reading the flat JSON table at `path`.
  pub fn new(
    source: Arc<dyn ContentSource>,
    path: impl Into<String>,
    default_key: impl Into<String>,
    fallback_name: impl Into<String>,
    timeout: Duration,
  ) -> Self {
    Self {
      source,
      path: path.into(),
      default_key: default_key.into(),
      fallback_name: fallback_name.into(),
      timeout,
      names: OnceCell::new(),
    }
  }

  /// Display name for `college_id`, falling back to the table's default entry and then
  /// to the configured name.
  pub async fn display_name(&self, college_id: &str) -> String {
    let names = self.names().await;
    lookup_display_name(names, college_id, &self.default_key, &self.fallback_name)
  }

  /// The lookup table, empty when it could not be fetched or parsed.
  ///
  /// The first call fetches the table; later calls reuse the outcome, failures included.
  pub async fn names(&self) -> &BTreeMap<String, String> {
    self
      .names
      .get_or_init(|| async {
        match self.fetch().await {
          Ok(names) => names,
          Err(err) => {
            warn!("college name lookup unavailable: {}", err);
            BTreeMap::new()
          }
        }
      })
      .await
  }

  async fn fetch(&self) -> Result<BTreeMap<String, String>> {
    let body = tokio::time::timeout(self.timeout, self.source.fetch_text(&self.path))
      .await
      .map_err(|_| ContentError::unavailable(&self.path, "timed out"))??;
    parse_name_table(&body).ok_or_else(|| ContentError::unavailable(&self.path, "not a JSON object"))
  }
}

/// Parse a flat JSON object, keeping only string values.
pub fn parse_name_table(body: &str) -> Option<BTreeMap<String, String>> {
  let value: serde_json::Value = serde_json::from_str(body).ok()?;
  let object = value.as_object()?;
  Some(
    object
      .iter()
      .filter_map(|(key, value)| value.as_str().map(|name| (key.clone(), name.to_string())))
      .collect(),
  )
}

/// Resolve a display name from an already loaded table. Blank entries are skipped.
pub fn lookup_display_name(
  names: &BTreeMap<String, String>,
  college_id: &str,
  default_key: &str,
  fallback_name: &str,
) -> String {
  [college_id, default_key]
    .iter()
    .filter_map(|key| names.get(*key))
    .map(|name| name.trim())
    .find(|name| !name.is_empty())
    .unwrap_or(fallback_name)
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::MemorySource;

  const TABLE: &str = r#"{"acme": "Acme Institute of Technology", "blank": " ", "default": "Partner College", "count": 3}"#;

  fn directory(source: MemorySource) -> CollegeDirectory {
    CollegeDirectory::new(
      Arc::new(source),
      "/collegeNames.json",
      "default",
      "Our College",
      Duration::from_secs(5),
    )
  }

  #[test]
  fn parses_string_entries_only() {
    let table = parse_name_table(TABLE).expect("table should parse");
    assert_eq!(table.len(), 3);
    assert!(!table.contains_key("count"));
    assert!(parse_name_table("[1, 2]").is_none());
  }

  #[test]
  fn looks_up_with_default_key_and_fallback() {
    let table = parse_name_table(TABLE).expect("table should parse");
    assert_eq!(
      lookup_display_name(&table, "acme", "default", "Our College"),
      "Acme Institute of Technology"
    );
    assert_eq!(
      lookup_display_name(&table, "ghost", "default", "Our College"),
      "Partner College"
    );
    assert_eq!(
      lookup_display_name(&table, "blank", "default", "Our College"),
      "Partner College"
    );
    assert_eq!(
      lookup_display_name(&BTreeMap::new(), "acme", "default", "Our College"),
      "Our College"
    );
  }

  #[tokio::test]
  async fn fetches_the_table_once() {
    let source = MemorySource::new().with_text("/collegeNames.json", TABLE);
    let directory = directory(source.clone());

    assert_eq!(directory.display_name("acme").await, "Acme Institute of Technology");
    assert_eq!(directory.display_name("ghost").await, "Partner College");
    assert_eq!(source.requests(), vec!["/collegeNames.json".to_string()]);
  }

  #[tokio::test]
  async fn missing_table_uses_configured_name() {
    let directory = directory(MemorySource::new());
    assert_eq!(directory.display_name("acme").await, "Our College");
  }

  #[tokio::test(start_paused = true)]
  async fn hanging_table_times_out() {
    let directory = directory(MemorySource::new().hang("/collegeNames.json"));
    assert_eq!(directory.display_name("acme").await, "Our College");
  }
}
