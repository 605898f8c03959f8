//! Content loader: fetch, parse and enrich a section with a three-step fallback chain.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::asset_paths::{asset_base_path, is_external_reference, section_source_path, slugify};
use crate::config::{AssetNaming, AssetRule, BrandingSpec, ContentConfig, SectionSchema};
use crate::directory::CollegeDirectory;
use crate::models::{
  BrandingAsset, PageContent, Provenance, ResolutionResult, SectionContentBundle, SectionMeta,
  SectionRecord,
};
use crate::parser::{ParsedSection, SectionContentParser};
use crate::resolver::AssetResolver;
use crate::source::ContentSource;
use crate::{ContentError, Result};

/// Composition root turning a college id and section key into renderable content.
///
/// [`ContentLoader::load`] never fails. The college document is tried first, then the
/// shared default document, then the configured built-in records.
pub struct ContentLoader {
  source: Arc<dyn ContentSource>,
  resolver: AssetResolver,
  directory: CollegeDirectory,
  config: ContentConfig,
}

impl ContentLoader {
  /// Create a loader over `source` using `config` for schemas and fallbacks.
  pub fn new(source: Arc<dyn ContentSource>, config: ContentConfig) -> Self {
    let mut resolver = AssetResolver::new(source.clone());
    if config.cache_assets {
      resolver = resolver.with_cache();
    }
    let directory = CollegeDirectory::new(
      source.clone(),
      config.college_names_path.clone(),
      config.default_college.clone(),
      config.default_display_name.clone(),
      config.source_timeout(),
    );

    Self {
      source,
      resolver,
      directory,
      config,
    }
  }

  /// Configuration the loader was built with.
  pub fn config(&self) -> &ContentConfig {
    &self.config
  }

  /// Load one section for a college.
  pub async fn load(&self, college_id: &str, section_key: &str) -> SectionContentBundle {
    let schema = match self.config.section(section_key) {
      Some(schema) => schema.clone(),
      None => {
        warn!(section = section_key, "no schema configured, parsing with defaults");
        SectionSchema::bare(section_key)
      }
    };
    let parser = schema.parser();
    let default_college = self.config.default_college.as_str();

    let mut attempts = Vec::with_capacity(2);
    if !college_id.trim().is_empty() && college_id != default_college {
      attempts.push((college_id, Provenance::CollegeSpecific));
    }
    attempts.push((default_college, Provenance::Default));

    for (owner, provenance) in attempts {
      let path = section_source_path(owner, section_key);
      match self.fetch_parsed(&path, &parser).await {
        Ok(parsed) => {
          let records = self.enrich(college_id, &schema, parsed.records).await;
          info!(
            college = college_id,
            section = section_key,
            source = %provenance,
            records = records.len(),
            "section content loaded"
          );
          return SectionContentBundle {
            section: section_key.to_string(),
            source: provenance,
            meta: parsed.meta,
            records,
          };
        }
        Err(err) => warn!(college = college_id, section = section_key, "{}", err),
      }
    }

    info!(
      college = college_id,
      section = section_key,
      records = schema.fallback.len(),
      "using built-in section content"
    );
    SectionContentBundle {
      section: section_key.to_string(),
      source: Provenance::BuiltinFallback,
      meta: SectionMeta::default(),
      records: schema.fallback,
    }
  }

  /// Resolve a configured branding asset (e.g. `logo`) for a college.
  ///
  /// Returns `None` when no branding asset with that name is configured.
  pub async fn resolve_branding(&self, college_id: &str, name: &str) -> Option<ResolutionResult> {
    let spec = self.config.branding_spec(name)?;
    Some(self.resolve_branding_spec(college_id, spec).await)
  }

  /// Display name for a college from the lookup table.
  pub async fn display_name(&self, college_id: &str) -> String {
    self.directory.display_name(college_id).await
  }

  /// Load every configured section, the display name and the branding assets at once.
  pub async fn load_page(&self, college_id: &str) -> PageContent {
    let sections = join_all(
      self
        .config
        .sections
        .iter()
        .map(|schema| self.load(college_id, &schema.key)),
    );
    let branding = join_all(self.config.branding.iter().map(|spec| async move {
      BrandingAsset {
        name: spec.name.clone(),
        resolution: self.resolve_branding_spec(college_id, spec).await,
      }
    }));
    let (display_name, sections, branding) =
      futures::join!(self.display_name(college_id), sections, branding);

    PageContent {
      college_id: college_id.to_string(),
      display_name,
      branding,
      sections,
    }
  }

  async fn fetch_parsed(&self, path: &str, parser: &SectionContentParser) -> Result<ParsedSection> {
    let body = tokio::time::timeout(self.config.source_timeout(), self.source.fetch_text(path))
      .await
      .map_err(|_| ContentError::unavailable(path, "timed out"))??;

    let parsed = parser.parse_document(&body);
    if parsed.records.is_empty() {
      return Err(ContentError::EmptyParse {
        path: path.to_string(),
      });
    }
    debug!(path, records = parsed.records.len(), "parsed section document");
    Ok(parsed)
  }

  async fn enrich(
    &self,
    college_id: &str,
    schema: &SectionSchema,
    records: Vec<SectionRecord>,
  ) -> Vec<SectionRecord> {
    let Some(rule) = &schema.asset else {
      return records;
    };

    let urls = join_all(
      records
        .iter()
        .map(|record| self.resolve_record_asset(college_id, &schema.key, rule, record)),
    )
    .await;

    records
      .into_iter()
      .zip(urls)
      .map(|(mut record, url)| {
        record.resolved_asset_url = url;
        record
      })
      .collect()
  }

  async fn resolve_record_asset(
    &self,
    college_id: &str,
    section_key: &str,
    rule: &AssetRule,
    record: &SectionRecord,
  ) -> Option<String> {
    let resource = match &rule.naming {
      AssetNaming::HeadingSlug => slugify(&record.heading),
      AssetNaming::Field(name) => {
        let value = record.fields.get(name)?.trim();
        if is_external_reference(value) {
          return Some(value.to_string());
        }
        value.trim_matches('/').to_string()
      }
      AssetNaming::Fixed(name) => name.clone(),
    };
    if resource.is_empty() {
      return None;
    }

    let result = self
      .resolve_with_default(college_id, section_key, &resource, &rule.extensions)
      .await;
    result.as_url().map(str::to_string)
  }

  async fn resolve_branding_spec(&self, college_id: &str, spec: &BrandingSpec) -> ResolutionResult {
    self
      .resolve_with_default(college_id, &spec.folder, &spec.resource, &spec.extensions)
      .await
  }

  /// Resolve under the college folder, then under the shared default folder.
  async fn resolve_with_default(
    &self,
    college_id: &str,
    folder: &str,
    resource: &str,
    extensions: &[String],
  ) -> ResolutionResult {
    let timeout = self.config.probe_timeout();
    let default_college = self.config.default_college.as_str();

    let mut owners = Vec::with_capacity(2);
    if !college_id.trim().is_empty() && college_id != default_college {
      owners.push(college_id);
    }
    owners.push(default_college);

    for owner in owners {
      let base_path = asset_base_path(owner, folder, resource);
      let result = self.resolver.resolve(&base_path, extensions, timeout).await;
      if result.found {
        return result;
      }
      debug!("{}", ContentError::AssetNotFound { base_path });
    }
    ResolutionResult::not_found()
  }
}
