//! Content configuration: section schemas, fallbacks, timeouts and branding assets.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::SectionRecord;
use crate::parser::{
    DEFAULT_HEADING_DELIMITER, LabelRule, LabelTable, LabelTarget, SectionContentParser,
};
use crate::{ContentError, Result};

const DEFAULT_CONFIG_FILE: &str = "college_content.config.json";

/// Extension preference for photographic content.
pub const PHOTO_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];
/// Extension preference for logos.
pub const LOGO_EXTENSIONS: [&str; 3] = ["svg", "png", "webp"];

/// Discoverable configuration describing sections, fallbacks and origin layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Reserved college id whose folder holds the shared defaults.
    pub default_college: String,
    /// Path of the flat JSON college-name lookup table.
    pub college_names_path: String,
    /// Display name used when the lookup table has no usable entry.
    pub default_display_name: String,
    /// Bound on each asset candidate probe, in milliseconds.
    pub probe_timeout_ms: u64,
    /// Bound on each section document fetch, in milliseconds.
    pub source_timeout_ms: u64,
    /// Memoise found asset URLs for the lifetime of the loader.
    pub cache_assets: bool,
    /// Section schemas in page order.
    pub sections: Vec<SectionSchema>,
    /// Named single assets such as the hero background and logo.
    pub branding: Vec<BrandingSpec>,
}

/// Parsing and asset rules for one section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SectionSchema {
    /// Section key used in source and asset paths.
    pub key: String,
    /// Marker introducing a record heading.
    #[serde(default = "default_heading_delimiter")]
    pub heading_delimiter: String,
    /// Label table for the section's documents.
    #[serde(default)]
    pub labels: LabelTable,
    /// How records of this section find their image, if they have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRule>,
    /// Records rendered when neither the college nor the default document is usable.
    #[serde(default)]
    pub fallback: Vec<SectionRecord>,
}

/// How a record's resource name is derived.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetNaming {
    /// Slug of the record heading, e.g. `state-of-the-art-library`.
    HeadingSlug,
    /// Value of a labeled field; records without the field have no asset.
    Field(String),
    /// The same resource name for every record.
    Fixed(String),
}

/// Asset lookup rule for a section's records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssetRule {
    /// Resource naming strategy.
    pub naming: AssetNaming,
    /// Extensions in preference order.
    pub extensions: Vec<String>,
}

/// A named single asset resolved per college.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BrandingSpec {
    /// Name callers use to ask for the asset.
    pub name: String,
    /// Folder under the college directory, e.g. `logo`.
    pub folder: String,
    /// Resource name without extension.
    pub resource: String,
    /// Extensions in preference order.
    pub extensions: Vec<String>,
}

fn default_heading_delimiter() -> String {
    DEFAULT_HEADING_DELIMITER.into()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_college: "default".into(),
            college_names_path: "/collegeNames.json".into(),
            default_display_name: "Our College".into(),
            probe_timeout_ms: 2500,
            source_timeout_ms: 5000,
            cache_assets: true,
            sections: default_sections(),
            branding: vec![
                BrandingSpec::new("hero", "backgroundImage", "hero", &PHOTO_EXTENSIONS),
                BrandingSpec::new("logo", "logo", "logo", &LOGO_EXTENSIONS),
            ],
        }
    }
}

impl ContentConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall back to the
    /// built-in defaults so callers always get a usable configuration.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ContentError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ContentError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Schema for a section key.
    pub fn section(&self, key: &str) -> Option<&SectionSchema> {
        self.sections.iter().find(|schema| schema.key == key)
    }

    /// Branding asset specification by name.
    pub fn branding_spec(&self, name: &str) -> Option<&BrandingSpec> {
        self.branding.iter().find(|spec| spec.name == name)
    }

    /// Per-candidate probe timeout.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.max(1))
    }

    /// Section document fetch timeout.
    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms.max(1))
    }
}

impl SectionSchema {
    /// Schema with the default delimiter and no labels, assets or fallback.
    pub fn bare(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            heading_delimiter: default_heading_delimiter(),
            labels: LabelTable::default(),
            asset: None,
            fallback: Vec::new(),
        }
    }

    /// Parser configured with this schema's delimiter and labels.
    pub fn parser(&self) -> SectionContentParser {
        SectionContentParser::new(self.heading_delimiter.clone(), self.labels.clone())
    }
}

impl AssetRule {
    fn new(naming: AssetNaming, extensions: &[&str]) -> Self {
        Self {
            naming,
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl BrandingSpec {
    fn new(name: &str, folder: &str, resource: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            folder: folder.into(),
            resource: resource.into(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

fn labels(rules: &[(&str, LabelTarget)]) -> LabelTable {
    LabelTable::new(
        rules
            .iter()
            .map(|(label, target)| LabelRule::new(*label, target.clone()))
            .collect(),
    )
}

fn record(heading: &str, intro: &str, items: &[&str], note: Option<&str>) -> SectionRecord {
    SectionRecord {
        heading: heading.into(),
        intro: intro.into(),
        items: items.iter().map(|item| item.to_string()).collect(),
        note: note.map(str::to_string),
        ..SectionRecord::default()
    }
}

fn default_sections() -> Vec<SectionSchema> {
    use LabelTarget::{Field, Intro, Items, Note};

    vec![
        SectionSchema {
            key: "programs".into(),
            heading_delimiter: default_heading_delimiter(),
            labels: labels(&[
                ("Description", Intro),
                ("Duration", Field("duration".into())),
                ("Key Features", Items),
                ("Popular Programs", Items),
                ("Additional Notes", Note),
            ]),
            asset: Some(AssetRule::new(AssetNaming::HeadingSlug, &PHOTO_EXTENSIONS)),
            fallback: vec![
                record(
                    "B.Tech in Computer Science",
                    "Algorithms, AI, software dev.",
                    &["AI/ML focus", "Labs", "Internships"],
                    None,
                ),
                record(
                    "Bachelor of Business Admin",
                    "Leadership & business acumen.",
                    &["Case-studies", "E-cell", "Global immersion"],
                    None,
                ),
            ],
        },
        SectionSchema {
            key: "eligibility".into(),
            heading_delimiter: default_heading_delimiter(),
            labels: labels(&[
                ("General Introduction", Intro),
                ("Criteria", Items),
                ("Additional Notes", Note),
            ]),
            asset: None,
            fallback: vec![
                record(
                    "Undergraduate (UG)",
                    "To be eligible for our undergraduate programmes, candidates generally need to meet the following:",
                    &[
                        "Successfully completed Higher Secondary Education (10+2) or an equivalent examination from a recognized board.",
                        "Achieved a minimum aggregate score of 50% in the qualifying examination.",
                    ],
                    Some("Age limits may apply as per university guidelines."),
                ),
                record(
                    "Postgraduate (PG)",
                    "For admission to our postgraduate programmes, the general eligibility criteria include:",
                    &[
                        "A Bachelor's degree in a relevant discipline from a recognized university with a minimum of 50% aggregate marks or equivalent CGPA.",
                    ],
                    None,
                ),
            ],
        },
        SectionSchema {
            key: "campuslife".into(),
            heading_delimiter: default_heading_delimiter(),
            labels: labels(&[("Description", Intro), ("Available Areas", Items)]),
            asset: Some(AssetRule::new(AssetNaming::HeadingSlug, &PHOTO_EXTENSIONS)),
            fallback: vec![
                record(
                    "State-of-the-Art Library",
                    "Access a vast collection of books, journals, and digital resources in a modern, quiet study environment.",
                    &[],
                    None,
                ),
                record(
                    "Vibrant Sports Culture",
                    "Engage in various sports with excellent facilities for cricket, football, basketball, and indoor games.",
                    &[],
                    None,
                ),
            ],
        },
        SectionSchema {
            key: "recruiters".into(),
            heading_delimiter: default_heading_delimiter(),
            labels: labels(&[("Description", Intro), ("Logo", Field("logo".into()))]),
            asset: Some(AssetRule::new(
                AssetNaming::Field("logo".into()),
                &LOGO_EXTENSIONS,
            )),
            fallback: vec![
                record("Tech Solutions Inc.", "", &[], None),
                record("Innovate Corp", "", &[], None),
                record("Global Ventures", "", &[], None),
            ],
        },
        SectionSchema {
            key: "whychooseus".into(),
            heading_delimiter: default_heading_delimiter(),
            labels: labels(&[("Description", Intro), ("Highlights", Items)]),
            asset: None,
            fallback: vec![
                record(
                    "Experienced & Dedicated Faculty",
                    "Learn from seasoned academics and industry experts committed to your success and mentorship.",
                    &[],
                    None,
                ),
                record(
                    "Industry-Relevant Curriculum",
                    "Our programs are constantly updated to meet current industry demands and future trends.",
                    &[],
                    None,
                ),
                record(
                    "Excellent Placement Record",
                    "Benefit from our strong industry connections and dedicated placement cell for great career opportunities.",
                    &[],
                    None,
                ),
            ],
        },
        SectionSchema {
            key: "testimonials".into(),
            heading_delimiter: default_heading_delimiter(),
            labels: labels(&[("Quote", Intro), ("Program", Field("program".into()))]),
            asset: Some(AssetRule::new(AssetNaming::HeadingSlug, &PHOTO_EXTENSIONS)),
            fallback: vec![record(
                "Priya Sharma",
                "The faculty here is incredibly supportive, and the hands-on projects gave me the confidence to excel in my career.",
                &[],
                None,
            )],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_cover_every_page_section_with_fallbacks() {
        let config = ContentConfig::default();
        let keys: Vec<&str> = config.sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec![
            "programs",
            "eligibility",
            "campuslife",
            "recruiters",
            "whychooseus",
            "testimonials"
        ]);
        for schema in &config.sections {
            assert!(
                (1..=3).contains(&schema.fallback.len()),
                "{} fallback size",
                schema.key
            );
            assert!(schema.fallback.iter().all(|r| !r.heading.is_empty()));
        }
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let temp = tempdir().expect("failed to create temp dir");
        let config = ContentConfig::discover(temp.path());
        assert_eq!(config.default_college, "default");
        assert_eq!(config.probe_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn from_path_reads_partial_configuration() {
        let temp = tempdir().expect("failed to create temp dir");
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{
                "probe_timeout_ms": 800,
                "sections": [{
                    "key": "programs",
                    "labels": [{"label": "Duration", "target": {"field": "duration"}}],
                    "asset": {"naming": {"fixed": "cover"}, "extensions": ["webp"]},
                    "fallback": [{"heading": "General Studies"}]
                }]
            }"#,
        )
        .expect("failed to write config");

        let config = ContentConfig::discover(temp.path());
        assert_eq!(config.probe_timeout(), Duration::from_millis(800));
        assert_eq!(config.default_display_name, "Our College");

        let schema = config.section("programs").expect("programs schema");
        assert_eq!(schema.heading_delimiter, "## ");
        assert_eq!(
            schema.asset.as_ref().map(|rule| &rule.naming),
            Some(&AssetNaming::Fixed("cover".into()))
        );
        assert_eq!(schema.fallback[0].heading, "General Studies");
        assert!(config.section("eligibility").is_none());
    }

    #[test]
    fn from_path_reports_invalid_json() {
        let temp = tempdir().expect("failed to create temp dir");
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "{ not json").expect("failed to write config");

        let err = ContentConfig::from_path(&path).expect_err("invalid json should fail");
        assert!(matches!(err, ContentError::Config { .. }));
    }

    #[test]
    fn default_schema_parsers_use_their_labels() {
        let config = ContentConfig::default();
        let parser = config.section("eligibility").expect("schema").parser();
        let records = parser.parse("## UG\n**Criteria:**\n- 10+2\n");
        assert_eq!(records[0].items, vec!["10+2".to_string()]);
    }
}
