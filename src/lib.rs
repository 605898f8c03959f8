#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::module_inception)]

pub mod asset_paths;
pub mod config;
pub mod directory;
pub mod error;
pub mod lead;
pub mod loader;
pub mod models;
pub mod parser;
pub mod resolver;
pub mod source;

pub use config::ContentConfig;
pub use directory::CollegeDirectory;
pub use error::{ContentError, Result};
pub use lead::{LeadForm, LeadSubmission};
pub use loader::ContentLoader;
pub use models::{
  AssetCandidate, BrandingAsset, PageContent, Provenance, ResolutionResult, SectionContentBundle,
  SectionMeta, SectionRecord,
};
pub use parser::SectionContentParser;
pub use resolver::AssetResolver;
pub use source::ContentSource;
