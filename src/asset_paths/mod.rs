//! Path conventions for section documents and per-college assets.
//!
//! Split into focused submodules so that building locations, expanding candidate
//! extensions, and filtering external references can be tested independently. The
//! resolver and the loader share the same helpers.

mod candidates;
mod filters;
mod locations;

pub use candidates::generate_asset_candidates;
pub use filters::is_external_reference;
pub use locations::{asset_base_path, section_source_path, slugify};
