//! Uniform "fetch text / check existence" capability over a static origin.
//!
//! The loader and resolver only see [`ContentSource`]. Implementations exist for a
//! remote HTTP origin, a local static assets directory and an in-memory map used in
//! tests and demos.

mod http;
mod memory;
mod static_dir;

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;

pub use http::HttpSource;
pub use memory::MemorySource;
pub use static_dir::StaticDirSource;

/// Origin serving section documents, lookup tables and assets by URL path.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the text body at `path`, failing on non-success status or transport errors.
    async fn fetch_text(&self, path: &str) -> Result<String>;

    /// Returns true when the resource at `path` exists and can be loaded.
    ///
    /// Implementations never fail; every error counts as "does not exist".
    async fn exists(&self, path: &str) -> bool;
}

#[async_trait]
impl<T: ContentSource + ?Sized> ContentSource for Arc<T> {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        (**self).fetch_text(path).await
    }

    async fn exists(&self, path: &str) -> bool {
        (**self).exists(path).await
    }
}

/// Pick a source for an origin string: HTTP(S) URLs go over the network, anything
/// else is treated as a local static directory.
pub fn from_origin(origin: &str) -> Arc<dyn ContentSource> {
    let lower = origin.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Arc::new(HttpSource::new(origin))
    } else {
        Arc::new(StaticDirSource::new(origin))
    }
}
