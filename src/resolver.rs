//! Asset resolver probing candidate extensions concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::join_all;
use tracing::debug;

use crate::asset_paths::generate_asset_candidates;
use crate::models::ResolutionResult;
use crate::source::ContentSource;

/// Default bound on a single candidate probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2500);

type CacheKey = (String, Vec<String>);

/// Finds which of several candidate files exists for a base path.
///
/// Every candidate is probed at once and each probe carries its own timeout. The
/// winner is the candidate listed first among those that answered, never the one
/// that answered first.
#[derive(Clone)]
pub struct AssetResolver {
  source: Arc<dyn ContentSource>,
  cache: Option<Arc<Mutex<HashMap<CacheKey, String>>>>,
}

impl AssetResolver {
  /// Create a resolver without a cache.
  pub fn new(source: Arc<dyn ContentSource>) -> Self {
    Self {
      source,
      cache: None,
    }
  }

  /// Remember found URLs per base path and extension list.
  ///
  /// Only hits are stored; a miss may be a timeout and is probed again next time.
  pub fn with_cache(mut self) -> Self {
    self.cache = Some(Arc::new(Mutex::new(HashMap::new())));
    self
  }

  /// Probe `base_path` with each extension and return the preferred hit.
  pub async fn resolve<S: AsRef<str>>(
    &self,
    base_path: &str,
    extensions: &[S],
    timeout: Duration,
  ) -> ResolutionResult {
    let candidates = generate_asset_candidates(base_path, extensions);
    if candidates.is_empty() {
      return ResolutionResult::not_found();
    }

    let key: CacheKey = (
      base_path.to_string(),
      candidates.iter().map(|c| c.extension.clone()).collect(),
    );
    if let Some(url) = self.cached(&key) {
      debug!(base_path, url = %url, "asset resolved from cache");
      return ResolutionResult::found(url);
    }

    let probes = candidates.iter().map(|candidate| {
      let url = candidate.url();
      async move {
        let exists = matches!(
          tokio::time::timeout(timeout, self.source.exists(&url)).await,
          Ok(true)
        );
        debug!(url = %url, exists, "probed asset candidate");
        (url, exists)
      }
    });
    let outcomes = join_all(probes).await;

    match outcomes.into_iter().find(|(_, exists)| *exists) {
      Some((url, _)) => {
        self.remember(key, &url);
        ResolutionResult::found(url)
      }
      None => {
        debug!(base_path, "no asset candidate resolved");
        ResolutionResult::not_found()
      }
    }
  }

  fn cached(&self, key: &CacheKey) -> Option<String> {
    let cache = self.cache.as_ref()?;
    let guard = cache.lock().ok()?;
    guard.get(key).cloned()
  }

  fn remember(&self, key: CacheKey, url: &str) {
    let Some(cache) = &self.cache else {
      return;
    };
    if let Ok(mut guard) = cache.lock() {
      guard.entry(key).or_insert_with(|| url.to_string());
    }
  }
}
