use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::ContentSource;
use crate::{ContentError, Result};

#[derive(Debug, Clone, Default)]
struct Entry {
    body: Option<String>,
    delay: Duration,
    hang: bool,
}

/// In-memory origin with optional per-path latency.
///
/// Paths not registered behave like a 404. A path marked with [`MemorySource::hang`]
/// never answers, which lets callers exercise their timeouts.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, Entry>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `path`.
    pub fn with_text(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.entries.entry(path.into()).or_default().body = Some(body.into());
        self
    }

    /// Serve an (empty) asset at `path`.
    pub fn with_asset(self, path: impl Into<String>) -> Self {
        self.with_text(path, "")
    }

    /// Delay every answer for `path`, whether or not it exists.
    pub fn with_delay(mut self, path: impl Into<String>, delay: Duration) -> Self {
        self.entries.entry(path.into()).or_default().delay = delay;
        self
    }

    /// Never answer requests for `path`.
    pub fn hang(mut self, path: impl Into<String>) -> Self {
        self.entries.entry(path.into()).or_default().hang = true;
        self
    }

    /// Paths requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    async fn answer(&self, path: &str) -> Option<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(path.to_string());
        }

        let entry = self.entries.get(path).cloned().unwrap_or_default();
        if entry.hang {
            std::future::pending::<()>().await;
        }
        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }
        entry.body
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        self.answer(path)
            .await
            .ok_or_else(|| ContentError::unavailable(path, "404 Not Found"))
    }

    async fn exists(&self, path: &str) -> bool {
        self.answer(path).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_paths_only() {
        let source = MemorySource::new()
            .with_text("/default/programs.md", "## BBA")
            .with_asset("/acme/logo/logo.png");

        assert_eq!(
            source
                .fetch_text("/default/programs.md")
                .await
                .expect("registered text"),
            "## BBA"
        );
        assert!(source.exists("/acme/logo/logo.png").await);
        assert!(!source.exists("/acme/logo/logo.svg").await);
        assert!(source.fetch_text("/acme/programs.md").await.is_err());
        assert_eq!(source.requests().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn delays_answers() {
        let source = MemorySource::new()
            .with_asset("/slow.png")
            .with_delay("/slow.png", Duration::from_millis(300));

        let started = tokio::time::Instant::now();
        assert!(source.exists("/slow.png").await);
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
