use async_trait::async_trait;
use tracing::debug;

use super::ContentSource;
use crate::{ContentError, Result};

/// Source backed by plain GET requests against a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Creates a source rooted at `base_url`, e.g. `https://colleges.example.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Creates a source that reuses an existing client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Absolute URL for a path served by this origin.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.url_for(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ContentError::unavailable(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::unavailable(path, status));
        }

        Ok(response.text().await?)
    }

    async fn exists(&self, path: &str) -> bool {
        let url = self.url_for(path);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!("probe of {} failed: {}", url, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn joins_base_url_and_path() {
        let source = HttpSource::new("https://colleges.example.com/");
        assert_eq!(
            source.url_for("/acme/programs.md"),
            "https://colleges.example.com/acme/programs.md"
        );
    }

    #[tokio::test]
    async fn fetches_text_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/acme/programs.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("## B.Tech\n"))
            .mount(&server)
            .await;

        let source = HttpSource::new(server.uri());
        let body = source
            .fetch_text("/acme/programs.md")
            .await
            .expect("document should be fetched");
        assert_eq!(body, "## B.Tech\n");
    }

    #[tokio::test]
    async fn reports_non_success_status_as_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/acme/programs.md"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpSource::new(server.uri());
        let err = source
            .fetch_text("/acme/programs.md")
            .await
            .expect_err("404 should fail");
        assert!(matches!(err, ContentError::SourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn probes_existence_by_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/acme/logo/logo.svg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<svg/>".to_vec()))
            .mount(&server)
            .await;

        let source = HttpSource::new(server.uri());
        assert!(source.exists("/acme/logo/logo.svg").await);
        assert!(!source.exists("/acme/logo/logo.png").await);
    }
}
