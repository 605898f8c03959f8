use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::ContentSource;
use crate::{ContentError, Result};

/// Source serving files from a local static assets directory.
///
/// URL paths map onto the directory (`/acme/logo/logo.png` becomes
/// `<root>/acme/logo/logo.png`). Paths that would escape the root are rejected.
#[derive(Debug, Clone)]
pub struct StaticDirSource {
    root: PathBuf,
}

impl StaticDirSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem location for a URL path, or `None` when it leaves the root.
    pub fn file_path(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(resolved)
    }
}

#[async_trait]
impl ContentSource for StaticDirSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let file = self
            .file_path(path)
            .ok_or_else(|| ContentError::unavailable(path, "path escapes the static root"))?;

        tokio::fs::read_to_string(&file)
            .await
            .map_err(|e| ContentError::unavailable(path, e))
    }

    async fn exists(&self, path: &str) -> bool {
        let Some(file) = self.file_path(path) else {
            debug!("rejecting probe outside static root: {}", path);
            return false;
        };
        tokio::fs::metadata(&file)
            .await
            .is_ok_and(|metadata| metadata.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_documents_and_probes_files() -> std::io::Result<()> {
        let temp = tempdir()?;
        std::fs::create_dir_all(temp.path().join("acme/logo"))?;
        std::fs::write(temp.path().join("acme/programs.md"), "## BBA\n")?;
        std::fs::write(temp.path().join("acme/logo/logo.png"), b"png")?;

        let source = StaticDirSource::new(temp.path());
        let body = source
            .fetch_text("/acme/programs.md")
            .await
            .expect("document should be read");
        assert_eq!(body, "## BBA\n");
        assert!(source.exists("/acme/logo/logo.png").await);
        assert!(!source.exists("/acme/logo/logo.svg").await);
        assert!(!source.exists("/acme/logo").await);
        Ok(())
    }

    #[tokio::test]
    async fn missing_documents_are_unavailable() {
        let temp = tempdir().expect("failed to create temp dir");
        let source = StaticDirSource::new(temp.path());
        let err = source
            .fetch_text("/ghost/programs.md")
            .await
            .expect_err("missing file should fail");
        assert!(matches!(err, ContentError::SourceUnavailable { .. }));
    }

    #[test]
    fn rejects_parent_traversal() {
        let source = StaticDirSource::new("/srv/public");
        assert_eq!(source.file_path("/../etc/passwd"), None);
        assert_eq!(
            source.file_path("/acme/./logo/logo.png"),
            Some(PathBuf::from("/srv/public/acme/logo/logo.png"))
        );
    }
}
