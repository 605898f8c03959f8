use std::collections::BTreeSet;

use crate::models::AssetCandidate;

/// Expand a base path into one candidate per extension, in caller preference order.
///
/// Extensions may be given with or without a leading dot. Blank and repeated
/// extensions are dropped so the same URL is never probed twice; the first occurrence
/// keeps its position.
pub fn generate_asset_candidates<S: AsRef<str>>(
    base_path: &str,
    extensions: &[S],
) -> Vec<AssetCandidate> {
    if base_path.trim().is_empty() {
        return Vec::new();
    }

    let mut builder = CandidateBuilder::new(base_path);
    for extension in extensions {
        builder.push(extension.as_ref());
    }
    builder.finish()
}

struct CandidateBuilder<'a> {
    base_path: &'a str,
    seen: BTreeSet<String>,
    result: Vec<AssetCandidate>,
}

impl<'a> CandidateBuilder<'a> {
    fn new(base_path: &'a str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('.'),
            seen: BTreeSet::new(),
            result: Vec::new(),
        }
    }

    fn push(&mut self, extension: &str) {
        let cleaned = extension.trim().trim_start_matches('.');
        if cleaned.is_empty() {
            return;
        }
        if self.seen.insert(cleaned.to_ascii_lowercase()) {
            self.result.push(AssetCandidate {
                base_path: self.base_path.to_string(),
                extension: cleaned.to_string(),
            });
        }
    }

    fn finish(self) -> Vec<AssetCandidate> {
        self.result
    }
}
