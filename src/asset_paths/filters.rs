use regex::Regex;

fn external_reference_patterns() -> &'static [Regex] {
    use std::sync::OnceLock;

    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            vec![
                Regex::new(r"(?i)^https?://").expect("invalid http(s) regex"),
                Regex::new(r"(?i)^data:").expect("invalid data URI regex"),
                Regex::new(r"^//").expect("invalid protocol-relative regex"),
            ]
        })
        .as_slice()
}

/// Determine whether an asset reference already names a complete URL.
///
/// Such references are used as they are instead of being expanded into candidates
/// under the college's asset folder.
pub fn is_external_reference(value: &str) -> bool {
    let value = value.trim();
    external_reference_patterns()
        .iter()
        .any(|pattern| pattern.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::is_external_reference;

    #[test]
    fn detects_http_urls() {
        assert!(is_external_reference("https://cdn.example.com/logo.svg"));
        assert!(is_external_reference("HTTP://example.com/a.png"));
    }

    #[test]
    fn detects_data_uris_and_protocol_relative_urls() {
        assert!(is_external_reference("data:image/png;base64,abc"));
        assert!(is_external_reference("//cdn.example.com/a.png"));
    }

    #[test]
    fn keeps_resource_names() {
        assert!(!is_external_reference("library"));
        assert!(!is_external_reference("/acme/campuslife/library"));
    }
}
