/// Path of a section document for a college, e.g. `/acme/eligibility.md`.
///
/// The shared default document uses the reserved default college id in place of a
/// real one, so both lookups go through the same function.
pub fn section_source_path(college_id: &str, section_key: &str) -> String {
    format!("{}.md", join_segments(&[college_id, section_key]))
}

/// Base path (no extension) of an asset, e.g. `/acme/campuslife/library`.
pub fn asset_base_path(college_id: &str, section_key: &str, resource_name: &str) -> String {
    join_segments(&[college_id, section_key, resource_name])
}

/// Turn a heading into a resource name: lowercase ASCII alphanumerics separated by `-`.
pub fn slugify(value: &str) -> String {
    let mut slug = value
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>();

    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }

    slug.trim_matches('-').to_string()
}

/// Join path segments with forward slashes behind a single leading slash.
///
/// Segments are trimmed of surrounding slashes and backslashes are normalised so
/// identifiers taken from a route never produce `//` or platform separators.
fn join_segments(segments: &[&str]) -> String {
    let mut path = String::new();
    for segment in segments {
        let cleaned = segment.replace('\\', "/");
        let cleaned = cleaned.trim_matches('/');
        if cleaned.is_empty() {
            continue;
        }
        path.push('/');
        path.push_str(cleaned);
    }
    path
}
