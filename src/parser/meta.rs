//! Section metadata helpers: YAML frontmatter and the preamble's top-level heading.

use gray_matter::{Matter, engine::YAML};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::models::SectionMeta;

/// Split optional YAML frontmatter from a section document.
///
/// A leading `---` block only counts as frontmatter when it holds a YAML mapping and
/// none of its lines starts with `delimiter`. Anything else is a stray separator and
/// the document is returned unchanged with empty metadata.
pub fn split_frontmatter(raw: &str, delimiter: &str) -> (SectionMeta, String) {
    let untouched = || (SectionMeta::default(), raw.to_string());
    if !frontmatter_block(raw).is_some_and(|block| is_metadata_block(block, delimiter)) {
        return untouched();
    }

    let matter = Matter::<YAML>::new();
    let Ok(parsed) = matter.parse(raw) else {
        return untouched();
    };

    let meta: SectionMeta = parsed
        .data
        .and_then(|yaml| serde_yaml::from_value::<SectionMeta>(yaml).ok())
        .unwrap_or_default();

    (meta, parsed.content)
}

/// Text between an opening `---` line and the next `---` line.
fn frontmatter_block(raw: &str) -> Option<&str> {
    let mut lines = raw.split_inclusive('\n');
    let opening = lines.next()?;
    if opening.trim_end() != "---" {
        return None;
    }

    let start = opening.len();
    let mut end = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some(&raw[start..end]);
        }
        end += line.len();
    }
    None
}

fn is_metadata_block(block: &str, delimiter: &str) -> bool {
    if !delimiter.is_empty() && block.lines().any(|line| line.starts_with(delimiter)) {
        return false;
    }
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(block),
        Ok(serde_yaml::Value::Mapping(_))
    )
}

/// First level-one heading in a markdown fragment.
pub fn extract_title(fragment: &str) -> Option<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    let parser = Parser::new_ext(fragment, options);
    let mut in_title = false;
    let mut title = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => {
                in_title = true;
                title.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if in_title && !title.trim().is_empty() {
                    return Some(title.trim().to_string());
                }
                in_title = false;
            }
            Event::Text(text) | Event::Code(text) if in_title => {
                title.push_str(&text);
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_frontmatter_fields() {
        let raw = "---\ntitle: Explore Our Programmes\nsubtitle: A diverse range.\n---\n## B.Tech\n";
        let (meta, body) = split_frontmatter(raw, "## ");
        assert_eq!(meta.title.as_deref(), Some("Explore Our Programmes"));
        assert_eq!(meta.subtitle.as_deref(), Some("A diverse range."));
        assert!(body.contains("## B.Tech"));
        assert!(!body.contains("subtitle:"));
    }

    #[test]
    fn leaves_documents_without_frontmatter_intact() {
        let raw = "## Library\nBooks.\n";
        let (meta, body) = split_frontmatter(raw, "## ");
        assert_eq!(meta, SectionMeta::default());
        assert!(body.contains("## Library"));
    }

    #[test]
    fn stray_separator_blocks_are_not_frontmatter() {
        let raw = "---\n## Library\nBooks and journals.\n---\n## Sports\nCricket.\n";
        let (meta, body) = split_frontmatter(raw, "## ");
        assert_eq!(meta, SectionMeta::default());
        assert_eq!(body, raw);

        let prose = "---\nJust a sentence.\n---\n## Sports\n";
        assert_eq!(split_frontmatter(prose, "## ").1, prose);
    }

    #[test]
    fn unterminated_opening_separator_is_kept() {
        let raw = "---\ntitle: Dangling\n## Library\n";
        assert_eq!(split_frontmatter(raw, "## ").1, raw);
    }

    #[test]
    fn extracts_first_level_one_heading() {
        assert_eq!(
            extract_title("Intro\n\n# Experience *Campus* Life\n\n# Second"),
            Some("Experience Campus Life".to_string())
        );
        assert_eq!(extract_title("## Not a title"), None);
    }
}
