//! Markdown text utilities: outline (table of contents) and plain-text excerpts
//!
//! Bodies are MDX, so module lines and component tags are stripped before
//! the markdown parser sees them.

use lazy_static::lazy_static;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;

lazy_static! {
    static ref MODULE_LINE: Regex = Regex::new(r"(?m)^(?:import|export)\s.*$").unwrap();
    static ref COMPONENT_TAG: Regex = Regex::new(r"</?[A-Z][\w.]*(?:\s[^>]*)?/?>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// One heading of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub level: u8,
    pub text: String,
    /// Anchor id, unique within the document
    pub id: String,
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_MATH
        | Options::ENABLE_GFM
}

/// Drop MDX `import`/`export` lines and component tags
pub fn strip_mdx(body: &str) -> Cow<'_, str> {
    let without_modules = MODULE_LINE.replace_all(body, "");
    if COMPONENT_TAG.is_match(&without_modules) {
        Cow::Owned(COMPONENT_TAG.replace_all(&without_modules, "").into_owned())
    } else {
        without_modules
    }
}

/// Headings up to `max_depth`, in document order
pub fn outline(body: &str, max_depth: u8) -> Vec<OutlineEntry> {
    let source = strip_mdx(body);
    let mut entries = Vec::new();
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut current: Option<(u8, Option<String>, String)> = None;

    for event in Parser::new_ext(&source, parser_options()) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((level as u8, id.map(|i| i.to_string()), String::new()));
            }
            Event::Text(text) | Event::Code(text) | Event::InlineMath(text) => {
                if let Some((_, _, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((level, explicit_id, text)) = current.take() else {
                    continue;
                };
                let text = text.trim().to_string();
                if level > max_depth || text.is_empty() {
                    continue;
                }
                let base = explicit_id.unwrap_or_else(|| anchor_id(&text));
                let id = unique_id(&mut used, base);
                entries.push(OutlineEntry { level, text, id });
            }
            _ => {}
        }
    }

    entries
}

/// Body as plain text with whitespace collapsed
pub fn plain_text(body: &str) -> String {
    let source = strip_mdx(body);
    let mut text = String::new();

    for event in Parser::new_ext(&source, parser_options()) {
        match event {
            Event::Text(t) | Event::Code(t) | Event::InlineMath(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }

    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// First `max_chars` characters of the plain text
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let text = plain_text(body);
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text,
    }
}

fn anchor_id(text: &str) -> String {
    let slug = slug::slugify(text);
    if slug.is_empty() {
        text.to_string()
    } else {
        slug
    }
}

fn unique_id(used: &mut HashMap<String, usize>, base: String) -> String {
    let count = used.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{}-{}", base, *count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"import Figure from "@/components/Figure";

# Reading Walden

Some *intro* text.

<Figure src="/img/pond.png" caption="The pond" />

## Economy

### `simplicity` matters

## Economy

#### Too deep
"#;

    #[test]
    fn test_outline() {
        let entries = outline(BODY, 3);
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.level, e.text.as_str(), e.id.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "Reading Walden", "reading-walden"),
                (2, "Economy", "economy"),
                (3, "simplicity matters", "simplicity-matters"),
                (2, "Economy", "economy-1"),
            ]
        );
    }

    #[test]
    fn test_outline_explicit_id() {
        let entries = outline("## Setup {#install}\n", 6);
        assert_eq!(entries[0].id, "install");
        assert_eq!(entries[0].text, "Setup");
    }

    #[test]
    fn test_plain_text_strips_mdx() {
        let text = plain_text(BODY);
        assert!(text.starts_with("Reading Walden Some intro text."));
        assert!(!text.contains("import"));
        assert!(!text.contains("Figure"));
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("读书笔记是好习惯", 4), "读书笔记");
        assert_eq!(excerpt("short", 160), "short");
    }
}
