//! Document loader - turns one content file into a `Document`

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use std::fs;
use std::path::Path;

use super::{Document, FrontMatter, UNCATEGORIZED};
use crate::config::SiteConfig;
use crate::error::{ContentError, Result};
use crate::helpers::{format_date, parse_date};
use crate::i18n::Locale;

/// Loads documents, normalising dates for the document's locale
pub struct DocumentLoader<'a> {
    config: &'a SiteConfig,
    tz: Tz,
}

impl<'a> DocumentLoader<'a> {
    /// Create a new document loader
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            tz: config.tz(),
        }
    }

    /// Read a file from disk and load it.
    ///
    /// `category` overrides the front-matter `tag`; nested layouts pass the
    /// folder's category here.
    pub fn load_file(
        &self,
        path: &Path,
        locale: &Locale,
        category: Option<&str>,
        include_body: bool,
    ) -> Result<Document> {
        let text = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        Ok(self.load(path, &text, locale, category, include_body))
    }

    /// Build a document from a path and its raw text
    pub fn load(
        &self,
        path: &Path,
        text: &str,
        locale: &Locale,
        category: Option<&str>,
        include_body: bool,
    ) -> Document {
        let (mut fm, body) = FrontMatter::parse(text);

        let slug = slug_from_path(path).unwrap_or_default();

        let created = fm.created_raw().and_then(|raw| self.parse_logged(path, raw));
        let updated = fm
            .update_at
            .as_deref()
            .and_then(|raw| self.parse_logged(path, raw));

        let display_format = self.config.date_format_for(locale);
        fm.create_at = created.map(|d| format_date(&d, display_format));
        fm.date = None;
        fm.update_at = updated.map(|d| format_date(&d, display_format));

        let category = category
            .map(str::to_string)
            .or_else(|| {
                fm.tag
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        Document {
            default_title: slug.clone(),
            slug,
            locale: locale.clone(),
            category,
            frontmatter: fm,
            body: if include_body {
                body.to_string()
            } else {
                String::new()
            },
            created,
            updated,
            source: path.to_path_buf(),
        }
    }

    fn parse_logged(&self, path: &Path, raw: &str) -> Option<NaiveDateTime> {
        let parsed = parse_date(raw, &self.tz);
        if parsed.is_none() {
            tracing::warn!("Unparseable date {:?} in {:?}, ignoring", raw, path);
        }
        parsed
    }
}

/// Slug of a content file: its stem with surrounding whitespace trimmed
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
