//! Document and category models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FrontMatter;
use crate::i18n::Locale;

/// Category used when a document carries no `tag`
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One essay, review or project loaded from the content store
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// File stem, trimmed
    pub slug: String,

    /// Title fallback when the front-matter has none
    pub default_title: String,

    pub locale: Locale,

    /// Category name (tag or folder)
    pub category: String,

    /// Front-matter with date fields normalised for display
    pub frontmatter: FrontMatter,

    /// Raw markup; empty unless the body was requested
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,

    /// Parsed creation date
    #[serde(skip)]
    pub created: Option<NaiveDateTime>,

    /// Parsed update date
    #[serde(skip)]
    pub updated: Option<NaiveDateTime>,

    /// Full source file path
    #[serde(skip)]
    pub source: PathBuf,
}

impl Document {
    /// Title to display
    pub fn title(&self) -> &str {
        self.frontmatter
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.default_title)
    }

    /// Date used for ordering: update date if present, else creation date
    pub fn effective_date(&self) -> Option<NaiveDateTime> {
        self.updated.or(self.created)
    }

    pub fn is_unlisted(&self) -> bool {
        self.frontmatter.unlist
    }

    /// Project year, 0 when absent
    pub fn year(&self) -> i32 {
        self.frontmatter.year.unwrap_or(0)
    }
}

/// Descriptor loaded from a category folder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDescriptor {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
}

/// A named grouping of documents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub slug: String,
    pub config: CategoryDescriptor,
}

impl Category {
    /// A category with no descriptor
    pub fn bare(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            config: CategoryDescriptor::default(),
        }
    }

    /// Display name: descriptor name, else the slug
    pub fn name(&self) -> &str {
        self.config.name.as_deref().unwrap_or(&self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn doc(title: Option<&str>) -> Document {
        Document {
            slug: "walden".to_string(),
            default_title: "walden".to_string(),
            locale: crate::i18n::LocaleSet::new(&["en"], "en")
                .unwrap()
                .default_locale()
                .clone(),
            category: UNCATEGORIZED.to_string(),
            frontmatter: FrontMatter {
                title: title.map(str::to_string),
                ..Default::default()
            },
            body: String::new(),
            created: None,
            updated: None,
            source: PathBuf::from("walden.mdx"),
        }
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        assert_eq!(doc(None).title(), "walden");
        assert_eq!(doc(Some("  ")).title(), "walden");
        assert_eq!(doc(Some("Walden")).title(), "Walden");
    }

    #[test]
    fn test_effective_date_prefers_update() {
        let created = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let updated = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let mut d = doc(None);
        assert_eq!(d.effective_date(), None);
        d.created = Some(created);
        assert_eq!(d.effective_date(), Some(created));
        d.updated = Some(updated);
        assert_eq!(d.effective_date(), Some(updated));
    }

    #[test]
    fn test_category_name() {
        let mut cat = Category::bare("reading");
        assert_eq!(cat.name(), "reading");
        cat.config.name = Some("Reading Notes".to_string());
        assert_eq!(cat.name(), "Reading Notes");
    }
}
