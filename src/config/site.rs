//! Site configuration (_config.yml)

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ContentError, Result};
use crate::i18n::{Locale, LocaleSet};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub twitter: Option<String>,

    // URL
    pub url: String,
    pub root: String,

    // Locales
    pub locales: Vec<String>,
    pub default_locale: String,
    pub timezone: String,
    /// Moment-style display pattern per locale code
    #[serde(default)]
    pub date_formats: HashMap<String, String>,

    // Directory
    pub crafts_dir: String,
    pub posts_dir: String,
    pub projects_dir: String,
    pub public_dir: String,
    pub category_file: String,

    // Content
    pub extensions: Vec<String>,
    pub strict_slugs: bool,
    pub excerpt_length: usize,

    #[serde(default)]
    pub sitemap: SitemapConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Inkshelf".to_string(),
            description: String::new(),
            author: "Rene Wang".to_string(),
            twitter: None,

            url: "https://example.com".to_string(),
            root: "/".to_string(),

            locales: vec!["en".to_string(), "zh".to_string()],
            default_locale: "en".to_string(),
            timezone: "UTC".to_string(),
            date_formats: HashMap::new(),

            crafts_dir: "content/crafts".to_string(),
            posts_dir: "posts".to_string(),
            projects_dir: "content/projects".to_string(),
            public_dir: "public".to_string(),
            category_file: "category.toml".to_string(),

            extensions: vec!["mdx".to_string(), "md".to_string()],
            strict_slugs: true,
            excerpt_length: 160,

            sitemap: SitemapConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .map_err(|e| ContentError::Config(format!("{:?}: {}", path, e)))?;
        Ok(config)
    }

    /// The configured locales, validated
    pub fn locale_set(&self) -> Result<LocaleSet> {
        LocaleSet::new(&self.locales, &self.default_locale)
    }

    /// Site timezone, falling back to UTC when the name is unknown
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                if !self.timezone.is_empty() {
                    tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
                }
                Tz::UTC
            }
        }
    }

    /// Display pattern for dates shown in the given locale
    pub fn date_format_for(&self, locale: &Locale) -> &str {
        if let Some(format) = self.date_formats.get(locale.as_str()) {
            return format;
        }
        match locale.as_str().split('-').next() {
            Some("zh") | Some("ja") => "YYYY/M/D",
            Some("de") => "D.M.YYYY",
            _ => "M/D/YYYY",
        }
    }

    /// Whether a file name carries one of the content extensions
    pub fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x == e))
            .unwrap_or(false)
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub essay_path: String,
    pub project_path: String,
    pub change_frequency: String,
    pub priority: f32,
    pub root_change_frequency: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            essay_path: "essay".to_string(),
            project_path: "project".to_string(),
            change_frequency: "monthly".to_string(),
            priority: 0.6,
            root_change_frequency: "weekly".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.extensions, vec!["mdx", "md"]);
        assert!(config.strict_slugs);
        assert_eq!(config.sitemap.essay_path, "essay");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Rene's Shelf
url: https://rene.wang
locales: [zh, en]
default_locale: zh
timezone: Asia/Shanghai
date_formats:
  en: MMMM D, YYYY
sitemap:
  priority: 0.8
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Rene's Shelf");
        assert_eq!(config.url, "https://rene.wang");
        assert_eq!(config.tz(), chrono_tz::Asia::Shanghai);
        assert_eq!(config.sitemap.priority, 0.8);
        assert_eq!(config.sitemap.project_path, "project");

        let locales = config.locale_set().unwrap();
        assert_eq!(locales.default_locale().as_str(), "zh");
        let en = locales.parse("en").unwrap();
        let zh = locales.parse("zh").unwrap();
        assert_eq!(config.date_format_for(&en), "MMMM D, YYYY");
        assert_eq!(config.date_format_for(&zh), "YYYY/M/D");
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let config = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert_eq!(config.tz(), Tz::UTC);
    }
}
