//! Per-page SEO metadata and schema.org JSON-LD

use serde::Serialize;
use serde_json::{json, Value};

use crate::content::markdown::excerpt;
use crate::content::Document;
use crate::helpers::{absolute_url, date_xml, encode_segment, full_url_for};
use crate::Shelf;

/// Which route a document is rendered under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Essay,
    Project,
}

/// Head metadata for one rendered page
#[derive(Debug, Clone, Serialize)]
pub struct ArticleMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
    pub image: Option<String>,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub locale: String,
    pub author: String,
    pub twitter_creator: Option<String>,
    pub json_ld: Value,
}

/// Canonical path of a document
pub fn page_path(shelf: &Shelf, document: &Document, kind: PageKind) -> String {
    let sitemap = &shelf.config.sitemap;
    match kind {
        PageKind::Essay => format!(
            "{}/{}/{}",
            document.locale,
            sitemap.essay_path,
            encode_segment(&document.slug)
        ),
        PageKind::Project => format!(
            "{}/{}",
            sitemap.project_path,
            encode_segment(&document.slug)
        ),
    }
}

/// Build metadata from a resolved document (body included)
pub fn article_meta(shelf: &Shelf, document: &Document, kind: PageKind) -> ArticleMeta {
    let config = &shelf.config;
    let fm = &document.frontmatter;
    let seo = fm.seo.clone().unwrap_or_default();
    let tz = config.tz();

    let title = non_empty(seo.title.as_deref())
        .unwrap_or_else(|| document.title())
        .to_string();
    let description = non_empty(seo.description.as_deref())
        .or_else(|| non_empty(fm.summary.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| excerpt(&document.body, config.excerpt_length));
    let keywords = fm.effective_keywords().to_vec();

    let canonical_url = full_url_for(config, &page_path(shelf, document, kind));
    let image = non_empty(fm.cover.as_deref()).map(|c| absolute_url(config, c));
    let published_time = document.created.map(|d| date_xml(&d, &tz));
    let modified_time = document
        .updated
        .or(document.created)
        .map(|d| date_xml(&d, &tz));

    let mut json_ld = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": title,
        "description": description,
        "author": {
            "@type": "Person",
            "name": config.author,
            "url": config.url,
        },
        "publisher": {
            "@type": "Organization",
            "name": config.author,
            "url": config.url,
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": canonical_url,
        },
        "inLanguage": document.locale.as_str(),
    });
    if let Value::Object(map) = &mut json_ld {
        if let Some(published) = &published_time {
            map.insert("datePublished".to_string(), json!(published));
        }
        if let Some(modified) = &modified_time {
            map.insert("dateModified".to_string(), json!(modified));
        }
        if let Some(image) = &image {
            map.insert(
                "image".to_string(),
                json!({ "@type": "ImageObject", "url": image }),
            );
        }
        if !keywords.is_empty() {
            map.insert("keywords".to_string(), json!(keywords.join(", ")));
        }
    }

    ArticleMeta {
        title,
        description,
        keywords,
        canonical_url,
        image,
        published_time,
        modified_time,
        locale: document.locale.to_string(),
        author: config.author.clone(),
        twitter_creator: config.twitter.as_ref().map(|t| format!("@{}", t.trim_start_matches('@'))),
        json_ld,
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
