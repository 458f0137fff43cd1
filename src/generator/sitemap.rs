//! sitemap.xml and robots.txt

use chrono::NaiveDateTime;

use super::escape_xml;
use crate::content::index::{dedupe_by_slug, ContentIndex};
use crate::content::LocaleScope;
use crate::helpers::{date_xml, encode_segment, full_url_for};
use crate::Shelf;

/// One `<url>` of the sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub change_frequency: String,
    pub priority: f32,
}

/// Root page, then essays (one per slug, newest first), then projects
pub fn build_entries(
    shelf: &Shelf,
    index: &ContentIndex,
    generated_at: NaiveDateTime,
) -> Vec<SitemapEntry> {
    let config = &shelf.config;
    let tz = config.tz();
    let sitemap = &config.sitemap;

    let mut entries = vec![SitemapEntry {
        loc: full_url_for(config, ""),
        lastmod: Some(date_xml(&generated_at, &tz)),
        change_frequency: sitemap.root_change_frequency.clone(),
        priority: 1.0,
    }];

    // Dated essays newest first, undated ones after in store order
    let mut essays = index.sorted_essays(&LocaleScope::Any);
    essays.extend(
        index
            .essays
            .iter()
            .filter(|d| d.effective_date().is_none())
            .cloned(),
    );

    for essay in dedupe_by_slug(essays) {
        entries.push(SitemapEntry {
            loc: full_url_for(
                config,
                &format!("{}/{}", sitemap.essay_path, encode_segment(&essay.slug)),
            ),
            lastmod: essay.created.map(|d| date_xml(&d, &tz)),
            change_frequency: sitemap.change_frequency.clone(),
            priority: sitemap.priority,
        });
    }

    for project in &index.projects {
        let lastmod = project.effective_date().unwrap_or(generated_at);
        entries.push(SitemapEntry {
            loc: full_url_for(
                config,
                &format!("{}/{}", sitemap.project_path, encode_segment(&project.slug)),
            ),
            lastmod: Some(date_xml(&lastmod, &tz)),
            change_frequency: sitemap.change_frequency.clone(),
            priority: sitemap.priority,
        });
    }

    entries
}

/// Render entries as a sitemap document
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            escape_xml(&entry.change_frequency)
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

pub fn robots_txt(shelf: &Shelf) -> String {
    format!(
        "User-agent: *\nAllow: /\nSitemap: {}\n",
        full_url_for(&shelf.config, "sitemap.xml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::NaiveDate;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_entries_dedupe_essays() {
        let dir = tempdir().unwrap();
        let config = SiteConfig {
            url: "https://rene.wang".to_string(),
            ..Default::default()
        };
        let shelf = Shelf::with_config(dir.path(), config).unwrap();
        write(
            &shelf.crafts_dir.join("en/walden.mdx"),
            "---\ncreateAt: 2024-01-05\n---\n",
        );
        write(
            &shelf.crafts_dir.join("zh/walden.mdx"),
            "---\ncreateAt: 2024-01-05\n---\n",
        );
        write(
            &shelf.crafts_dir.join("zh/读书.mdx"),
            "---\ncreateAt: 2024-06-01\n---\n",
        );
        write(&shelf.crafts_dir.join("en/undated.mdx"), "---\ntitle: U\n---\n");
        write(
            &shelf.crafts_dir.join("en/hidden.mdx"),
            "---\nunlist: true\ncreateAt: 2025-01-01\n---\n",
        );
        write(&shelf.projects_dir.join("kindle.mdx"), "---\nyear: 2024\n---\n");

        let index = shelf.index().build(false).unwrap();
        let entries = build_entries(&shelf, &index, now());
        let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://rene.wang/",
                "https://rene.wang/essay/%E8%AF%BB%E4%B9%A6",
                "https://rene.wang/essay/walden",
                "https://rene.wang/essay/undated",
                "https://rene.wang/project/kindle",
            ]
        );
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(
            entries[2].lastmod.as_deref(),
            Some("2024-01-05T00:00:00+00:00")
        );
        assert!(entries[3].lastmod.is_none());
        assert_eq!(
            entries[4].lastmod.as_deref(),
            Some("2026-10-01T12:00:00+00:00")
        );
    }

    #[test]
    fn test_render() {
        let xml = render(&[SitemapEntry {
            loc: "https://example.com/essay/a&b".to_string(),
            lastmod: None,
            change_frequency: "monthly".to_string(),
            priority: 0.6,
        }]);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://example.com/essay/a&amp;b</loc>"));
        assert!(xml.contains("<priority>0.6</priority>"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_robots() {
        let dir = tempdir().unwrap();
        let shelf = Shelf::with_config(dir.path(), SiteConfig::default()).unwrap();
        assert_eq!(
            robots_txt(&shelf),
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n"
        );
    }
}
