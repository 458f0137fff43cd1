//! Generator module - writes the build artefacts that depend on the whole
//! content index: sitemap, robots file and the list of generable routes

pub mod seo;
pub mod sitemap;

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;

use crate::content::{ContentIndex, LocaleScope, SlugEntry};
use crate::Shelf;

/// Every page the site can render
#[derive(Debug, Clone, Serialize)]
pub struct Routes {
    pub essays: Vec<SlugEntry>,
    pub projects: Vec<String>,
}

/// Writes generated files into the public directory
pub struct Generator<'a> {
    shelf: &'a Shelf,
}

impl<'a> Generator<'a> {
    pub fn new(shelf: &'a Shelf) -> Self {
        Self { shelf }
    }

    /// Generate everything for one run
    pub fn generate(&self, index: &ContentIndex, generated_at: NaiveDateTime) -> Result<()> {
        fs::create_dir_all(&self.shelf.public_dir)?;

        self.generate_sitemap(index, generated_at)?;
        self.generate_robots()?;
        self.generate_routes()?;

        Ok(())
    }

    /// Static paths for page generation.
    ///
    /// Reads the store through the resolver rather than the `ContentIndex`:
    /// the index holds listed documents only, while every unlisted page
    /// still needs a route.
    pub fn routes(&self) -> Result<Routes> {
        let resolver = self.shelf.resolver();
        Ok(Routes {
            essays: resolver.list_all_slugs(&LocaleScope::Any)?,
            projects: resolver.list_project_slugs()?,
        })
    }

    fn generate_sitemap(&self, index: &ContentIndex, generated_at: NaiveDateTime) -> Result<()> {
        let entries = sitemap::build_entries(self.shelf, index, generated_at);
        let output_path = self.shelf.public_dir.join("sitemap.xml");
        fs::write(&output_path, sitemap::render(&entries))?;
        tracing::info!("Generated sitemap.xml ({} urls)", entries.len());
        Ok(())
    }

    fn generate_robots(&self) -> Result<()> {
        let output_path = self.shelf.public_dir.join("robots.txt");
        fs::write(&output_path, sitemap::robots_txt(self.shelf))?;
        tracing::info!("Generated robots.txt");
        Ok(())
    }

    fn generate_routes(&self) -> Result<()> {
        let routes = self.routes()?;
        let output_path = self.shelf.public_dir.join("routes.json");
        fs::write(&output_path, serde_json::to_string_pretty(&routes)?)?;
        tracing::info!(
            "Generated routes.json ({} essays, {} projects)",
            routes.essays.len(),
            routes.projects.len()
        );
        Ok(())
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_generate_writes_files() {
        let dir = tempdir().unwrap();
        let shelf = Shelf::with_config(dir.path(), SiteConfig::default()).unwrap();
        write(
            &shelf.crafts_dir.join("en/a.mdx"),
            "---\ncreateAt: 2024-01-01\n---\n",
        );
        write(
            &shelf.crafts_dir.join("en/hidden.mdx"),
            "---\nunlist: true\n---\n",
        );

        let index = shelf.index().build(false).unwrap();
        let now = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Generator::new(&shelf).generate(&index, now).unwrap();

        let sitemap = fs::read_to_string(shelf.public_dir.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("https://example.com/essay/a"));
        assert!(!sitemap.contains("hidden"));
        assert!(shelf.public_dir.join("robots.txt").is_file());

        let routes = fs::read_to_string(shelf.public_dir.join("routes.json")).unwrap();
        let routes: serde_json::Value = serde_json::from_str(&routes).unwrap();
        assert_eq!(routes["essays"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&apos;");
    }
}
