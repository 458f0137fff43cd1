//! Resolver - slug to canonical document, locale to known slugs
//!
//! Lookups go straight to the content store: a scoped lookup probes one
//! locale directory, an unscoped one probes each configured locale in order and
//! returns the first hit. Unlisted documents resolve like any other; they are
//! only hidden from listings.

use serde::Serialize;

use super::loader::{slug_from_path, DocumentLoader};
use super::store::ContentStore;
use super::Document;
use crate::error::Result;
use crate::i18n::Locale;
use crate::Shelf;

/// Which locales a lookup or listing covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocaleScope {
    /// Only this locale
    Exact(Locale),
    /// Every configured locale, in configured order
    #[default]
    Any,
}

impl LocaleScope {
    pub fn includes(&self, locale: &Locale) -> bool {
        match self {
            LocaleScope::Exact(l) => l == locale,
            LocaleScope::Any => true,
        }
    }
}

/// Path-derived identity of a generable page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugEntry {
    pub slug: String,
    pub locale: Locale,
}

pub struct Resolver<'a> {
    shelf: &'a Shelf,
    store: ContentStore<'a>,
    loader: DocumentLoader<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(shelf: &'a Shelf) -> Self {
        Self {
            shelf,
            store: ContentStore::new(shelf),
            loader: DocumentLoader::new(&shelf.config),
        }
    }

    /// Resolve an essay slug. `Ok(None)` when no file matches.
    pub fn resolve(&self, slug: &str, scope: &LocaleScope) -> Result<Option<Document>> {
        for locale in self.store.scope_locales(scope) {
            let dir = self.shelf.crafts_dir.join(locale.as_str());
            if let Some(path) = self.store.probe(&dir, slug)? {
                tracing::debug!("Resolved {:?} ({}) to {:?}", slug, locale, path);
                return self.loader.load_file(&path, &locale, None, true).map(Some);
            }
        }

        tracing::debug!("No document for slug {:?} in {:?}", slug, scope);
        Ok(None)
    }

    /// Resolve a project slug
    pub fn resolve_project(&self, slug: &str) -> Result<Option<Document>> {
        match self.store.probe(&self.shelf.projects_dir, slug)? {
            Some(path) => {
                let locale = self.shelf.locales.default_locale();
                self.loader.load_file(&path, locale, None, true).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Every essay slug in scope, from file names alone
    pub fn list_all_slugs(&self, scope: &LocaleScope) -> Result<Vec<SlugEntry>> {
        Ok(self
            .store
            .essay_files(scope)?
            .into_iter()
            .filter_map(|(locale, path)| {
                slug_from_path(&path).map(|slug| SlugEntry { slug, locale })
            })
            .collect())
    }

    /// Every project slug
    pub fn list_project_slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .project_files()?
            .iter()
            .filter_map(|p| slug_from_path(p))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn setup() -> (TempDir, Shelf) {
        let dir = tempdir().unwrap();
        let shelf = Shelf::with_config(dir.path(), SiteConfig::default()).unwrap();
        write(
            &shelf.crafts_dir.join("en/hello.mdx"),
            "---\ntitle: Hello\ncreateAt: 2024-01-05\n---\nHello body",
        );
        write(
            &shelf.crafts_dir.join("zh/hello.mdx"),
            "---\ntitle: 你好\n---\n你好",
        );
        write(
            &shelf.crafts_dir.join("zh/zh-only.md"),
            "---\ntitle: Only Chinese\nunlist: true\n---\n",
        );
        write(
            &shelf.projects_dir.join("kindle.mdx"),
            "---\ntitle: Kindle\nyear: 2024\n---\nProject body",
        );
        (dir, shelf)
    }

    #[test]
    fn test_resolve_exact_locale() {
        let (_dir, shelf) = setup();
        let resolver = Resolver::new(&shelf);
        let zh = shelf.locales.parse("zh").unwrap();
        let en = shelf.locales.parse("en").unwrap();

        let doc = resolver
            .resolve("hello", &LocaleScope::Exact(zh.clone()))
            .unwrap()
            .unwrap();
        assert_eq!(doc.slug, "hello");
        assert_eq!(doc.locale, zh);
        assert_eq!(doc.body, "你好");

        assert!(resolver
            .resolve("zh-only", &LocaleScope::Exact(en))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_resolve_any_takes_first_locale() {
        let (_dir, shelf) = setup();
        let resolver = Resolver::new(&shelf);

        let doc = resolver.resolve("hello", &LocaleScope::Any).unwrap().unwrap();
        assert_eq!(doc.locale.as_str(), "en");
        assert_eq!(doc.title(), "Hello");
        assert_eq!(doc.body, "Hello body");

        // unlisted documents still resolve
        let doc = resolver.resolve("zh-only", &LocaleScope::Any).unwrap().unwrap();
        assert_eq!(doc.locale.as_str(), "zh");

        assert!(resolver.resolve("missing", &LocaleScope::Any).unwrap().is_none());
        assert!(resolver.resolve("../zh/hello", &LocaleScope::Any).unwrap().is_none());
    }

    #[test]
    fn test_locale_order_follows_config() {
        let dir = tempdir().unwrap();
        let config = SiteConfig {
            locales: vec!["zh".to_string(), "en".to_string()],
            ..Default::default()
        };
        let shelf = Shelf::with_config(dir.path(), config).unwrap();
        write(&shelf.crafts_dir.join("en/a.mdx"), "---\ntitle: en\n---\n");
        write(&shelf.crafts_dir.join("zh/a.mdx"), "---\ntitle: zh\n---\n");

        let doc = Resolver::new(&shelf)
            .resolve("a", &LocaleScope::Any)
            .unwrap()
            .unwrap();
        assert_eq!(doc.locale.as_str(), "zh");
    }

    #[test]
    fn test_list_all_slugs() {
        let (_dir, shelf) = setup();
        let resolver = Resolver::new(&shelf);
        let zh = shelf.locales.parse("zh").unwrap();

        let all = resolver.list_all_slugs(&LocaleScope::Any).unwrap();
        let pairs: Vec<_> = all
            .iter()
            .map(|e| (e.slug.as_str(), e.locale.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("hello", "en"), ("hello", "zh"), ("zh-only", "zh")]
        );

        let zh_only = resolver.list_all_slugs(&LocaleScope::Exact(zh)).unwrap();
        assert_eq!(zh_only.len(), 2);
    }

    #[test]
    fn test_empty_store() {
        let dir = tempdir().unwrap();
        let shelf = Shelf::with_config(dir.path(), SiteConfig::default()).unwrap();
        let resolver = Resolver::new(&shelf);
        assert!(resolver.list_all_slugs(&LocaleScope::Any).unwrap().is_empty());
        assert!(resolver.list_project_slugs().unwrap().is_empty());
        assert!(resolver.resolve("x", &LocaleScope::Any).unwrap().is_none());
    }

    #[test]
    fn test_projects() {
        let (_dir, shelf) = setup();
        let resolver = Resolver::new(&shelf);

        assert_eq!(resolver.list_project_slugs().unwrap(), vec!["kindle"]);
        let project = resolver.resolve_project("kindle").unwrap().unwrap();
        assert_eq!(project.frontmatter.year, Some(2024));
        assert_eq!(project.body, "Project body");
        assert!(resolver.resolve_project("nope").unwrap().is_none());
    }

    #[test]
    fn test_listed_slugs_resolve() {
        let (_dir, shelf) = setup();
        write(
            &shelf.crafts_dir.join("en/ padded .mdx"),
            "---\ntitle: Padded\n---\nSpaced out",
        );
        let resolver = Resolver::new(&shelf);

        let entries = resolver.list_all_slugs(&LocaleScope::Any).unwrap();
        assert!(entries.iter().any(|e| e.slug == "padded"));
        for entry in entries {
            let doc = resolver
                .resolve(&entry.slug, &LocaleScope::Exact(entry.locale.clone()))
                .unwrap()
                .unwrap();
            assert_eq!(doc.slug, entry.slug);
            assert_eq!(doc.locale, entry.locale);
        }

        let doc = resolver.resolve("padded", &LocaleScope::Any).unwrap().unwrap();
        assert_eq!(doc.title(), "Padded");
    }
}
