//! Content store layout
//!
//! ```text
//! <crafts_dir>/<locale>/<slug>.mdx             essays and reviews
//! <posts_dir>/<locale>/<category>/<slug>.mdx   nested posts
//! <posts_dir>/<locale>/<category>/category.toml
//! <projects_dir>/<slug>.mdx                    projects
//! ```
//!
//! Enumeration never fails on a missing directory; it simply yields nothing.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::loader::slug_from_path;
use super::LocaleScope;
use crate::error::{ContentError, Result};
use crate::i18n::Locale;
use crate::Shelf;

/// Read-only view of the on-disk content tree
pub struct ContentStore<'a> {
    shelf: &'a Shelf,
}

impl<'a> ContentStore<'a> {
    pub fn new(shelf: &'a Shelf) -> Self {
        Self { shelf }
    }

    /// Locales covered by a scope, in configured order
    pub fn scope_locales(&self, scope: &LocaleScope) -> Vec<Locale> {
        match scope {
            LocaleScope::Exact(locale) => vec![locale.clone()],
            LocaleScope::Any => self.shelf.locales.iter().cloned().collect(),
        }
    }

    /// Essay files per locale: `<crafts>/<locale>/*.<ext>`
    pub fn essay_files(&self, scope: &LocaleScope) -> Result<Vec<(Locale, PathBuf)>> {
        let mut files = Vec::new();
        for locale in self.scope_locales(scope) {
            let dir = self.shelf.crafts_dir.join(locale.as_str());
            for path in self.glob_content(&dir)? {
                files.push((locale.clone(), path));
            }
        }
        Ok(files)
    }

    /// Project files: `<projects>/*.<ext>`
    pub fn project_files(&self) -> Result<Vec<PathBuf>> {
        self.glob_content(&self.shelf.projects_dir)
    }

    /// Category folders of the nested layout for one locale, sorted by name
    pub fn category_dirs(&self, locale: &Locale) -> Result<Vec<PathBuf>> {
        let dir = self.shelf.posts_dir.join(locale.as_str());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| walk_error(&dir, e))?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }
        Ok(dirs)
    }

    /// Content files directly inside a category folder
    pub fn category_files(&self, category_dir: &Path) -> Result<Vec<PathBuf>> {
        self.glob_content(category_dir)
    }

    /// Probe `<dir>/<slug>.<ext>` for each configured extension, then fall
    /// back to a file whose trimmed stem is `slug` (e.g. ` padded .mdx`)
    pub fn probe(&self, dir: &Path, slug: &str) -> Result<Option<PathBuf>> {
        let slug = slug.trim();
        if !is_valid_slug(slug) {
            return Ok(None);
        }

        let direct = self
            .shelf
            .config
            .extensions
            .iter()
            .map(|ext| dir.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file());
        if direct.is_some() {
            return Ok(direct);
        }

        Ok(self
            .glob_content(dir)?
            .into_iter()
            .find(|path| slug_from_path(path).as_deref() == Some(slug)))
    }

    /// Direct children of `dir` carrying a content extension, sorted by path
    fn glob_content(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let escaped = Pattern::escape(&dir.to_string_lossy());
        let mut files = Vec::new();
        for ext in &self.shelf.config.extensions {
            let pattern = format!("{}/*.{}", escaped, Pattern::escape(ext));
            let paths = glob::glob(&pattern)
                .map_err(|e| ContentError::Config(format!("bad pattern {:?}: {}", pattern, e)))?;
            for path in paths {
                let path = path.map_err(|e| {
                    let p = e.path().to_path_buf();
                    ContentError::io(p, e.into_error())
                })?;
                if path.is_file() && self.shelf.config.is_content_file(&path) {
                    files.push(path);
                }
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }
}

/// Slugs are single file-name components
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.trim().is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

fn walk_error(dir: &Path, e: walkdir::Error) -> ContentError {
    let path = e.path().unwrap_or(dir).to_path_buf();
    let io = e
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
    ContentError::io(path, io)
}
