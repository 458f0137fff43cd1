//! Content index - aggregates loaded documents into lists and category trees

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use super::category::load_category;
use super::loader::{slug_from_path, DocumentLoader};
use super::store::ContentStore;
use super::{Category, Document, LocaleScope};
use crate::error::{ContentError, Result};
use crate::i18n::{Locale, LocaleSet};
use crate::Shelf;

/// What an index pass loads
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    pub scope: LocaleScope,
    /// Load document bodies (off for listing-only passes)
    pub include_body: bool,
    /// Sort the flat result (essays by effective date, projects by year)
    pub sort: bool,
}

/// Documents of one category, with the first descriptor seen for it
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBucket {
    pub category: Category,
    pub documents: Vec<Document>,
}

/// locale → category → documents, in first-seen order
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryTree {
    locales: IndexMap<Locale, IndexMap<String, CategoryBucket>>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket documents by their own category name
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let mut tree = Self::new();
        for doc in documents {
            let category = Category::bare(&doc.category);
            tree.insert(&category, doc);
        }
        tree
    }

    /// Add a document under `category`. An existing bucket keeps its
    /// descriptor.
    pub fn insert(&mut self, category: &Category, document: Document) {
        let buckets = self.locales.entry(document.locale.clone()).or_default();
        buckets
            .entry(category.slug.clone())
            .or_insert_with(|| CategoryBucket {
                category: category.clone(),
                documents: Vec::new(),
            })
            .documents
            .push(document);
    }

    /// Categories of one locale
    pub fn categories(&self, locale: &Locale) -> impl Iterator<Item = &CategoryBucket> {
        self.locales.get(locale).into_iter().flat_map(|b| b.values())
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.locales.keys()
    }

    /// Number of documents in the tree
    pub fn len(&self) -> usize {
        self.locales
            .values()
            .flat_map(|b| b.values())
            .map(|b| b.documents.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collapse into one sequence, each document annotated with its bucket
    pub fn flatten(&self) -> Vec<Document> {
        self.clone().into_flat()
    }

    pub fn into_flat(self) -> Vec<Document> {
        let mut flat = Vec::with_capacity(self.len());
        for buckets in self.locales.into_values() {
            for (name, bucket) in buckets {
                flat.extend(bucket.documents.into_iter().map(|mut doc| {
                    doc.category = name.clone();
                    doc
                }));
            }
        }
        flat
    }
}

/// A slug produced by more than one file within one scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub scope: String,
    pub slug: String,
    pub paths: Vec<PathBuf>,
}

impl From<SlugCollision> for ContentError {
    fn from(c: SlugCollision) -> Self {
        ContentError::DuplicateSlug {
            scope: c.scope,
            slug: c.slug,
            paths: c.paths,
        }
    }
}

/// Builds documents lists and trees from the content store
pub struct IndexBuilder<'a> {
    shelf: &'a Shelf,
    store: ContentStore<'a>,
    loader: DocumentLoader<'a>,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(shelf: &'a Shelf) -> Self {
        Self {
            shelf,
            store: ContentStore::new(shelf),
            loader: DocumentLoader::new(&shelf.config),
        }
    }

    /// Essays and reviews from the flat per-locale layout
    pub fn essays(&self, options: &IndexOptions) -> Result<Vec<Document>> {
        let mut essays = Vec::new();
        for (locale, path) in self.store.essay_files(&options.scope)? {
            let doc = self
                .loader
                .load_file(&path, &locale, None, options.include_body)?;
            if doc.is_unlisted() {
                tracing::debug!("Skipping unlisted {:?}", path);
                continue;
            }
            essays.push(doc);
        }

        tracing::debug!("Loaded {} essays", essays.len());

        if options.sort {
            Ok(sort_by_effective_date(essays))
        } else {
            Ok(essays)
        }
    }

    /// Essays bucketed by their `tag`
    pub fn essay_tree(&self, options: &IndexOptions) -> Result<CategoryTree> {
        let options = IndexOptions {
            sort: false,
            ..options.clone()
        };
        Ok(CategoryTree::from_documents(self.essays(&options)?))
    }

    /// Nested layout: locale → category folder → documents
    pub fn category_tree(&self, options: &IndexOptions) -> Result<CategoryTree> {
        let mut tree = CategoryTree::new();
        let descriptor_file = &self.shelf.config.category_file;

        for locale in self.store.scope_locales(&options.scope) {
            for dir in self.store.category_dirs(&locale)? {
                let category = load_category(&dir, descriptor_file)?;
                for path in self.store.category_files(&dir)? {
                    let doc = self.loader.load_file(
                        &path,
                        &locale,
                        Some(&category.slug),
                        options.include_body,
                    )?;
                    if doc.is_unlisted() {
                        continue;
                    }
                    tree.insert(&category, doc);
                }
            }
        }

        Ok(tree)
    }

    /// Nested posts as one sequence, sorted when requested
    pub fn flat_posts(&self, options: &IndexOptions) -> Result<Vec<Document>> {
        let flat = self.category_tree(options)?.into_flat();
        if options.sort {
            Ok(sort_by_effective_date(flat))
        } else {
            Ok(flat)
        }
    }

    /// Projects, carrying the default locale. Sorted by year when requested.
    pub fn projects(&self, options: &IndexOptions) -> Result<Vec<Document>> {
        let locale = self.shelf.locales.default_locale();
        let mut projects = Vec::new();
        for path in self.store.project_files()? {
            let doc = self
                .loader
                .load_file(&path, locale, None, options.include_body)?;
            if !doc.is_unlisted() {
                projects.push(doc);
            }
        }

        if options.sort {
            Ok(sort_by_year(projects))
        } else {
            Ok(projects)
        }
    }

    /// Every slug defined by more than one file in the same scope
    pub fn find_collisions(&self) -> Result<Vec<SlugCollision>> {
        let mut entries: Vec<(String, PathBuf)> = Vec::new();

        for (locale, path) in self.store.essay_files(&LocaleScope::Any)? {
            entries.push((format!("{}/{}", self.shelf.config.crafts_dir, locale), path));
        }
        for locale in self.shelf.locales.iter() {
            for dir in self.store.category_dirs(locale)? {
                for path in self.store.category_files(&dir)? {
                    entries.push((format!("{}/{}", self.shelf.config.posts_dir, locale), path));
                }
            }
        }
        for path in self.store.project_files()? {
            entries.push((self.shelf.config.projects_dir.clone(), path));
        }

        Ok(find_collisions(entries))
    }

    /// Build the in-memory snapshot for one generation run
    pub fn build(&self, include_body: bool) -> Result<ContentIndex> {
        let collisions = self.find_collisions()?;
        for collision in &collisions {
            tracing::warn!(
                "Slug {:?} defined more than once in {}: {:?}",
                collision.slug,
                collision.scope,
                collision.paths
            );
        }
        if self.shelf.config.strict_slugs {
            if let Some(first) = collisions.into_iter().next() {
                return Err(first.into());
            }
        }

        let options = IndexOptions {
            scope: LocaleScope::Any,
            include_body,
            sort: false,
        };
        let essays = self.essays(&options)?;
        let posts = self.category_tree(&options)?;
        let projects = self.projects(&IndexOptions {
            sort: true,
            ..options
        })?;

        tracing::info!(
            "Indexed {} essays, {} posts and {} projects",
            essays.len(),
            posts.len(),
            projects.len()
        );

        Ok(ContentIndex {
            essays,
            posts,
            projects,
            locales: self.shelf.locales.clone(),
        })
    }
}

/// Snapshot of the listed content, built once and shared by reference
#[derive(Debug, Clone)]
pub struct ContentIndex {
    /// Essays in enumeration order (locale order, then path)
    pub essays: Vec<Document>,
    pub posts: CategoryTree,
    /// Projects, newest year first
    pub projects: Vec<Document>,
    locales: LocaleSet,
}

impl ContentIndex {
    /// Listed essay by slug; `Any` takes the first locale in configured order
    pub fn find_essay(&self, slug: &str, scope: &LocaleScope) -> Option<&Document> {
        match scope {
            LocaleScope::Exact(locale) => self
                .essays
                .iter()
                .find(|d| d.slug == slug && &d.locale == locale),
            LocaleScope::Any => self.locales.iter().find_map(|locale| {
                self.essays
                    .iter()
                    .find(|d| d.slug == slug && &d.locale == locale)
            }),
        }
    }

    pub fn find_project(&self, slug: &str) -> Option<&Document> {
        self.projects.iter().find(|d| d.slug == slug)
    }

    /// Essays of one scope, newest first, undated excluded
    pub fn sorted_essays(&self, scope: &LocaleScope) -> Vec<Document> {
        let selected = self
            .essays
            .iter()
            .filter(|d| scope.includes(&d.locale))
            .cloned()
            .collect();
        sort_by_effective_date(selected)
    }
}

/// Newest first by effective date. Stable; undated documents are dropped.
pub fn sort_by_effective_date(documents: Vec<Document>) -> Vec<Document> {
    let mut dated: Vec<Document> = documents
        .into_iter()
        .filter(|d| d.effective_date().is_some())
        .collect();
    dated.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));
    dated
}

/// Latest year first; missing years count as 0. Stable.
pub fn sort_by_year(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by_key(|d| std::cmp::Reverse(d.year()));
    documents
}

/// Keep the first document for each slug
pub fn dedupe_by_slug(documents: Vec<Document>) -> Vec<Document> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .filter(|d| seen.insert(d.slug.clone()))
        .collect()
}

/// Catalog grouping by the year a document was written, latest year first
pub fn group_by_year(documents: &[Document]) -> Vec<(i32, Vec<&Document>)> {
    use chrono::Datelike;

    let mut years: BTreeMap<i32, Vec<&Document>> = BTreeMap::new();
    for doc in documents {
        if let Some(date) = doc.created.or(doc.updated) {
            years.entry(date.year()).or_default().push(doc);
        }
    }
    years.into_iter().rev().collect()
}

/// Group `(scope, path)` pairs by `(scope, slug)` and report the groups
/// with more than one file.
fn find_collisions(entries: Vec<(String, PathBuf)>) -> Vec<SlugCollision> {
    let mut groups: IndexMap<(String, String), Vec<PathBuf>> = IndexMap::new();
    for (scope, path) in entries {
        let Some(slug) = slug_from_path(&path) else {
            continue;
        };
        groups.entry((scope, slug)).or_default().push(path);
    }

    groups
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|((scope, slug), paths)| SlugCollision { scope, slug, paths })
        .collect()
}
