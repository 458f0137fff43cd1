//! inkshelf: content pipeline for an e-reader themed personal site
//!
//! This crate walks a content store of MDX essays, reviews and projects,
//! parses their front-matter, indexes them by locale and category, resolves
//! slugs to documents and generates the sitemap.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod i18n;

use std::path::{Path, PathBuf};

pub use error::{ContentError, Result};

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Shelf {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Supported locales, validated from the config
    pub locales: i18n::LocaleSet,
    /// Base directory
    pub base_dir: PathBuf,
    /// Flat per-locale essays
    pub crafts_dir: PathBuf,
    /// Nested per-locale, per-category posts
    pub posts_dir: PathBuf,
    /// Flat projects
    pub projects_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Shelf {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No config at {:?}, using defaults", config_path);
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Open a site directory with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let locales = config.locale_set()?;

        Ok(Self {
            crafts_dir: base_dir.join(&config.crafts_dir),
            posts_dir: base_dir.join(&config.posts_dir),
            projects_dir: base_dir.join(&config.projects_dir),
            public_dir: base_dir.join(&config.public_dir),
            config,
            locales,
            base_dir,
        })
    }

    /// Index builder over this site's content store
    pub fn index(&self) -> content::IndexBuilder<'_> {
        content::IndexBuilder::new(self)
    }

    /// Slug resolver over this site's content store
    pub fn resolver(&self) -> content::Resolver<'_> {
        content::Resolver::new(self)
    }

    /// Generate the sitemap and robots file
    pub fn generate(&self) -> anyhow::Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}
