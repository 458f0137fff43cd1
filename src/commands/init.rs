//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Site
title: Inkshelf
description: ''
author: Rene Wang
twitter:

# URL
url: https://example.com
root: /

# Locales (the first one wins when a slug exists in several)
locales: [en, zh]
default_locale: en
timezone: UTC
date_formats:
  en: M/D/YYYY
  zh: YYYY/M/D

# Directory
crafts_dir: content/crafts
posts_dir: posts
projects_dir: content/projects
public_dir: public
category_file: category.toml

# Content
extensions: [mdx, md]
strict_slugs: true
excerpt_length: 160

sitemap:
  essay_path: essay
  project_path: project
  change_frequency: monthly
  priority: 0.6
  root_change_frequency: weekly
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir.join("content/crafts/en"))?;
    fs::create_dir_all(target_dir.join("content/crafts/zh"))?;
    fs::create_dir_all(target_dir.join("content/projects"))?;
    fs::create_dir_all(target_dir.join("posts/en/notes"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    fs::write(
        target_dir.join("posts/en/notes/category.toml"),
        "name = \"Notes\"\ndescription = \"Short reading notes\"\n",
    )?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_essay = format!(
        r#"---
title: Hello World
createAt: {}
tag: Essay
keywords: [welcome]
---

Welcome to your shelf. Essays live in `content/crafts/<locale>/`, one file per
slug. Add a translation by creating a file with the same name under another
locale.

## Front-matter

`title`, `createAt`, `updateAt`, `cover`, `keywords`, `seo`, `tag`, `type`,
`year` and `unlist` are understood; anything else is kept as-is.
"#,
        today
    );
    fs::write(target_dir.join("content/crafts/en/hello-world.mdx"), sample_essay)?;

    tracing::debug!("Created sample content in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::LocaleScope;
    use crate::Shelf;
    use tempfile::tempdir;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let config = SiteConfig::load(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.locales, vec!["en", "zh"]);

        let shelf = Shelf::new(dir.path()).unwrap();
        let doc = shelf
            .resolver()
            .resolve("hello-world", &LocaleScope::Any)
            .unwrap()
            .unwrap();
        assert_eq!(doc.title(), "Hello World");
        assert_eq!(doc.category, "Essay");

        assert!(init_site(dir.path()).is_err());
    }
}
