//! List site content

use anyhow::Result;

use crate::content::index::group_by_year;
use crate::content::{IndexOptions, LocaleScope};
use crate::Shelf;

/// List site content by type
pub fn run(shelf: &Shelf, content_type: &str, locale: Option<&str>, json: bool) -> Result<()> {
    let scope = match locale {
        Some(code) => LocaleScope::Exact(shelf.locales.parse(code)?),
        None => LocaleScope::Any,
    };
    let index = shelf.index();

    match content_type {
        "essay" | "essays" => {
            let essays = index.essays(&IndexOptions {
                scope,
                include_body: false,
                sort: true,
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&essays)?);
                return Ok(());
            }
            println!("Essays ({}):", essays.len());
            for (year, docs) in group_by_year(&essays) {
                println!("  {}", year);
                for doc in docs {
                    println!(
                        "    {} - {} [{}/{}]",
                        doc.frontmatter.create_at.as_deref().unwrap_or("-"),
                        doc.title(),
                        doc.locale,
                        doc.slug
                    );
                }
            }
        }
        "post" | "posts" => {
            let posts = index.flat_posts(&IndexOptions {
                scope,
                include_body: false,
                sort: true,
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
                return Ok(());
            }
            println!("Posts ({}):", posts.len());
            for doc in posts {
                println!(
                    "  {} - {} [{}/{}/{}]",
                    doc.frontmatter.create_at.as_deref().unwrap_or("-"),
                    doc.title(),
                    doc.locale,
                    doc.category,
                    doc.slug
                );
            }
        }
        "project" | "projects" => {
            let projects = index.projects(&IndexOptions {
                scope,
                include_body: false,
                sort: true,
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
                return Ok(());
            }
            println!("Projects ({}):", projects.len());
            for project in projects {
                let year = project
                    .frontmatter
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "----".to_string());
                println!("  {} - {} [{}]", year, project.title(), project.slug);
            }
        }
        "category" | "categories" => {
            let options = IndexOptions {
                scope,
                ..Default::default()
            };
            let tree = index.category_tree(&options)?;
            let tree = if tree.is_empty() {
                index.essay_tree(&options)?
            } else {
                tree
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
                return Ok(());
            }
            for locale in tree.locales() {
                println!("{}:", locale);
                for bucket in tree.categories(locale) {
                    println!("  {} ({})", bucket.category.name(), bucket.documents.len());
                    if let Some(description) = &bucket.category.config.description {
                        println!("    {}", description);
                    }
                }
            }
        }
        "slug" | "slugs" => {
            let slugs = shelf.resolver().list_all_slugs(&scope)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&slugs)?);
                return Ok(());
            }
            println!("Slugs ({}):", slugs.len());
            for entry in slugs {
                println!("  {}/{}", entry.locale, entry.slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: essay, post, project, category, slug",
                content_type
            );
        }
    }

    Ok(())
}
