//! Resolve one slug and print the document with its page metadata

use anyhow::Result;

use crate::content::LocaleScope;
use crate::generator::seo::{article_meta, PageKind};
use crate::Shelf;

/// How the caller picks a locale
#[derive(Debug, Clone, Default)]
pub struct ResolveArgs<'a> {
    pub locale: Option<&'a str>,
    pub accept_language: Option<&'a str>,
    pub project: bool,
    pub json: bool,
}

/// Scope for a lookup: explicit locale, negotiated locale, or any
pub fn scope_for(shelf: &Shelf, args: &ResolveArgs<'_>) -> Result<LocaleScope> {
    if let Some(code) = args.locale {
        return Ok(LocaleScope::Exact(shelf.locales.parse(code)?));
    }
    if let Some(header) = args.accept_language {
        let locale = shelf.locales.negotiate(header);
        tracing::debug!("Negotiated locale {} from {:?}", locale, header);
        return Ok(LocaleScope::Exact(locale));
    }
    Ok(LocaleScope::Any)
}

pub fn run(shelf: &Shelf, slug: &str, args: &ResolveArgs<'_>) -> Result<()> {
    let resolver = shelf.resolver();
    let (document, kind) = if args.project {
        (resolver.resolve_project(slug)?, PageKind::Project)
    } else {
        let scope = scope_for(shelf, args)?;
        (resolver.resolve(slug, &scope)?, PageKind::Essay)
    };

    let Some(document) = document else {
        anyhow::bail!("Not found: {}", slug);
    };
    let meta = article_meta(shelf, &document, kind);

    if args.json {
        let output = serde_json::json!({
            "slug": document.slug,
            "locale": document.locale,
            "frontmatter": document.frontmatter,
            "content": document.body,
            "meta": meta,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} [{}/{}]", meta.title, document.locale, document.slug);
    println!("  url:         {}", meta.canonical_url);
    println!("  description: {}", meta.description);
    if let Some(created) = &document.frontmatter.create_at {
        println!("  created:     {}", created);
    }
    if let Some(updated) = &document.frontmatter.update_at {
        println!("  updated:     {}", updated);
    }
    if !meta.keywords.is_empty() {
        println!("  keywords:    {}", meta.keywords.join(", "));
    }

    let outline = crate::content::markdown::outline(&document.body, 3);
    if !outline.is_empty() {
        println!("  contents:");
        for entry in outline {
            println!(
                "  {}- {} (#{})",
                "  ".repeat(entry.level as usize),
                entry.text,
                entry.id
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::tempdir;

    #[test]
    fn test_scope_for() {
        let dir = tempdir().unwrap();
        let shelf = Shelf::with_config(dir.path(), SiteConfig::default()).unwrap();

        let scope = scope_for(&shelf, &ResolveArgs::default()).unwrap();
        assert_eq!(scope, LocaleScope::Any);

        let args = ResolveArgs {
            accept_language: Some("zh-CN,zh;q=0.9,en;q=0.8"),
            ..Default::default()
        };
        let zh = shelf.locales.parse("zh").unwrap();
        assert_eq!(scope_for(&shelf, &args).unwrap(), LocaleScope::Exact(zh));

        let args = ResolveArgs {
            locale: Some("en"),
            accept_language: Some("zh"),
            ..Default::default()
        };
        let en = shelf.locales.parse("en").unwrap();
        assert_eq!(scope_for(&shelf, &args).unwrap(), LocaleScope::Exact(en));

        let args = ResolveArgs {
            locale: Some("fr"),
            ..Default::default()
        };
        assert!(scope_for(&shelf, &args).is_err());
    }
}
