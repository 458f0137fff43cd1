//! Create a new essay or project

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Shelf;

/// Create a new essay (in a locale) or project, returning its path
pub fn create_document(
    shelf: &Shelf,
    title: &str,
    kind: &str,
    locale: Option<&str>,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let now = chrono::Utc::now().with_timezone(&shelf.config.tz());

    let slug = match slug {
        Some(s) => s.trim().to_string(),
        None => slug::slugify(title),
    };
    if !crate::content::store::is_valid_slug(&slug) {
        anyhow::bail!("Cannot derive a file name from {:?}", title);
    }

    let extension = shelf
        .config
        .extensions
        .first()
        .map(String::as_str)
        .unwrap_or("mdx");

    let (target_dir, front_matter) = match kind {
        "project" => (
            shelf.projects_dir.clone(),
            format!(
                "---\ntitle: {}\nyear: {}\ncover:\n---\n",
                yaml_string(title),
                now.format("%Y")
            ),
        ),
        "essay" | "review" => {
            let locale = match locale {
                Some(code) => shelf.locales.parse(code)?,
                None => shelf.locales.default_locale().clone(),
            };
            (
                shelf.crafts_dir.join(locale.as_str()),
                format!(
                    "---\ntitle: {}\ncreateAt: {}\ntype: {}\ntag:\nkeywords: []\n---\n",
                    yaml_string(title),
                    now.format("%Y-%m-%d"),
                    kind
                ),
            )
        }
        _ => anyhow::bail!("Unknown kind: {}. Available: essay, review, project", kind),
    };

    fs::create_dir_all(&target_dir)?;
    let file_path = target_dir.join(format!("{}.{}", slug, extension));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, front_matter)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

/// Quote a title so YAML keeps it a string
fn yaml_string(s: &str) -> String {
    serde_yaml::to_string(s)
        .map(|y| y.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", s))
}
