//! Category descriptors (`category.toml`)
//!
//! A category folder may carry one descriptor:
//!
//! ```toml
//! name = "Reading Notes"
//! description = "Books I finished"
//! slug = "reading"
//! ```
//!
//! Descriptors are plain data. A descriptor that fails to parse is logged
//! and treated as empty; it never stops a build.

use std::fs;
use std::path::Path;

use super::{Category, CategoryDescriptor};
use crate::error::{ContentError, Result};

/// Parse descriptor text
pub fn parse_descriptor(text: &str) -> std::result::Result<CategoryDescriptor, toml::de::Error> {
    toml::from_str(text)
}

/// Load the descriptor at `path`. Missing or malformed files give an empty
/// descriptor; read failures on an existing file propagate.
pub fn load_descriptor(path: &Path) -> Result<CategoryDescriptor> {
    if !path.is_file() {
        return Ok(CategoryDescriptor::default());
    }

    let text = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
    match parse_descriptor(&text) {
        Ok(descriptor) => Ok(descriptor),
        Err(e) => {
            tracing::warn!("Failed to parse category descriptor {:?}: {}", path, e);
            Ok(CategoryDescriptor::default())
        }
    }
}

/// Category for a folder: descriptor slug if set, else the folder name
pub fn load_category(dir: &Path, descriptor_file: &str) -> Result<Category> {
    let folder = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let config = load_descriptor(&dir.join(descriptor_file))?;
    let slug = config
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or(folder);

    Ok(Category { slug, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_descriptor() {
        let d = parse_descriptor("name = \"Reading\"\ndescription = \"Books\"\n").unwrap();
        assert_eq!(d.name.as_deref(), Some("Reading"));
        assert_eq!(d.description.as_deref(), Some("Books"));
        assert!(d.slug.is_none());
    }

    #[test]
    fn test_malformed_descriptor_is_empty() {
        let dir = tempdir().unwrap();
        let cat_dir = dir.path().join("notes");
        fs::create_dir_all(&cat_dir).unwrap();
        fs::write(
            cat_dir.join("category.toml"),
            "module.exports = { name: 'Notes' }",
        )
        .unwrap();

        let category = load_category(&cat_dir, "category.toml").unwrap();
        assert_eq!(category.slug, "notes");
        assert_eq!(category.config, CategoryDescriptor::default());
    }

    #[test]
    fn test_descriptor_slug_overrides_folder() {
        let dir = tempdir().unwrap();
        let cat_dir = dir.path().join("01-reading");
        fs::create_dir_all(&cat_dir).unwrap();
        fs::write(
            cat_dir.join("category.toml"),
            "name = \"Reading\"\nslug = \"reading\"\n",
        )
        .unwrap();

        let category = load_category(&cat_dir, "category.toml").unwrap();
        assert_eq!(category.slug, "reading");
        assert_eq!(category.name(), "Reading");
    }

    #[test]
    fn test_missing_descriptor() {
        let dir = tempdir().unwrap();
        let category = load_category(dir.path(), "category.toml").unwrap();
        assert_eq!(category.config, CategoryDescriptor::default());
    }
}
