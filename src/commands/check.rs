//! Check the content store for slug collisions

use anyhow::Result;

use crate::Shelf;

/// Report every slug defined by more than one file. Fails when any exist.
pub fn run(shelf: &Shelf) -> Result<()> {
    let collisions = shelf.index().find_collisions()?;

    if collisions.is_empty() {
        println!("No slug collisions.");
        return Ok(());
    }

    for collision in &collisions {
        println!("{}: {}", collision.scope, collision.slug);
        for path in &collision.paths {
            let shown = path.strip_prefix(&shelf.base_dir).unwrap_or(path);
            println!("  {}", shown.display());
        }
    }

    anyhow::bail!("{} slug collision(s) found", collisions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_fails_on_collision() {
        let dir = tempdir().unwrap();
        let shelf = Shelf::with_config(dir.path(), SiteConfig::default()).unwrap();
        let en = shelf.crafts_dir.join("en");
        fs::create_dir_all(&en).unwrap();
        fs::write(en.join("walden.mdx"), "---\ntitle: A\n---\n").unwrap();
        assert!(run(&shelf).is_ok());

        fs::write(en.join("walden.md"), "---\ntitle: B\n---\n").unwrap();
        let err = run(&shelf).unwrap_err();
        assert!(err.to_string().contains("1 slug collision"));
    }
}
