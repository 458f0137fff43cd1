//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Shelf;

/// Remove generated files
pub fn run(shelf: &Shelf) -> Result<()> {
    if shelf.public_dir.exists() {
        fs::remove_dir_all(&shelf.public_dir)?;
        tracing::info!("Deleted: {:?}", shelf.public_dir);
    }

    Ok(())
}
