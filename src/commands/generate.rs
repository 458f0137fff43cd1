//! Generate build artefacts

use anyhow::Result;

use crate::generator::Generator;
use crate::Shelf;

/// Build the content index once and generate every artefact from it
pub fn run(shelf: &Shelf) -> Result<()> {
    let start = std::time::Instant::now();

    let index = shelf.index().build(false)?;
    let generated_at = chrono::Utc::now()
        .with_timezone(&shelf.config.tz())
        .naive_local();

    Generator::new(shelf).generate(&index, generated_at)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
