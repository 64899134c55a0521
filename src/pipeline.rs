// File: src/pipeline.rs
use crate::config::RunConfig;
use crate::core::generator::StimulusGenerator;
use crate::error::Result;
use crate::persistence::{load_table, save_table, StimulusTable};
use crate::render::layout::RowRange;
use crate::render::{RenderReport, Renderer};
use std::path::PathBuf;

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub table_path: PathBuf,
    pub rows: usize,
    pub render: Option<RenderReport>,
}

/// Generates the stimulus set, writes the table, and optionally renders
/// one image per row. The renderer reads the table back from disk, so it
/// sees exactly what was persisted.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;
    let generator = StimulusGenerator::new(config.alphabet, config.transform);
    tracing::info!(
        task = %config.task(),
        alphabet = %config.alphabet,
        transform = %config.transform,
        "generating stimulus set"
    );

    let table = StimulusTable::from_rows(generator.generate());
    let rows = table.len();
    save_table(&table, &config.output_path)?;
    drop(table);

    let render = if config.render_images {
        let table = load_table(&config.output_path)?;
        let renderer = Renderer::new(config.layout.clone())?;
        Some(renderer.render_table(&table, &config.image_dir, RowRange::ALL)?)
    } else {
        tracing::info!("image rendering skipped");
        None
    };

    Ok(RunSummary { table_path: config.output_path.clone(), rows, render })
}
