//! Stimulus CLI - non-interactive front end
//!
//! - Generate a stimulus table (and optionally its images)
//! - Render images for an existing table with a chosen layout
//! - Preview a table in the terminal

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::stdout;
use std::path::PathBuf;
use stimulus_core::config::{RunConfig, Settings};
use stimulus_core::core::types::{Task, TransformType};
use stimulus_core::persistence::load_table;
use stimulus_core::pipeline;
use stimulus_core::preview::print_rows;
use stimulus_core::render::layout::{LayoutPreset, RenderConfig, RowRange};
use stimulus_core::render::Renderer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stimulus")]
#[command(about = "Flanker and Stroop stimulus set generator", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file path
    #[arg(short, long, env = "STIMULUS_CONFIG")]
    config: Option<PathBuf>,

    /// Font used for rendering (overrides the settings file)
    #[arg(long, env = "STIMULUS_FONT")]
    font: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a stimulus table
    #[command(alias = "gen")]
    Generate {
        /// flanker or stroop
        task: Task,

        /// letter or number (flanker only)
        #[arg(short, long)]
        style: Option<String>,

        /// type1 .. type4
        #[arg(short = 't', long = "type", default_value = "type1")]
        transform: TransformType,

        /// Table file (.json or .bin); defaults under the data folder
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also render one image per row
        #[arg(short, long)]
        render: bool,
    },

    /// Render images for an existing table
    Render {
        /// Table file (.json or .bin)
        table: PathBuf,

        /// Folder for the images
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Built-in layout
        #[arg(short, long, default_value = "flanker", conflicts_with = "layout_file")]
        layout: LayoutPreset,

        /// Layout read from a JSON file
        #[arg(long)]
        layout_file: Option<PathBuf>,

        /// First row to render (1-based)
        #[arg(long)]
        start: Option<usize>,

        /// Last row to render (inclusive)
        #[arg(long)]
        end: Option<usize>,
    },

    /// Print the rows of a table
    Preview {
        table: PathBuf,

        /// Show at most this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show the effective settings
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if cli.font.is_some() {
        settings.font_path = cli.font;
    }

    match cli.command {
        Commands::Generate { task, style, transform, output, render } => {
            let config = RunConfig::new(task, style.as_deref(), transform, output, render, &settings)?;
            let summary = pipeline::run(&config)?;
            println!("Wrote {} rows to {}", summary.rows, summary.table_path.display());
            if let Some(report) = summary.render {
                println!("Rendered {} images into {}", report.written.len(), config.image_dir.display());
                if !report.is_complete() {
                    anyhow::bail!("{} rows could not be rendered", report.failed.len());
                }
            }
            Ok(())
        }
        Commands::Render { table, out_dir, layout, layout_file, start, end } => {
            let range = RowRange::new(start, end)?;
            let layout = match layout_file {
                Some(path) => RenderConfig::from_file(&path)?,
                None => layout.config(),
            }
            .with_font(settings.font_path);
            let table = load_table(&table)?;
            let report = Renderer::new(layout)?.render_table(&table, &out_dir, range)?;
            println!("Rendered {} images into {}", report.written.len(), out_dir.display());
            for (row, reason) in &report.failed {
                eprintln!("  row {}: {}", row, reason);
            }
            if !report.is_complete() {
                anyhow::bail!("{} rows could not be rendered", report.failed.len());
            }
            Ok(())
        }
        Commands::Preview { table, limit } => {
            let rows = load_table(&table)?.stimulus_rows()?;
            print_rows(&mut stdout(), &rows, limit)?;
            Ok(())
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}
