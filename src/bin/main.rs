use anyhow::Context;
use std::io::{stdin, stdout, Write};
use std::path::Path;
use stimulus_core::config::Settings;
use stimulus_core::persistence::load_table;
use stimulus_core::pipeline;
use stimulus_core::preview::print_rows;
use stimulus_core::render::{RenderReport, Renderer};
use stimulus_core::session::{RenderJob, Session, SessionRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SETTINGS_PATH: &str = "stimulus_settings.json";
const PREVIEW_ROWS: usize = 10;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let settings = Settings::load(Some(Path::new(SETTINGS_PATH))).context("loading settings")?;

    println!("Stimulus Set Generator. Answer each question and press [Enter].");
    println!("---------------------------------------------------------------");

    let request = Session::new(stdin().lock(), stdout()).prompt(&settings)?;
    match request {
        SessionRequest::Generate(config) => {
            let summary = pipeline::run(&config)?;
            println!("\nWrote {} rows to '{}'", summary.rows, summary.table_path.display());

            let rows = load_table(&summary.table_path)?.stimulus_rows()?;
            print_rows(&mut stdout(), &rows, Some(PREVIEW_ROWS))?;

            if let Some(report) = summary.render {
                println!("Rendered {} images into '{}'", report.written.len(), config.image_dir.display());
                check_report(&report)?;
            }
        }
        SessionRequest::Render(job) => render(job, &settings)?,
    }
    stdout().flush()?;
    Ok(())
}

fn render(job: RenderJob, settings: &Settings) -> anyhow::Result<()> {
    let table = load_table(&job.table_path)
        .with_context(|| format!("reading '{}'", job.table_path.display()))?;
    let layout = job.layout.config().with_font(settings.font_path.clone());
    let report = Renderer::new(layout)?.render_table(&table, &job.out_dir, job.range)?;
    println!("\nRendered {} images into '{}'", report.written.len(), job.out_dir.display());
    check_report(&report)
}

/// Lists skipped rows and fails the run if there were any.
fn check_report(report: &RenderReport) -> anyhow::Result<()> {
    if report.is_complete() {
        return Ok(());
    }
    println!("{} rows were skipped:", report.failed.len());
    for (row, reason) in &report.failed {
        println!("  row {}: {}", row, reason);
    }
    stdout().flush()?;
    anyhow::bail!("{} rows could not be rendered", report.failed.len())
}
