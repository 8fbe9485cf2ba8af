pub mod publish;
pub mod render;

use crate::config::Config;
use crate::error::PipelineError;
use crate::store::ScoreStore;
use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use self::render::Template;

/// Outcome of one successful regeneration run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub rows: usize,
    pub generated_at: String,
}

/// Execute one regeneration pass: validate the template, query the ranked
/// top scorers, render, and atomically publish.
///
/// The template is validated before the store is opened so that a broken
/// deployment fails before any I/O beyond a read. Each run is
/// all-or-nothing: any error aborts with the previously published page
/// still live, and recovery is the scheduler's next trigger.
pub fn run(config: &Config) -> Result<RunReport, PipelineError> {
    let template = Template::load(&config.template_path)?;
    log::debug!("template loaded from {}", config.template_path.display());

    let store = ScoreStore::open(
        &config.store_path,
        Duration::from_millis(config.query_timeout_ms),
    )?;
    let entries = store.top_scores(config.top_n)?;
    log::debug!("ranked {} eligible scorers", entries.len());

    let generated_at = config.timestamp_format.render(Utc::now());
    let page = template.render(&entries, &generated_at);

    publish::publish(&page, &config.output_path)?;
    log::info!(
        "published {} rows to {}",
        entries.len(),
        config.output_path.display()
    );

    Ok(RunReport {
        output_path: config.output_path.clone(),
        rows: entries.len(),
        generated_at,
    })
}
