//! Binary entry point: load config, fetch the count, run the pipeline,
//! print the latency summary.

use anyhow::{Context, Result};

use word_reader::api::{HttpWordApi, WordApi};
use word_reader::config::Config;
use word_reader::pipeline::{self, RunState};
use word_reader::render::{self, ConsoleRenderer};
use word_reader::telemetry;

#[allow(clippy::print_stdout)]
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    telemetry::init(&config.telemetry)?;
    tracing::info!("word-reader starting");

    let api = HttpWordApi::new(&config.api)?;

    let count = api
        .fetch_count()
        .await
        .context("failed to load word count")?;
    tracing::info!(count, "word count loaded");
    println!("Fetching {count} words from {}\n", config.api.base_url);

    let mut state = RunState::new(count);
    let mut renderer = ConsoleRenderer::new();
    let outcome = pipeline::run(&api, &mut state, &mut renderer).await;

    // Summary covers partial runs too; the transcript stays observable on error
    render::print_summary(&state);

    if let Err(e) = outcome {
        tracing::error!(index = e.index, error = %e, "pipeline aborted");
        return Err(e.into());
    }

    Ok(())
}
