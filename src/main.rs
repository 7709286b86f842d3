mod config;
mod data;
mod error;
mod pipeline;
mod plot;

use anyhow::{Context, Result};
use log::info;

use config::PipelineConfig;
use data::loader::DirSource;
use pipeline::Pipeline;

fn main() -> Result<()> {
    env_logger::init();

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let pipeline = Pipeline::new(DirSource::new(&cwd), PipelineConfig::default());
    info!(
        "converting *.{} files in {}",
        pipeline.config().input_extension,
        cwd.display()
    );

    let report = pipeline
        .run(&cwd)
        .with_context(|| format!("converting exports in {}", cwd.display()))?;

    info!(
        "done: {} plots written, {} files without data section",
        report.written.len(),
        report.skipped.len()
    );
    Ok(())
}
