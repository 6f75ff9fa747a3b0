//! CLI subcommand handlers.

pub mod config;
pub mod doctor;
pub mod narrate;
pub mod record;
pub mod render;
pub mod run;
pub mod video;

use anyhow::Result;

use docbot::{CancelToken, Config, Pipeline};

/// Build the pipeline shared by the project-level subcommands.
fn pipeline() -> Result<Pipeline> {
    let config = Config::load()?;
    let cancel = CancelToken::new();
    cancel.install_ctrlc()?;
    Ok(Pipeline::new(config, cancel)?)
}
