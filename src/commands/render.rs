//! Render subcommand handler.

use std::path::{Path, PathBuf};

use anyhow::Result;

use docbot::pipeline::FINAL_VIDEO_NAME;

use super::pipeline;
use super::record::report_failures;

pub fn handle(project: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| project.join(FINAL_VIDEO_NAME));
    let pipeline = pipeline()?;
    let (final_video, summary) = pipeline.render(project, &output)?;
    println!(
        "Rendered {} clip(s), final video at {}",
        summary.rendered.len(),
        final_video.display()
    );
    report_failures(&summary.failures);
    Ok(())
}
