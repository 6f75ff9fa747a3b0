//! Video subcommand handler: the full pipeline in one go.

use std::path::{Path, PathBuf};

use anyhow::Result;

use docbot::pipeline::FINAL_VIDEO_NAME;

use super::pipeline;

pub fn handle(project: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| project.join(FINAL_VIDEO_NAME));
    let pipeline = pipeline()?;
    let report = pipeline.video(project, &output)?;
    println!(
        "Recorded {} clip(s), narrated {} item(s), rendered {} clip(s).",
        report.recorded.recordings.len(),
        report.narrated.synthesized.len(),
        report.rendered.rendered.len()
    );
    println!("Final video: {}", report.final_video.display());

    let failures: Vec<_> = report
        .recorded
        .failures
        .iter()
        .chain(&report.narrated.failures)
        .chain(&report.rendered.failures)
        .collect();
    if !failures.is_empty() {
        eprintln!("{} item(s) failed along the way:", failures.len());
        for failure in failures {
            eprintln!("  {}", failure);
        }
        std::process::exit(1);
    }
    Ok(())
}
