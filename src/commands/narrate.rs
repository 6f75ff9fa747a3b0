//! Narrate subcommand handler.

use std::path::Path;

use anyhow::Result;

use super::pipeline;
use super::record::report_failures;

pub fn handle(project: &Path) -> Result<()> {
    let pipeline = pipeline()?;
    let summary = pipeline.narrate(project)?;
    println!(
        "Synthesized {} narration file(s).",
        summary.synthesized.len()
    );
    report_failures(&summary.failures);
    Ok(())
}
