//! Record subcommand handler.

use std::path::Path;

use anyhow::Result;

use super::pipeline;

pub fn handle(project: &Path) -> Result<()> {
    let pipeline = pipeline()?;
    let summary = pipeline.record(project)?;
    println!(
        "Recorded {} clip(s) across the project.",
        summary.recordings.len()
    );
    report_failures(&summary.failures);
    Ok(())
}

/// Print isolated item failures and exit non-zero if any occurred.
pub(super) fn report_failures(failures: &[docbot::report::ItemFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("{} item(s) failed:", failures.len());
    for failure in failures {
        eprintln!("  {}", failure);
    }
    std::process::exit(1);
}
