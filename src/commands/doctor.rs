//! Doctor subcommand handler.

use anyhow::Result;

use docbot::tools::missing_tools;
use docbot::Config;

pub fn handle() -> Result<()> {
    let config = Config::load()?;
    let missing = missing_tools(&config.tools);
    if missing.is_empty() {
        println!("All required tools found.");
        return Ok(());
    }
    eprintln!("Missing tool(s):");
    for tool in &missing {
        eprintln!("  {}", tool);
    }
    eprintln!("Install them and make sure they are on PATH.");
    std::process::exit(1);
}
