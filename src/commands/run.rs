//! Run subcommand handler.
//!
//! Replays one instruction file inside a pty, mirroring its output to
//! stdout. The terminal recorder wraps this command, so everything printed
//! here is what ends up in the asciicast.

use std::path::Path;

use anyhow::Result;

use docbot::session::{CaptureSink, Instructions, TerminalSession};
use docbot::{CancelToken, Config};

pub fn handle(instructions: &Path) -> Result<()> {
    let config = Config::load()?;
    let cancel = CancelToken::new();
    cancel.install_ctrlc()?;

    let instructions = Instructions::load(instructions)?;
    let session = TerminalSession::new(instructions, config.session, cancel);
    session.run(CaptureSink::stdout())?;
    Ok(())
}
