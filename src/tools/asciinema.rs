//! asciinema terminal recorder.

use std::path::Path;

use super::{run_tool, TerminalRecorder};
use crate::error::PipelineResult;

/// Wraps `asciinema rec -c <command> <output>`.
pub struct Asciinema {
    program: String,
}

impl Asciinema {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl TerminalRecorder for Asciinema {
    fn record(&self, command: &str, output: &Path) -> PipelineResult<()> {
        let args = vec![
            "rec".to_string(),
            "--overwrite".to_string(),
            "-c".to_string(),
            command.to_string(),
            output.display().to_string(),
        ];
        run_tool(&self.program, &args)
    }
}
