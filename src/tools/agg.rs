//! agg asciicast-to-gif converter.

use std::path::Path;

use super::{run_tool, ClipConverter};
use crate::error::PipelineResult;

/// Wraps `agg <recording> <clip>`.
///
/// agg always prepends one blank frame to its output; the assembler
/// compensates with the frame editor.
pub struct Agg {
    program: String,
}

impl Agg {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl ClipConverter for Agg {
    fn convert(&self, recording: &Path, clip: &Path) -> PipelineResult<()> {
        let args = vec![recording.display().to_string(), clip.display().to_string()];
        run_tool(&self.program, &args)
    }
}
