//! gifsicle frame editor.

use std::path::Path;

use super::{run_tool, FrameEditor};
use crate::error::PipelineResult;

/// Wraps gifsicle to drop the first frame of a gif.
pub struct Gifsicle {
    program: String,
}

impl Gifsicle {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl FrameEditor for Gifsicle {
    fn drop_first_frame(&self, clip: &Path, output: &Path) -> PipelineResult<()> {
        // Frame selection needs unoptimized frames to stay intact.
        let args = vec![
            "--unoptimize".to_string(),
            clip.display().to_string(),
            "#1--1".to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        run_tool(&self.program, &args)
    }
}
