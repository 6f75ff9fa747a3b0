//! External collaborators.
//!
//! Every media transformation is delegated to an external program: the
//! terminal recorder captures pty byte streams, the converter turns
//! recordings into gifs, the frame editor and encoder shape the final
//! videos and the synthesizer produces narration audio. Each collaborator
//! sits behind a trait so tests can substitute it; the default
//! implementations shell out to the program named in [`ToolsConfig`].

mod agg;
mod asciinema;
mod ezvi;
mod ffmpeg;
mod gifsicle;
mod speech;

pub use agg::Agg;
pub use asciinema::Asciinema;
pub use ezvi::Ezvi;
pub use ffmpeg::{Ffmpeg, FfmpegCommand};
pub use gifsicle::Gifsicle;
pub use speech::GttsCli;

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::config::{NarrationConfig, ToolsConfig};
use crate::error::{PipelineError, PipelineResult};

/// Records a shell command's terminal session into an asciicast file.
pub trait TerminalRecorder: Send + Sync {
    /// Run `command` under the recorder, writing the capture to `output`.
    fn record(&self, command: &str, output: &Path) -> PipelineResult<()>;
}

/// Converts a raw recording into a visual clip.
pub trait ClipConverter: Send + Sync {
    fn convert(&self, recording: &Path, clip: &Path) -> PipelineResult<()>;
}

/// Produces the command line that replays an editor script. The command is
/// then run under the terminal recorder like any other session.
pub trait EditorAutomation: Send + Sync {
    fn command_for(&self, instructions: &Path) -> String;
}

/// Removes the converter's deterministic throwaway first frame.
pub trait FrameEditor: Send + Sync {
    fn drop_first_frame(&self, clip: &Path, output: &Path) -> PipelineResult<()>;
}

/// Renders, muxes and concatenates videos.
pub trait VideoEncoder: Send + Sync {
    /// Clip to mp4, dimensions normalized to even values.
    fn render_video(&self, clip: &Path, output: &Path) -> PipelineResult<()>;

    /// Mux narration onto a video: video stream copied, audio re-encoded
    /// into a codec the container accepts.
    fn mux_audio(&self, video: &Path, audio: &Path, output: &Path) -> PipelineResult<()>;

    /// Concatenate the clips listed in `manifest` into one file.
    fn concat(&self, manifest: &Path, output: &Path) -> PipelineResult<()>;
}

/// Synthesizes narration text into an audio file.
pub trait SpeechSynth: Send + Sync {
    fn synthesize(
        &self,
        text: &str,
        narration: &NarrationConfig,
        output: &Path,
    ) -> PipelineResult<()>;
}

/// The full set of collaborators a pipeline run needs.
pub struct Toolbox {
    pub recorder: Box<dyn TerminalRecorder>,
    pub converter: Box<dyn ClipConverter>,
    pub editor: Box<dyn EditorAutomation>,
    pub frame_editor: Box<dyn FrameEditor>,
    pub encoder: Box<dyn VideoEncoder>,
    pub synthesizer: Box<dyn SpeechSynth>,
}

impl Toolbox {
    /// Build the default process-spawning toolbox from configuration.
    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self {
            recorder: Box::new(Asciinema::new(&tools.recorder)),
            converter: Box::new(Agg::new(&tools.converter)),
            editor: Box::new(Ezvi::new(&tools.editor)),
            frame_editor: Box::new(Gifsicle::new(&tools.frame_editor)),
            encoder: Box::new(Ffmpeg::new(&tools.encoder)),
            synthesizer: Box::new(GttsCli::new(&tools.synthesizer)),
        }
    }
}

/// Check which of the configured programs are missing from PATH.
pub fn missing_tools(tools: &ToolsConfig) -> Vec<String> {
    [
        &tools.recorder,
        &tools.converter,
        &tools.editor,
        &tools.frame_editor,
        &tools.encoder,
        &tools.synthesizer,
    ]
    .into_iter()
    .filter(|program| which::which(program).is_err())
    .cloned()
    .collect()
}

/// Quote a string for a POSIX shell command line. The terminal recorder
/// hands its `-c` argument to a shell, so paths embedded there must
/// survive word splitting.
pub(crate) fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:".contains(c));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Run a tool to completion, mapping failures into the error taxonomy.
pub(crate) fn run_tool(program: &str, args: &[String]) -> PipelineResult<()> {
    debug!(tool = program, ?args, "invoking");
    let output = Command::new(program).args(args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PipelineError::ToolNotFound {
                tool: program.to_string(),
            }
        } else {
            PipelineError::ExternalTool {
                tool: program.to_string(),
                exit_code: None,
                stderr: e.to_string(),
            }
        }
    })?;

    if !output.status.success() {
        return Err(PipelineError::ExternalTool {
            tool: program.to_string(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_tool_maps_missing_binary() {
        let err = run_tool("definitely-not-a-real-binary-9c1f", &[]).unwrap_err();
        assert!(matches!(err, PipelineError::ToolNotFound { .. }));
    }

    #[test]
    fn run_tool_captures_nonzero_exit() {
        let err = run_tool("false", &[]).unwrap_err();
        match err {
            PipelineError::ExternalTool { tool, exit_code, .. } => {
                assert_eq!(tool, "false");
                assert_eq!(exit_code, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn run_tool_succeeds_on_zero_exit() {
        assert!(run_tool("true", &[]).is_ok());
    }

    #[test]
    fn shell_quote_leaves_plain_paths_alone() {
        assert_eq!(shell_quote("/usr/bin/docbot"), "/usr/bin/docbot");
        assert_eq!(shell_quote("commands_1.yaml"), "commands_1.yaml");
    }

    #[test]
    fn shell_quote_wraps_spaces_and_escapes_quotes() {
        assert_eq!(shell_quote("/my project/file"), "'/my project/file'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }
}
