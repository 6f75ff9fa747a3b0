//! ffmpeg video encoder.

use std::path::{Path, PathBuf};

use super::{run_tool, VideoEncoder};
use crate::error::PipelineResult;

/// Filter normalizing both dimensions to even values; libx264 rejects odd
/// widths and heights.
const EVEN_DIMENSIONS: &str = "scale=trunc(iw/2)*2:trunc(ih/2)*2";

/// Small builder for ffmpeg invocations: input arguments go before `-i`,
/// output arguments after.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    inputs: Vec<(Vec<String>, PathBuf)>,
    output_args: Vec<String>,
    output: PathBuf,
}

impl FfmpegCommand {
    pub fn new(output: impl AsRef<Path>) -> Self {
        Self {
            inputs: Vec::new(),
            output_args: Vec::new(),
            output: output.as_ref().to_path_buf(),
        }
    }

    pub fn input(mut self, path: impl AsRef<Path>) -> Self {
        self.inputs.push((Vec::new(), path.as_ref().to_path_buf()));
        self
    }

    /// Add an input with its own preceding arguments.
    pub fn input_with_args<I, S>(mut self, args: I, path: impl AsRef<Path>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.push((
            args.into_iter().map(Into::into).collect(),
            path.as_ref().to_path_buf(),
        ));
        self
    }

    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
        ];
        for (input_args, path) in &self.inputs {
            args.extend(input_args.iter().cloned());
            args.push("-i".to_string());
            args.push(path.display().to_string());
        }
        args.extend(self.output_args.iter().cloned());
        args.push(self.output.display().to_string());
        args
    }
}

/// The default encoder, shelling out to ffmpeg.
pub struct Ffmpeg {
    program: String,
}

impl Ffmpeg {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn run(&self, command: FfmpegCommand) -> PipelineResult<()> {
        run_tool(&self.program, &command.build_args())
    }
}

impl VideoEncoder for Ffmpeg {
    fn render_video(&self, clip: &Path, output: &Path) -> PipelineResult<()> {
        self.run(
            FfmpegCommand::new(output).input(clip).output_args([
                "-movflags",
                "faststart",
                "-pix_fmt",
                "yuv420p",
                "-vf",
                EVEN_DIMENSIONS,
            ]),
        )
    }

    fn mux_audio(&self, video: &Path, audio: &Path, output: &Path) -> PipelineResult<()> {
        self.run(
            FfmpegCommand::new(output)
                .input(video)
                .input(audio)
                .output_args(["-c:v", "copy", "-c:a", "aac", "-shortest"]),
        )
    }

    fn concat(&self, manifest: &Path, output: &Path) -> PipelineResult<()> {
        // Each clip was encoded independently; regenerating presentation
        // timestamps keeps audio and video aligned across boundaries.
        self.run(
            FfmpegCommand::new(output)
                .input_with_args(
                    ["-f", "concat", "-safe", "0", "-fflags", "+genpts"],
                    manifest,
                )
                .output_args(["-c", "copy", "-movflags", "+faststart"]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_order_inputs_then_outputs() {
        let cmd = FfmpegCommand::new("/out.mp4")
            .input("/clip.gif")
            .output_args(["-pix_fmt", "yuv420p"]);
        let args = cmd.build_args();
        assert_eq!(args[0], "-y");
        let i = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[i + 1], "/clip.gif");
        assert!(args.iter().position(|a| a == "-pix_fmt").unwrap() > i);
        assert_eq!(args.last().unwrap(), "/out.mp4");
    }

    #[test]
    fn input_args_precede_their_input() {
        let cmd = FfmpegCommand::new("/final.mp4")
            .input_with_args(["-f", "concat", "-safe", "0"], "/manifest.txt")
            .output_args(["-c", "copy"]);
        let args = cmd.build_args();
        let f = args.iter().position(|a| a == "-f").unwrap();
        let i = args.iter().position(|a| a == "-i").unwrap();
        assert!(f < i);
        assert_eq!(args[i + 1], "/manifest.txt");
    }

    #[test]
    fn mux_copies_video_and_reencodes_audio() {
        let cmd = FfmpegCommand::new("/out.mp4")
            .input("/video.mp4")
            .input("/audio.mp3")
            .output_args(["-c:v", "copy", "-c:a", "aac", "-shortest"]);
        let args = cmd.build_args();
        let copy = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(args[copy + 1], "copy");
        let aac = args.iter().position(|a| a == "-c:a").unwrap();
        assert_eq!(args[aac + 1], "aac");
    }
}
