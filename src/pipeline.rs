//! Project-wide orchestration.
//!
//! Drives the stages in order over every scene: record, narrate, convert,
//! render, assemble. Scenes are processed sequentially in ascending id
//! order; the project tree is the only shared state between stages.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cancel::CancelToken;
use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::media::{RenderSummary, VideoAssembler};
use crate::narration::{synthesize_scene, NarrationSummary};
use crate::project::list_scenes;
use crate::record::{RecordSummary, SceneRecorder};
use crate::tools::Toolbox;

/// Default name of the final video, written at the project root.
pub const FINAL_VIDEO_NAME: &str = "final.mp4";

pub struct Pipeline {
    config: Config,
    toolbox: Toolbox,
    cancel: CancelToken,
    runner_exe: PathBuf,
}

impl Pipeline {
    /// Build a pipeline with the default process-spawning toolbox.
    pub fn new(config: Config, cancel: CancelToken) -> PipelineResult<Self> {
        let toolbox = Toolbox::from_config(&config.tools);
        Self::with_toolbox(config, toolbox, cancel)
    }

    /// Build a pipeline around a caller-supplied toolbox.
    pub fn with_toolbox(
        config: Config,
        toolbox: Toolbox,
        cancel: CancelToken,
    ) -> PipelineResult<Self> {
        let runner_exe = std::env::current_exe()?;
        Ok(Self {
            config,
            toolbox,
            cancel,
            runner_exe,
        })
    }

    /// Override the executable used for `run` replay (tests).
    pub fn set_runner_exe(&mut self, exe: PathBuf) {
        self.runner_exe = exe;
    }

    /// Record every scene of the project.
    pub fn record(&self, project_root: &Path) -> PipelineResult<RecordSummary> {
        let recorder = SceneRecorder::new(&self.toolbox, self.runner_exe.clone(), self.cancel.clone());
        let mut summary = RecordSummary::default();
        for scene in list_scenes(project_root)? {
            info!(scene = scene.id, "recording scene");
            let scene_summary = recorder.record_scene(&scene)?;
            summary.recordings.extend(scene_summary.recordings);
            summary.failures.extend(scene_summary.failures);
        }
        Ok(summary)
    }

    /// Synthesize narration for every scene.
    pub fn narrate(&self, project_root: &Path) -> PipelineResult<NarrationSummary> {
        let mut summary = NarrationSummary::default();
        for scene in list_scenes(project_root)? {
            let scene_summary = synthesize_scene(
                &scene,
                &self.toolbox,
                &self.config.narration,
                &self.cancel,
            )?;
            summary.synthesized.extend(scene_summary.synthesized);
            summary.failures.extend(scene_summary.failures);
        }
        Ok(summary)
    }

    /// Convert recordings, render every pairing and concatenate the final
    /// video. Returns the render summary along with the final video path.
    pub fn render(&self, project_root: &Path, output: &Path) -> PipelineResult<(PathBuf, RenderSummary)> {
        let assembler = VideoAssembler::new(&self.toolbox, self.cancel.clone());
        let mut summary = RenderSummary::default();
        for scene in list_scenes(project_root)? {
            let converted = assembler.convert_scene(&scene)?;
            summary.failures.extend(converted.failures);
            let rendered = assembler.render_scene(&scene)?;
            summary.rendered.extend(rendered.rendered);
            summary.failures.extend(rendered.failures);
        }
        let final_video = assembler.assemble(project_root, output)?;
        Ok((final_video, summary))
    }

    /// The full pipeline: record, narrate, render, assemble.
    pub fn video(&self, project_root: &Path, output: &Path) -> PipelineResult<VideoReport> {
        let recorded = self.record(project_root)?;
        if self.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        let narrated = self.narrate(project_root)?;
        let (final_video, rendered) = self.render(project_root, output)?;
        Ok(VideoReport {
            final_video,
            recorded,
            narrated,
            rendered,
        })
    }
}

/// Everything a full run produced, successes and failures both.
#[derive(Debug)]
pub struct VideoReport {
    pub final_video: PathBuf,
    pub recorded: RecordSummary,
    pub narrated: NarrationSummary,
    pub rendered: RenderSummary,
}

impl VideoReport {
    pub fn failure_count(&self) -> usize {
        self.recorded.failures.len() + self.narrated.failures.len() + self.rendered.failures.len()
    }
}
