//! Scene recording.
//!
//! Walks a scene's ordered catalog and produces one raw recording per
//! recordable item. Command sequences replay through this binary's own
//! `run` subcommand under the terminal recorder; editor scripts replay
//! through the editor automation tool, also under the recorder. A failed
//! item is reported and does not abort its siblings.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::catalog::{ContentCatalog, ContentItem, ContentKind};
use crate::error::{PipelineError, PipelineResult};
use crate::project::Scene;
use crate::report::ItemFailure;
use crate::tools::{shell_quote, Toolbox};

/// What a recording pass produced.
#[derive(Debug, Default)]
pub struct RecordSummary {
    pub recordings: Vec<PathBuf>,
    pub failures: Vec<ItemFailure>,
}

/// Records every recordable item of a scene in catalog order.
pub struct SceneRecorder<'a> {
    toolbox: &'a Toolbox,
    /// Executable whose `run` subcommand replays command instructions.
    runner_exe: PathBuf,
    cancel: CancelToken,
}

impl<'a> SceneRecorder<'a> {
    pub fn new(toolbox: &'a Toolbox, runner_exe: PathBuf, cancel: CancelToken) -> Self {
        Self {
            toolbox,
            runner_exe,
            cancel,
        }
    }

    /// Record one scene. An empty catalog is fine and records nothing.
    pub fn record_scene(&self, scene: &Scene) -> PipelineResult<RecordSummary> {
        let catalog = ContentCatalog::scan(scene)?;
        let mut summary = RecordSummary::default();

        if catalog.is_empty() {
            info!(scene = scene.id, "scene has no recordable content");
            return Ok(summary);
        }

        fs::create_dir_all(scene.asciicasts_dir())?;

        for item in catalog.items() {
            if self.cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            match self.record_item(scene, &item) {
                Ok(Some(path)) => summary.recordings.push(path),
                Ok(None) => {}
                Err(error) if error.aborts_scene() => return Err(error),
                Err(error) => {
                    warn!(scene = scene.id, item = item.id, %error, "item failed, continuing");
                    summary.failures.push(ItemFailure {
                        scene_id: scene.id,
                        kind: item.kind,
                        item_id: item.id,
                        error,
                    });
                }
            }
        }
        Ok(summary)
    }

    /// Record one item, returning the recording path if the kind produces
    /// one.
    fn record_item(&self, scene: &Scene, item: &ContentItem) -> PipelineResult<Option<PathBuf>> {
        let command = match item.kind {
            ContentKind::Commands => {
                // The recorder passes this line to a shell; quote against
                // paths containing spaces.
                format!(
                    "{} run {}",
                    shell_quote(&self.runner_exe.display().to_string()),
                    shell_quote(&item.path.display().to_string())
                )
            }
            ContentKind::Edit => self.toolbox.editor.command_for(&item.path),
            ContentKind::Slides => {
                // No slide recorder exists yet; catalogued but skipped.
                info!(scene = scene.id, item = item.id, "skipping slide item");
                return Ok(None);
            }
            ContentKind::Read => unreachable!("narration is never sequenced"),
        };

        let output = self.recording_path(scene, item);
        // Overwrite, never append: a rerun replaces the artifact.
        if output.exists() {
            fs::remove_file(&output)?;
        }

        info!(scene = scene.id, item = item.id, kind = %item.kind, "recording");
        self.toolbox.recorder.record(&command, &output)?;
        Ok(Some(output))
    }

    /// Recording artifact path: `asciicasts/<kind>_<id>.cast`, preserving
    /// the ordering key for every later stage.
    fn recording_path(&self, scene: &Scene, item: &ContentItem) -> PathBuf {
        scene
            .asciicasts_dir()
            .join(format!("{}_{}.cast", item.kind, item.id))
    }
}
