//! Narration synthesis.
//!
//! Reads each scene's `read_<id>.txt` items and drives the external
//! synthesizer into `audio/read_<id>.mp3`, preserving the ordering id so
//! the linker can pair audio with clips later.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::catalog::narration_items;
use crate::config::NarrationConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::project::Scene;
use crate::report::ItemFailure;
use crate::tools::Toolbox;

/// What a synthesis pass over one scene produced.
#[derive(Debug, Default)]
pub struct NarrationSummary {
    pub synthesized: Vec<PathBuf>,
    pub failures: Vec<ItemFailure>,
}

/// Synthesize every narration item of a scene. Item failures are isolated.
pub fn synthesize_scene(
    scene: &Scene,
    toolbox: &Toolbox,
    narration: &NarrationConfig,
    cancel: &CancelToken,
) -> PipelineResult<NarrationSummary> {
    let items = narration_items(scene)?;
    let mut summary = NarrationSummary::default();
    if items.is_empty() {
        return Ok(summary);
    }
    fs::create_dir_all(scene.audio_dir())?;

    for item in items {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        let output = scene.audio_dir().join(format!("read_{}.mp3", item.id));
        let result = (|| -> PipelineResult<PathBuf> {
            let text = fs::read_to_string(&item.path)?;
            // Line breaks in the script are formatting, not pauses.
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if output.exists() {
                fs::remove_file(&output)?;
            }
            info!(scene = scene.id, item = item.id, "synthesizing narration");
            toolbox.synthesizer.synthesize(&text, narration, &output)?;
            Ok(output.clone())
        })();
        match result {
            Ok(path) => summary.synthesized.push(path),
            Err(error) if error.aborts_scene() => return Err(error),
            Err(error) => {
                warn!(scene = scene.id, item = item.id, %error, "synthesis failed, continuing");
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
