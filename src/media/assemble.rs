//! Video assembly.
//!
//! Converts raw recordings to clips, renders each pairing to an mp4 and
//! concatenates everything, in project order, into the final video. Each
//! conversion tool leaves a known artifact behind: the converter always
//! prepends one throwaway frame (trimmed here), and the encoder's h264
//! output needs even dimensions (normalized here).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::asciicast;
use crate::cancel::CancelToken;
use crate::error::{PipelineError, PipelineResult};
use crate::media::link::{indexed_files, link_scene, Pairing};
use crate::project::{list_scenes, Scene};
use crate::report::ItemFailure;
use crate::tools::Toolbox;

/// Manifest file name, written at the project root.
pub const MANIFEST_NAME: &str = "manifest.txt";

/// What a render pass over one scene produced.
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub rendered: Vec<PathBuf>,
    pub failures: Vec<ItemFailure>,
}

/// Renders pairings and drives final concatenation.
pub struct VideoAssembler<'a> {
    toolbox: &'a Toolbox,
    cancel: CancelToken,
}

impl<'a> VideoAssembler<'a> {
    pub fn new(toolbox: &'a Toolbox, cancel: CancelToken) -> Self {
        Self { toolbox, cancel }
    }

    /// Convert every valid recording of a scene into a visual clip.
    ///
    /// Recordings that fail the asciicast validity check are reported and
    /// skipped; they would only produce a broken clip downstream.
    pub fn convert_scene(&self, scene: &Scene) -> PipelineResult<RenderSummary> {
        let recordings = indexed_files(&scene.asciicasts_dir())?;
        let mut summary = RenderSummary::default();
        if recordings.is_empty() {
            return Ok(summary);
        }
        fs::create_dir_all(scene.gifs_dir())?;

        for ((id, kind), recording) in recordings {
            if self.cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            let result = asciicast::validate(&recording).and_then(|_| {
                let clip = scene
                    .gifs_dir()
                    .join(stem_of(&recording))
                    .with_extension("gif");
                if clip.exists() {
                    fs::remove_file(&clip)?;
                }
                self.toolbox.converter.convert(&recording, &clip)?;
                Ok(clip)
            });
            match result {
                Ok(clip) => summary.rendered.push(clip),
                Err(error) if error.aborts_scene() => return Err(error),
                Err(error) => {
                    warn!(scene = scene.id, item = id, %error, "conversion failed, continuing");
                    summary.failures.push(ItemFailure {
                        scene_id: scene.id,
                        kind,
                        item_id: id,
                        error,
                    });
                }
            }
        }
        Ok(summary)
    }

    /// Render every pairing of a scene to `videos/<stem>.mp4`.
    pub fn render_scene(&self, scene: &Scene) -> PipelineResult<RenderSummary> {
        let pairings = link_scene(scene)?;
        let mut summary = RenderSummary::default();
        if pairings.is_empty() {
            return Ok(summary);
        }
        fs::create_dir_all(scene.videos_dir())?;

        for pairing in pairings {
            if self.cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            match self.render_pairing(scene, &pairing) {
                Ok(video) => summary.rendered.push(video),
                Err(error) if error.aborts_scene() => return Err(error),
                Err(error) => {
                    warn!(scene = scene.id, item = pairing.id, %error, "render failed, continuing");
                    summary.failures.push(ItemFailure {
                        scene_id: scene.id,
                        kind: pairing.kind,
                        item_id: pairing.id,
                        error,
                    });
                }
            }
        }
        Ok(summary)
    }

    /// One pairing: trim the converter's first frame, render with even
    /// dimensions, then mux narration if the pairing has any.
    fn render_pairing(&self, scene: &Scene, pairing: &Pairing) -> PipelineResult<PathBuf> {
        let stem = stem_of(&pairing.clip);
        let videos = scene.videos_dir();
        let target = videos.join(&stem).with_extension("mp4");
        if target.exists() {
            fs::remove_file(&target)?;
        }

        let trimmed = videos.join(format!("{stem}.trimmed.gif"));
        let result = (|| {
            self.toolbox
                .frame_editor
                .drop_first_frame(&pairing.clip, &trimmed)?;

            match &pairing.audio {
                Some(audio) => {
                    let silent = videos.join(format!("{stem}.silent.mp4"));
                    self.toolbox.encoder.render_video(&trimmed, &silent)?;
                    let muxed = self.toolbox.encoder.mux_audio(&silent, audio, &target);
                    let _ = fs::remove_file(&silent);
                    muxed?;
                }
                None => self.toolbox.encoder.render_video(&trimmed, &target)?,
            }
            Ok(target.clone())
        })();
        let _ = fs::remove_file(&trimmed);
        result
    }

    /// Order every rendered clip of the project: scenes ascending by id,
    /// items ascending by id within each scene.
    pub fn ordered_clips(&self, project_root: &Path) -> PipelineResult<Vec<PathBuf>> {
        let mut clips = Vec::new();
        for scene in list_scenes(project_root)? {
            for (_, path) in indexed_files(&scene.videos_dir())? {
                if path.extension().is_some_and(|e| e == "mp4") {
                    clips.push(path);
                }
            }
        }
        Ok(clips)
    }

    /// Write the concatenation manifest: one `file '<path>'` line per clip.
    pub fn write_manifest(&self, clips: &[PathBuf], manifest: &Path) -> PipelineResult<()> {
        let mut content = String::new();
        for clip in clips {
            content.push_str(&format!("file '{}'\n", clip.display()));
        }
        fs::write(manifest, content)?;
        Ok(())
    }

    /// Final assembly: manifest plus one concatenation into `output`.
    ///
    /// Nothing to concatenate is fatal: an empty final video would be
    /// silent corruption, not success.
    pub fn assemble(&self, project_root: &Path, output: &Path) -> PipelineResult<PathBuf> {
        let clips = self.ordered_clips(project_root)?;
        if clips.is_empty() {
            return Err(PipelineError::missing(project_root.join(MANIFEST_NAME)));
        }

        let manifest = project_root.join(MANIFEST_NAME);
        self.write_manifest(&clips, &manifest)?;

        if output.exists() {
            fs::remove_file(output)?;
        }
        info!(clips = clips.len(), output = %output.display(), "concatenating final video");
        self.toolbox.encoder.concat(&manifest, output)?;
        Ok(output.to_path_buf())
    }
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("clip")
        .to_string()
}
