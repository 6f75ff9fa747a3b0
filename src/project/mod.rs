//! Project and scene directory layout.
//!
//! A project is a directory of `scene_<n>` subdirectories. Each scene holds
//! content under per-kind subdirectories (`commands/`, `edit/`, `read/`,
//! `slides/`) and derived artifacts under `asciicasts/`, `gifs/`, `audio/`
//! and `videos/`. The layout is produced by the setup stage; the pipeline
//! only writes derived artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PipelineResult;

/// Prefix of every scene directory.
pub const SCENE_PREFIX: &str = "scene_";

/// Raw terminal recordings.
pub const ASCIICASTS_DIR: &str = "asciicasts";
/// Converted visual clips.
pub const GIFS_DIR: &str = "gifs";
/// Synthesized narration audio.
pub const AUDIO_DIR: &str = "audio";
/// Rendered per-item videos.
pub const VIDEOS_DIR: &str = "videos";

/// One scene of a project: a positive integer id and its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub id: u32,
    pub path: PathBuf,
}

impl Scene {
    pub fn asciicasts_dir(&self) -> PathBuf {
        self.path.join(ASCIICASTS_DIR)
    }

    pub fn gifs_dir(&self) -> PathBuf {
        self.path.join(GIFS_DIR)
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.path.join(AUDIO_DIR)
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.path.join(VIDEOS_DIR)
    }
}

/// Parse a scene id from a directory name like `scene_3`.
///
/// Returns `None` for anything that is not `scene_<positive integer>`.
fn parse_scene_id(name: &str) -> Option<u32> {
    let suffix = name.strip_prefix(SCENE_PREFIX)?;
    let id: u32 = suffix.parse().ok()?;
    if id == 0 {
        return None;
    }
    Some(id)
}

/// Whether a directory is a scene.
pub fn is_scene(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_scene_id)
            .is_some()
}

/// List every scene of a project, ascending by id.
///
/// Gaps in the numbering are fine (scene_1 and scene_3 with no scene_2 is a
/// valid project). Entries that are not scenes are ignored with a debug
/// note so a stray file does not abort a run.
pub fn list_scenes(project_root: &Path) -> PipelineResult<Vec<Scene>> {
    let mut scenes = Vec::new();
    for entry in fs::read_dir(project_root)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        match parse_scene_id(&name) {
            Some(id) if path.is_dir() => scenes.push(Scene { id, path }),
            _ => debug!(entry = %name, "ignoring non-scene entry"),
        }
    }
    scenes.sort_by_key(|s| s.id);
    Ok(scenes)
}
