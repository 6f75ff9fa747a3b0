//! Linking visual clips with narration audio.
//!
//! A clip and an audio file belong together when they carry the same
//! ordering id. The match is exact on the parsed integer: clip id 1 pairs
//! with `read_1.mp3` and never with `read_11.mp3`. Clips themselves are
//! indexed by `(id, kind)` because ids are only unique within a kind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::catalog::{ordering_key, ContentKind};
use crate::error::PipelineResult;
use crate::project::Scene;

/// A visual clip and its narration audio, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub id: u32,
    pub kind: ContentKind,
    pub clip: PathBuf,
    pub audio: Option<PathBuf>,
}

/// Pair every clip in the scene's gifs directory with audio from its audio
/// directory, ascending by id.
///
/// A missing gifs directory contributes nothing; a missing audio directory
/// pairs every clip with no audio. When two kinds share an id, both clips
/// survive and both pair with that id's audio.
pub fn link_scene(scene: &Scene) -> PipelineResult<Vec<Pairing>> {
    let clips = indexed_files(&scene.gifs_dir())?;
    let audio: BTreeMap<u32, PathBuf> = indexed_files(&scene.audio_dir())?
        .into_iter()
        .map(|((id, _), path)| (id, path))
        .collect();

    Ok(clips
        .into_iter()
        .map(|((id, kind), clip)| Pairing {
            id,
            kind,
            clip,
            audio: audio.get(&id).cloned(),
        })
        .collect())
}

/// Index a directory's artifacts by their `(id, kind)` key. Files whose
/// name does not yield a key are reported and skipped; duplicate keys keep
/// the first file seen.
pub(crate) fn indexed_files(dir: &Path) -> PipelineResult<BTreeMap<(u32, ContentKind), PathBuf>> {
    let mut indexed = BTreeMap::new();
    if !dir.is_dir() {
        return Ok(indexed);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match ordering_key(&path) {
            Some(key) => {
                if indexed.contains_key(&key) {
                    warn!(path = %path.display(), id = key.0, kind = %key.1, "duplicate id, keeping first");
                } else {
                    indexed.insert(key, path);
                }
            }
            None => warn!(path = %path.display(), "skipping file without a <kind>_<id> name"),
        }
    }
    Ok(indexed)
}
