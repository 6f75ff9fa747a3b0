//! Content discovery and ordering.
//!
//! Content files encode their position in the scene in their file name:
//! `<kind>_<id>.<ext>`, where `<id>` is a base-10 non-negative integer.
//! The catalog scans a scene's kind subdirectories, extracts that key and
//! produces one sequence ordered ascending by id across all kinds pooled
//! together. A file whose name does not yield an id is skipped and
//! reported, never fatal.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::PipelineResult;
use crate::project::Scene;

/// The kinds of content a scene can contain.
///
/// Adding a kind here forces every dispatch site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentKind {
    /// A typed shell command sequence, recorded through the pty runner.
    Commands,
    /// An editor automation script.
    Edit,
    /// Narration text, synthesized to audio and linked separately.
    Read,
    /// A slide to display.
    Slides,
}

impl ContentKind {
    /// Every supported kind, in subdirectory-scan order.
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Commands,
        ContentKind::Edit,
        ContentKind::Read,
        ContentKind::Slides,
    ];

    /// The scene subdirectory holding this kind.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentKind::Commands => "commands",
            ContentKind::Edit => "edit",
            ContentKind::Read => "read",
            ContentKind::Slides => "slides",
        }
    }

    /// Whether items of this kind belong in the played-back sequence.
    ///
    /// Narration text is excluded: its audio is linked to visual clips
    /// later instead of being played in sequence.
    pub fn is_sequenced(&self) -> bool {
        !matches!(self, ContentKind::Read)
    }

    /// The kind whose artifacts carry this file-name prefix.
    pub fn from_prefix(prefix: &str) -> Option<ContentKind> {
        ContentKind::ALL.into_iter().find(|k| k.dir_name() == prefix)
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One content file with its ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub id: u32,
    pub path: PathBuf,
}

/// Extract the ordering id from a file name.
///
/// The base name without extension is split on the *last* underscore and
/// the trailing segment parsed as a non-negative integer. `commands_2.yaml`
/// yields 2; `read_notes.txt` and `freestanding.txt` yield `None`.
pub fn ordering_id(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let (_, suffix) = stem.rsplit_once('_')?;
    suffix.parse().ok()
}

/// Extract the full ordering key from an artifact file name.
///
/// Pipeline artifacts are named `<kind>_<id>.<ext>`. Ids are unique within
/// a kind, never across kinds: `commands_1` and `edit_1` can coexist in
/// one scene, so anything indexing artifacts must key on both parts.
pub fn ordering_key(path: &Path) -> Option<(u32, ContentKind)> {
    let stem = path.file_stem()?.to_str()?;
    let (prefix, suffix) = stem.rsplit_once('_')?;
    let id = suffix.parse().ok()?;
    let kind = ContentKind::from_prefix(prefix)?;
    Some((id, kind))
}

/// An ordered catalog of one scene's content.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    // Keyed by (id, kind): pooled ascending order by id, with a stable
    // tie-break between kinds sharing an id. Callers must not rely on the
    // tie-break.
    items: BTreeMap<(u32, ContentKind), PathBuf>,
    /// Files that did not carry a parseable ordering id.
    pub skipped: Vec<PathBuf>,
}

impl ContentCatalog {
    /// Scan a scene and build its catalog.
    ///
    /// A missing kind subdirectory contributes nothing. Re-scanning an
    /// unchanged scene yields an identical sequence.
    pub fn scan(scene: &Scene) -> PipelineResult<Self> {
        let mut catalog = ContentCatalog::default();
        for kind in ContentKind::ALL {
            if !kind.is_sequenced() {
                continue;
            }
            catalog.scan_kind(&scene.path, kind)?;
        }
        Ok(catalog)
    }

    fn scan_kind(&mut self, scene_path: &Path, kind: ContentKind) -> PipelineResult<()> {
        let dir = scene_path.join(kind.dir_name());
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            match ordering_id(&path) {
                Some(id) => self.insert(kind, id, path),
                None => {
                    warn!(path = %path.display(), "skipping content file without a numeric _<id> suffix");
                    self.skipped.push(path);
                }
            }
        }
        Ok(())
    }

    /// Insert an item. Collisions on (kind, id) keep the first file seen
    /// and warn; last-write-wins would silently reorder the video.
    fn insert(&mut self, kind: ContentKind, id: u32, path: PathBuf) {
        if let Some(existing) = self.items.get(&(id, kind)) {
            warn!(
                kept = %existing.display(),
                ignored = %path.display(),
                "duplicate ordering id {id} for kind {kind}, keeping first"
            );
            return;
        }
        self.items.insert((id, kind), path);
    }

    /// The ordered sequence of items, ascending by id.
    pub fn items(&self) -> Vec<ContentItem> {
        self.items
            .iter()
            .map(|(&(id, kind), path)| ContentItem {
                kind,
                id,
                path: path.clone(),
            })
            .collect()
    }

    /// Items of one kind only, ascending by id.
    pub fn items_of(&self, kind: ContentKind) -> Vec<ContentItem> {
        self.items()
            .into_iter()
            .filter(|item| item.kind == kind)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Scan the narration items of a scene, ascending by id.
///
/// Narration is kept out of [`ContentCatalog::scan`]'s sequence, but the
/// synthesis stage still needs the same id extraction and ordering.
pub fn narration_items(scene: &Scene) -> PipelineResult<Vec<ContentItem>> {
    let mut catalog = ContentCatalog::default();
    catalog.scan_kind(&scene.path, ContentKind::Read)?;
    Ok(catalog.items())
}
