//! Per-item failure reporting.
//!
//! Item-level failures are isolated: the pipeline finishes everything it
//! can and surfaces what it could not, keyed by (scene id, item id), with
//! the artifacts of successful items left on disk.

use crate::catalog::ContentKind;
use crate::error::PipelineError;

/// One item that failed, with enough context to find it again.
#[derive(Debug)]
pub struct ItemFailure {
    pub scene_id: u32,
    pub kind: ContentKind,
    pub item_id: u32,
    pub error: PipelineError,
}

impl std::fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scene {} {} item {}: {}",
            self.scene_id, self.kind, self.item_id, self.error
        )
    }
}
