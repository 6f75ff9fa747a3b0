//! Pipeline error taxonomy.
//!
//! Per-item errors (naming, external tools) are recoverable at the scene
//! level; an empty final manifest or a failed concatenation is fatal to the
//! whole run.

use std::path::PathBuf;

/// Result type used throughout the pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can occur while recording and assembling a project.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A file name does not follow the `<kind>_<id>.<ext>` convention.
    /// Recoverable: the file is skipped and reported.
    #[error("File name does not match <kind>_<id>.<ext>: {path}")]
    Naming { path: PathBuf },

    /// An expectation token never appeared in the terminal output.
    #[error("Timed out after {seconds}s waiting for {pattern:?}")]
    Timeout { pattern: String, seconds: u64 },

    /// The shell process could not be spawned inside the pty.
    #[error("Failed to spawn shell '{shell}': {message}")]
    Spawn { shell: String, message: String },

    /// An external tool exited non-zero.
    #[error("Tool '{tool}' failed{}: {stderr}", .exit_code.map(|c| format!(" with exit code {}", c)).unwrap_or_default())]
    ExternalTool {
        tool: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// An external tool is not installed.
    #[error("Required tool '{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    /// An expected directory or file is absent. Recoverable per scene,
    /// fatal when it leaves final assembly with nothing to concatenate.
    #[error("Missing resource: {path}")]
    MissingResource { path: PathBuf },

    /// A raw recording failed the asciicast validity check.
    #[error("Not a valid recording: {path}: {reason}")]
    InvalidRecording { path: PathBuf, reason: String },

    /// An instruction file could not be parsed.
    #[error("Invalid instructions in {path}: {message}")]
    InvalidInstructions { path: PathBuf, message: String },

    /// The run was interrupted by the user.
    #[error("Cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn naming(path: impl Into<PathBuf>) -> Self {
        Self::Naming { path: path.into() }
    }

    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::MissingResource { path: path.into() }
    }

    /// Whether a per-item failure should abort sibling items.
    ///
    /// Only cancellation propagates out of the per-item loop; everything
    /// else is reported and the loop moves on.
    pub fn aborts_scene(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
