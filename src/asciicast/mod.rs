//! asciicast v2 header validation.
//!
//! Reference: https://docs.asciinema.org/manual/asciicast/v2/
//!
//! The pipeline never replays recordings itself; it only needs to decide
//! whether a file the terminal recorder left behind is a genuine capture
//! before handing it to the converter. A recording is accepted when its
//! first line is a JSON header carrying the format version this pipeline
//! supports plus the terminal geometry, start timestamp and environment.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// The asciicast version the wrapped recorder emits.
pub const SUPPORTED_VERSION: u8 = 2;

/// asciicast v2 header, first line of every recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub version: u8,
    pub width: u32,
    pub height: u32,
    pub timestamp: i64,
    pub env: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl Header {
    /// Parse and validate a header line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let header: Header = serde_json::from_str(line).map_err(|e| e.to_string())?;
        if header.version != SUPPORTED_VERSION {
            return Err(format!(
                "unsupported asciicast version {} (expected {})",
                header.version, SUPPORTED_VERSION
            ));
        }
        Ok(header)
    }
}

/// Validate that a file is a genuine recording, returning its header.
pub fn validate(path: &Path) -> PipelineResult<Header> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut first_line = String::new();
    reader.read_line(&mut first_line)?;

    Header::parse(first_line.trim_end()).map_err(|reason| PipelineError::InvalidRecording {
        path: path.to_path_buf(),
        reason,
    })
}
