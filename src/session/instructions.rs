//! Instruction files for the terminal runner.
//!
//! Each `commands_<id>.yaml` file carries exactly two parallel lists: the
//! command strings to type and, for each, the expectation token to wait for
//! before moving on. The token is either a literal substring of the
//! terminal output or the sentinel `prompt`, meaning the shell's own ready
//! marker.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};

/// Sentinel expectation value meaning "wait for the shell prompt".
pub const PROMPT_SENTINEL: &str = "prompt";

/// What to wait for after typing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expect {
    /// The shell's ready marker.
    Prompt,
    /// A literal substring of the terminal output.
    Literal(String),
}

impl Expect {
    fn from_token(token: &str) -> Self {
        if token == PROMPT_SENTINEL {
            Expect::Prompt
        } else {
            Expect::Literal(token.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInstructions {
    commands: Vec<String>,
    expect: Vec<String>,
}

/// A parsed instruction file.
#[derive(Debug, Clone)]
pub struct Instructions {
    pub commands: Vec<String>,
    pub expect: Vec<Expect>,
}

impl Instructions {
    /// Load and validate an instruction file.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|message| PipelineError::InvalidInstructions {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse instruction YAML. The two lists must be the same length: each
    /// command has exactly one expectation.
    pub fn parse(content: &str) -> Result<Self, String> {
        let raw: RawInstructions = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        if raw.commands.is_empty() {
            return Err("instruction file contains no commands".to_string());
        }
        if raw.commands.len() != raw.expect.len() {
            return Err(format!(
                "{} commands but {} expectations",
                raw.commands.len(),
                raw.expect.len()
            ));
        }
        let expect = raw.expect.iter().map(|t| Expect::from_token(t)).collect();
        Ok(Instructions {
            commands: raw.commands,
            expect,
        })
    }
}
