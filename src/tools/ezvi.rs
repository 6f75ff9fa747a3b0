//! ezvi editor automation.

use std::path::Path;

use super::{shell_quote, EditorAutomation};

/// Builds the `ezvi yaml <script>` command replayed under the recorder.
pub struct Ezvi {
    program: String,
}

impl Ezvi {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl EditorAutomation for Ezvi {
    fn command_for(&self, instructions: &Path) -> String {
        format!(
            "{} yaml {}",
            shell_quote(&self.program),
            shell_quote(&instructions.display().to_string())
        )
    }
}
