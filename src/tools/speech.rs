//! gtts-cli narration synthesizer.

use std::path::Path;

use super::{run_tool, SpeechSynth};
use crate::config::NarrationConfig;
use crate::error::PipelineResult;

/// Wraps `gtts-cli --lang <lang> --output <file> <text>`.
///
/// gtts-cli only understands the primary language subtag; the configured
/// voice name is ignored by this synthesizer.
pub struct GttsCli {
    program: String,
}

impl GttsCli {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn primary_subtag(language: &str) -> &str {
        language.split('-').next().unwrap_or(language)
    }
}

impl SpeechSynth for GttsCli {
    fn synthesize(
        &self,
        text: &str,
        narration: &NarrationConfig,
        output: &Path,
    ) -> PipelineResult<()> {
        let args = vec![
            "--lang".to_string(),
            Self::primary_subtag(&narration.language).to_string(),
            "--output".to_string(),
            output.display().to_string(),
            text.to_string(),
        ];
        run_tool(&self.program, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_region_from_language_tag() {
        assert_eq!(GttsCli::primary_subtag("en-US"), "en");
        assert_eq!(GttsCli::primary_subtag("fr"), "fr");
    }
}
