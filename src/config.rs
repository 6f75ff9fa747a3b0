//! Configuration loading and defaults.
//!
//! Configuration lives in a TOML file under the user config directory
//! (`~/.config/docbot/config.toml` on Linux). Every field has a default so
//! a missing file is not an error. The project root is *not* part of the
//! file: it is passed explicitly to every pipeline entry point.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub narration: NarrationConfig,
    pub tools: ToolsConfig,
}

/// Terminal session behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Shell spawned inside the pty.
    pub shell: String,
    /// Substring that marks the shell as ready for the next command.
    pub prompt_marker: String,
    /// Base per-character typing delay in milliseconds. The actual delay
    /// is jittered around this value to look human.
    pub type_delay_ms: u64,
    /// Seconds to wait for an expectation before giving up.
    pub expect_timeout_secs: u64,
    /// Terminal geometry for the pty.
    pub columns: u16,
    pub rows: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            shell: "bash".to_string(),
            prompt_marker: "$".to_string(),
            type_delay_ms: 110,
            expect_timeout_secs: 30,
            columns: 80,
            rows: 24,
        }
    }
}

/// Narration synthesis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// BCP-47 language code passed to the synthesizer.
    pub language: String,
    /// Voice name, synthesizer-specific.
    pub voice: String,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            voice: "en-US-Standard-C".to_string(),
        }
    }
}

/// Names of the external programs the pipeline drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Terminal recorder (captures the pty byte stream).
    pub recorder: String,
    /// asciicast to gif converter.
    pub converter: String,
    /// Editor automation program for `edit` items.
    pub editor: String,
    /// Frame editor used to drop the converter's throwaway first frame.
    pub frame_editor: String,
    /// Video encoder and concatenator.
    pub encoder: String,
    /// Narration synthesizer (text in, mp3 out).
    pub synthesizer: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            recorder: "asciinema".to_string(),
            converter: "agg".to_string(),
            editor: "ezvi".to_string(),
            frame_editor: "gifsicle".to_string(),
            encoder: "ffmpeg".to_string(),
            synthesizer: "gtts-cli".to_string(),
        }
    }
}

impl Config {
    /// Path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("docbot").join("config.toml"))
    }

    /// Load config from disk, falling back to defaults if the file does
    /// not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Write the current config to disk, creating parent directories.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&path, toml_str)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.session.shell, "bash");
        assert_eq!(config.session.columns, 80);
        assert_eq!(config.tools.recorder, "asciinema");
        assert_eq!(config.narration.language, "en-US");
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let config: Config = toml::from_str("[session]\nshell = \"zsh\"\n").unwrap();
        assert_eq!(config.session.shell, "zsh");
        assert_eq!(config.session.prompt_marker, "$");
        assert_eq!(config.tools.encoder, "ffmpeg");
    }

    #[test]
    fn roundtrips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.session.type_delay_ms, config.session.type_delay_ms);
        assert_eq!(parsed.tools.converter, config.tools.converter);
    }
}
