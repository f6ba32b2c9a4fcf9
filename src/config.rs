use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::engine::translator::EngineConfig;
use crate::error::{ParloError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub translation: TranslationConfig,
    pub synthesis: SynthesisConfig,
}

/// Recognition and translation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslationConfig {
    /// BCP-47 code of the language being spoken, e.g. "ja-JP".
    pub source_language: String,
    /// Bare language codes to translate into, e.g. ["de", "fr"].
    pub target_languages: Vec<String>,
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Which target language's translation is spoken aloud.
    pub speak_language: String,
    /// Service-defined voice name used to speak it.
    pub voice: String,
    /// How many synthesis requests may queue behind the in-flight one.
    pub queue_capacity: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            source_language: defaults::SOURCE_LANGUAGE.to_string(),
            target_languages: vec![defaults::TARGET_LANGUAGE.to_string()],
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            speak_language: defaults::TARGET_LANGUAGE.to_string(),
            voice: defaults::SYNTHESIS_VOICE.to_string(),
            queue_capacity: defaults::SYNTHESIS_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ParloError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ParloError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ParloError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - PARLO_SOURCE_LANGUAGE → translation.source_language
    /// - PARLO_TARGET_LANGUAGE → translation.target_languages (single entry)
    ///   and synthesis.speak_language, so the spoken language follows the
    ///   override
    /// - PARLO_VOICE → synthesis.voice
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(language) = std::env::var("PARLO_SOURCE_LANGUAGE")
            && !language.is_empty()
        {
            self.translation.source_language = language;
        }

        if let Ok(target) = std::env::var("PARLO_TARGET_LANGUAGE")
            && !target.is_empty()
        {
            self.translation.target_languages = vec![target.clone()];
            self.synthesis.speak_language = target;
        }

        if let Ok(voice) = std::env::var("PARLO_VOICE")
            && !voice.is_empty()
        {
            self.synthesis.voice = voice;
        }

        self
    }

    /// Check cross-field constraints that serde defaults can't express.
    pub fn validate(&self) -> Result<()> {
        if self.translation.target_languages.is_empty() {
            return Err(ParloError::ConfigInvalidValue {
                key: "translation.target_languages".to_string(),
                message: "at least one target language is required".to_string(),
            });
        }

        if !self
            .translation
            .target_languages
            .contains(&self.synthesis.speak_language)
        {
            return Err(ParloError::ConfigInvalidValue {
                key: "synthesis.speak_language".to_string(),
                message: format!(
                    "\"{}\" is not one of the configured target languages",
                    self.synthesis.speak_language
                ),
            });
        }

        Ok(())
    }

    /// Engine-facing view of the translation settings.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            source_language: self.translation.source_language.clone(),
            target_languages: self.translation.target_languages.clone(),
            voice: self.synthesis.voice.clone(),
        }
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/parlo/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("parlo")
            .join("config.toml")
    }
}

/// Speech service credentials, read from the environment only.
///
/// The key is a secret and never belongs in the config file.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub key: String,
    pub region: String,
}

impl Credentials {
    /// Read credentials from the environment.
    ///
    /// Both variables must be set and non-blank; the first missing one is
    /// reported.
    pub fn from_env() -> Result<Self> {
        let key = require_env(defaults::SPEECH_KEY_VAR)?;
        let region = require_env(defaults::SPEECH_REGION_VAR)?;
        Ok(Self { key, region })
    }

    /// The key with all but the last four characters masked, for diagnostics.
    pub fn masked_key(&self) -> String {
        mask_secret(&self.key)
    }
}

/// Mask a secret down to its last four characters.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - 4))
}

/// An environment variable's value, treating blank as unset.
pub fn env_non_blank(variable: &str) -> Option<String> {
    std::env::var(variable)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn require_env(variable: &str) -> Result<String> {
    env_non_blank(variable).ok_or_else(|| ParloError::MissingCredential {
        variable: variable.to_string(),
    })
}
