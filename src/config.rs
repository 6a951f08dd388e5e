use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::exercise::SettingsOverrides;

pub const SUPPORTED_LOCALES: &[&str] = &["en", "el", "ru"];

/// What a wrong answer leads to when skipping is not allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrongAnswerPolicy {
    /// Retype the correct answer before moving on.
    #[default]
    Correction,
    /// Acknowledge the correct answer and move on.
    Continue,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_ignore_tones")]
    pub ignore_tones: bool,
    #[serde(default)]
    pub wrong_answer_policy: WrongAnswerPolicy,
    #[serde(default = "default_exercise_dir")]
    pub exercise_dir: String,
    #[serde(default)]
    pub settings: SettingsOverrides,
}

fn default_locale() -> String {
    "en".to_string()
}
fn default_ignore_tones() -> bool {
    false
}
fn default_exercise_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordform")
        .join("exercises")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            ignore_tones: default_ignore_tones(),
            wrong_answer_policy: WrongAnswerPolicy::default(),
            exercise_dir: default_exercise_dir(),
            settings: SettingsOverrides::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize_locale();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordform")
            .join("config.toml")
    }

    /// Reset an unsupported locale to English.
    pub fn normalize_locale(&mut self) {
        let lowered = self.locale.trim().to_lowercase();
        self.locale = if SUPPORTED_LOCALES.contains(&lowered.as_str()) {
            lowered
        } else {
            default_locale()
        };
    }
}
