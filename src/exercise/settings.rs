use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSettings {
    #[serde(default = "default_auto_advance")]
    pub auto_advance: bool,
    #[serde(default = "default_auto_advance_delay_ms")]
    pub auto_advance_delay_ms: u64,
    #[serde(default = "default_allow_skip")]
    pub allow_skip: bool,
    #[serde(default = "default_shuffle_cases")]
    pub shuffle_cases: bool,
}

fn default_auto_advance() -> bool {
    true
}
fn default_auto_advance_delay_ms() -> u64 {
    1500
}
fn default_allow_skip() -> bool {
    false
}
fn default_shuffle_cases() -> bool {
    false
}

impl Default for ExerciseSettings {
    fn default() -> Self {
        Self {
            auto_advance: default_auto_advance(),
            auto_advance_delay_ms: default_auto_advance_delay_ms(),
            allow_skip: default_allow_skip(),
            shuffle_cases: default_shuffle_cases(),
        }
    }
}

/// User-level overrides; an unset field keeps the exercise's own value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_skip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_cases: Option<bool>,
}

impl SettingsOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: ExerciseSettings) -> ExerciseSettings {
        ExerciseSettings {
            auto_advance: self.auto_advance.unwrap_or(base.auto_advance),
            auto_advance_delay_ms: self
                .auto_advance_delay_ms
                .unwrap_or(base.auto_advance_delay_ms),
            allow_skip: self.allow_skip.unwrap_or(base.allow_skip),
            shuffle_cases: self.shuffle_cases.unwrap_or(base.shuffle_cases),
        }
    }

    /// Layer `other` on top of `self`: fields set in `other` win.
    pub fn merged_with(&self, other: &SettingsOverrides) -> SettingsOverrides {
        SettingsOverrides {
            auto_advance: other.auto_advance.or(self.auto_advance),
            auto_advance_delay_ms: other.auto_advance_delay_ms.or(self.auto_advance_delay_ms),
            allow_skip: other.allow_skip.or(self.allow_skip),
            shuffle_cases: other.shuffle_cases.or(self.shuffle_cases),
        }
    }
}
