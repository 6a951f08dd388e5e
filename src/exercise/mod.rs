pub mod model;
pub mod settings;
pub mod validate;

pub use model::{Block, Case, Difficulty, ExerciseDefinition, Localized, localized};
pub use settings::{ExerciseSettings, SettingsOverrides};
pub use validate::{ValidationError, validate};

#[cfg(test)]
pub(crate) mod fixtures;
