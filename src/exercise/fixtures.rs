use std::collections::BTreeSet;
use std::sync::Arc;

use crate::exercise::model::{Block, Case, Difficulty, ExerciseDefinition};
use crate::exercise::settings::ExerciseSettings;

/// An exercise whose block `b` holds `sizes[b]` cases. Case `c` of block `b`
/// has id `b{b}c{c}` and accepts the answer `answer-{b}-{c}`.
pub fn exercise_with_sizes(sizes: &[usize], settings: ExerciseSettings) -> ExerciseDefinition {
    let blocks = sizes
        .iter()
        .enumerate()
        .map(|(b, &size)| Block {
            id: format!("b{b}"),
            name: format!("block {b}"),
            name_hint_i18n: None,
            cases: (0..size)
                .map(|c| Case {
                    id: format!("b{b}c{c}"),
                    prompt: format!("prompt {b}/{c}"),
                    prompt_hint_i18n: None,
                    correct: vec![format!("answer-{b}-{c}")],
                    hint: None,
                    hint_i18n: None,
                })
                .collect(),
        })
        .collect();

    ExerciseDefinition {
        id: "fixture".to_string(),
        title: "Fixture".to_string(),
        description: String::new(),
        difficulty: Difficulty::Beginner,
        tags: BTreeSet::new(),
        settings,
        blocks,
    }
}

/// Two blocks of sizes 2 and 1 with default settings.
pub fn two_blocks() -> Arc<ExerciseDefinition> {
    Arc::new(exercise_with_sizes(&[2, 1], ExerciseSettings::default()))
}
