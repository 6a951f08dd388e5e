use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::exercise::{Case, ExerciseDefinition};

/// Cursor into an exercise: block-major, case-minor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseIndices {
    pub block_index: usize,
    pub case_index: usize,
}

impl CaseIndices {
    pub fn new(block_index: usize, case_index: usize) -> Self {
        Self {
            block_index,
            case_index,
        }
    }
}

pub fn total_cases(exercise: &ExerciseDefinition) -> usize {
    exercise.blocks.iter().map(|b| b.cases.len()).sum()
}

pub fn case_by_indices(
    exercise: &ExerciseDefinition,
    block_index: usize,
    case_index: usize,
) -> Option<&Case> {
    exercise.blocks.get(block_index)?.cases.get(case_index)
}

/// The case after `(block_index, case_index)`, or `None` at the last case of
/// the last block. Blocks without cases are stepped over.
pub fn next_indices(
    exercise: &ExerciseDefinition,
    block_index: usize,
    case_index: usize,
) -> Option<CaseIndices> {
    let block = exercise.blocks.get(block_index)?;
    let following = case_index.checked_add(1)?;
    if following < block.cases.len() {
        return Some(CaseIndices::new(block_index, following));
    }
    if following > block.cases.len() {
        return None;
    }

    exercise
        .blocks
        .iter()
        .enumerate()
        .skip(block_index + 1)
        .find(|(_, b)| !b.cases.is_empty())
        .map(|(b, _)| CaseIndices::new(b, 0))
}

/// Number of cases strictly before `(block_index, case_index)`. Saturates on
/// cursors far past the end.
pub fn completed_cases_count(
    exercise: &ExerciseDefinition,
    block_index: usize,
    case_index: usize,
) -> usize {
    let before: usize = exercise
        .blocks
        .iter()
        .take(block_index)
        .map(|b| b.cases.len())
        .sum();
    before.saturating_add(case_index)
}

/// Shuffle the cases inside each block when the exercise asks for it. Blocks
/// keep their order. With shuffling disabled the same `Arc` is returned.
pub fn shuffle_exercise_cases<R: Rng + ?Sized>(
    exercise: &Arc<ExerciseDefinition>,
    rng: &mut R,
) -> Arc<ExerciseDefinition> {
    if !exercise.settings.shuffle_cases {
        return Arc::clone(exercise);
    }

    let mut shuffled = ExerciseDefinition::clone(exercise);
    for block in &mut shuffled.blocks {
        block.cases.shuffle(rng);
    }
    Arc::new(shuffled)
}
