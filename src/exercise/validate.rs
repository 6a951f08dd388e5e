//! Structural checks applied by the exercise store before a definition is
//! handed to a session. The session engine itself assumes well-formed input.

use std::collections::HashSet;

use thiserror::Error;

use crate::exercise::model::ExerciseDefinition;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("exercise id is empty")]
    EmptyId,

    #[error("exercise {exercise} has an empty title")]
    EmptyTitle { exercise: String },

    #[error("exercise {exercise} has no blocks")]
    NoBlocks { exercise: String },

    #[error("block {block} has no cases")]
    EmptyBlock { block: String },

    #[error("case {case} in block {block} has no correct answers")]
    NoCorrectAnswers { block: String, case: String },

    #[error("case {case} in block {block} has a blank correct answer")]
    BlankAnswer { block: String, case: String },

    #[error("duplicate block id {block}")]
    DuplicateBlockId { block: String },

    #[error("duplicate case id {case} in block {block}")]
    DuplicateCaseId { block: String, case: String },
}

pub fn validate(exercise: &ExerciseDefinition) -> Result<(), ValidationError> {
    if exercise.id.trim().is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if exercise.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle {
            exercise: exercise.id.clone(),
        });
    }
    if exercise.blocks.is_empty() {
        return Err(ValidationError::NoBlocks {
            exercise: exercise.id.clone(),
        });
    }

    let mut block_ids = HashSet::new();
    for block in &exercise.blocks {
        if !block_ids.insert(block.id.as_str()) {
            return Err(ValidationError::DuplicateBlockId {
                block: block.id.clone(),
            });
        }
        if block.cases.is_empty() {
            return Err(ValidationError::EmptyBlock {
                block: block.id.clone(),
            });
        }

        let mut case_ids = HashSet::new();
        for case in &block.cases {
            if !case_ids.insert(case.id.as_str()) {
                return Err(ValidationError::DuplicateCaseId {
                    block: block.id.clone(),
                    case: case.id.clone(),
                });
            }
            if case.correct.is_empty() {
                return Err(ValidationError::NoCorrectAnswers {
                    block: block.id.clone(),
                    case: case.id.clone(),
                });
            }
            if case.correct.iter().any(|answer| answer.trim().is_empty()) {
                return Err(ValidationError::BlankAnswer {
                    block: block.id.clone(),
                    case: case.id.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> ExerciseDefinition {
        ExerciseDefinition::template()
    }

    #[test]
    fn test_template_is_valid() {
        assert_eq!(validate(&template()), Ok(()));
    }

    #[test]
    fn test_rejects_missing_blocks() {
        let mut ex = template();
        ex.blocks.clear();
        assert_eq!(
            validate(&ex),
            Err(ValidationError::NoBlocks {
                exercise: "my-exercise".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_empty_block() {
        let mut ex = template();
        ex.blocks[0].cases.clear();
        assert!(matches!(validate(&ex), Err(ValidationError::EmptyBlock { .. })));
    }

    #[test]
    fn test_rejects_case_without_answers() {
        let mut ex = template();
        ex.blocks[0].cases[1].correct.clear();
        assert_eq!(
            validate(&ex),
            Err(ValidationError::NoCorrectAnswers {
                block: "echo".to_string(),
                case: "echo-2sg".to_string(),
            })
        );
    }

    #[test]
    fn test_rejects_blank_answer() {
        let mut ex = template();
        ex.blocks[0].cases[0].correct.push("   ".to_string());
        assert!(matches!(validate(&ex), Err(ValidationError::BlankAnswer { .. })));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut ex = template();
        let dup = ex.blocks[0].cases[0].clone();
        ex.blocks[0].cases.push(dup);
        assert!(matches!(
            validate(&ex),
            Err(ValidationError::DuplicateCaseId { .. })
        ));

        let mut ex = template();
        let dup = ex.blocks[0].clone();
        ex.blocks.push(dup);
        assert!(matches!(
            validate(&ex),
            Err(ValidationError::DuplicateBlockId { .. })
        ));
    }

    #[test]
    fn test_same_case_id_allowed_in_different_blocks() {
        let mut ex = template();
        let mut other = ex.blocks[0].clone();
        other.id = "echo-past".to_string();
        ex.blocks.push(other);
        assert_eq!(validate(&ex), Ok(()));
    }

    #[test]
    fn test_rejects_empty_title() {
        let mut ex = template();
        ex.title = " ".to_string();
        assert!(matches!(validate(&ex), Err(ValidationError::EmptyTitle { .. })));
    }
}
