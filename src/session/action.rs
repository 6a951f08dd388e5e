use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::engine::navigation::CaseIndices;
use crate::exercise::ExerciseDefinition;
use crate::session::state::{HintType, Status};

/// Everything a host can ask of a session. The JSON form is
/// `{"type": "ANSWER_CORRECT", "answer": "...", "incrementCorrect": true}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    SetStatus {
        status: Status,
    },
    SetUserAnswer {
        value: String,
    },
    AnswerCorrect {
        answer: String,
        increment_correct: bool,
    },
    /// `increment_incorrect` marks the first failure on a case: it bumps the
    /// session counter, captures the answer and reveals the correct one.
    AnswerIncorrect {
        answer: String,
        increment_incorrect: bool,
    },
    Advance {
        next: CaseIndices,
    },
    Complete,
    Restart {
        exercise: Arc<ExerciseDefinition>,
    },
    ResetFromProps {
        exercise: Arc<ExerciseDefinition>,
    },
    ToggleAutoAdvance,
    ToggleHint {
        hint_type: HintType,
    },
    RequireCorrection,
    RequireContinue,
    /// Any action type this build does not know; reducing it is a no-op.
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetStatus { .. } => "SET_STATUS",
            Self::SetUserAnswer { .. } => "SET_USER_ANSWER",
            Self::AnswerCorrect { .. } => "ANSWER_CORRECT",
            Self::AnswerIncorrect { .. } => "ANSWER_INCORRECT",
            Self::Advance { .. } => "ADVANCE",
            Self::Complete => "COMPLETE",
            Self::Restart { .. } => "RESTART",
            Self::ResetFromProps { .. } => "RESET_FROM_PROPS",
            Self::ToggleAutoAdvance => "TOGGLE_AUTO_ADVANCE",
            Self::ToggleHint { .. } => "TOGGLE_HINT",
            Self::RequireCorrection => "REQUIRE_CORRECTION",
            Self::RequireContinue => "REQUIRE_CONTINUE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_actions() {
        let action: Action =
            serde_json::from_str(r#"{"type":"TOGGLE_HINT","hintType":"prompt"}"#).unwrap();
        assert_eq!(
            action,
            Action::ToggleHint {
                hint_type: HintType::Prompt
            }
        );

        let action: Action = serde_json::from_str(
            r#"{"type":"ADVANCE","next":{"blockIndex":0,"caseIndex":1}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::Advance {
                next: CaseIndices::new(0, 1)
            }
        );

        let action: Action =
            serde_json::from_str(r#"{"type":"SET_STATUS","status":"REQUIRE_CONTINUE"}"#).unwrap();
        assert_eq!(
            action,
            Action::SetStatus {
                status: Status::RequireContinue
            }
        );
    }

    #[test]
    fn test_unknown_action_type_deserializes_to_unknown() {
        let action: Action = serde_json::from_str(r#"{"type":"SHOW_CONFETTI"}"#).unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn test_serialize_uses_camel_case_fields() {
        let json = serde_json::to_string(&Action::AnswerIncorrect {
            answer: "ειμαι".to_string(),
            increment_incorrect: true,
        })
        .unwrap();
        assert!(json.contains(r#""type":"ANSWER_INCORRECT""#));
        assert!(json.contains(r#""incrementIncorrect":true"#));
    }
}
