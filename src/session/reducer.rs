use crate::session::action::Action;
use crate::session::state::{SessionState, Status, Stats, initialize};

/// Apply one action and return the resulting state. Total: every action,
/// including out-of-range `Advance` targets and `Unknown`, yields a state.
pub fn reduce(state: &SessionState, action: Action) -> SessionState {
    match action {
        Action::SetStatus { status } => SessionState {
            status,
            ..state.clone()
        },
        Action::SetUserAnswer { value } => SessionState {
            user_answer: value,
            ..state.clone()
        },
        Action::AnswerCorrect {
            answer,
            increment_correct,
        } => SessionState {
            status: Status::CorrectAnswer,
            user_answer: answer,
            is_correct: Some(true),
            stats: Stats {
                correct: state.stats.correct + usize::from(increment_correct),
                ..state.stats
            },
            ..state.clone()
        },
        Action::AnswerIncorrect {
            answer,
            increment_incorrect,
        } => {
            let mut next = SessionState {
                status: Status::WrongAnswer,
                is_correct: Some(false),
                incorrect_attempts: state.incorrect_attempts + 1,
                ..state.clone()
            };
            if increment_incorrect {
                next.stats = Stats {
                    incorrect: state.stats.incorrect + 1,
                    ..state.stats
                };
                next.original_user_answer = answer.clone();
                next.show_answer = true;
            }
            next.user_answer = answer;
            next
        }
        Action::Advance { next } => SessionState {
            status: Status::WaitingInput,
            current_block_index: next.block_index,
            current_case_index: next.case_index,
            user_answer: String::new(),
            original_user_answer: String::new(),
            is_correct: None,
            show_answer: false,
            incorrect_attempts: 0,
            ..state.clone()
        },
        Action::Complete => SessionState {
            status: Status::Completed,
            ..state.clone()
        },
        Action::Restart { exercise } | Action::ResetFromProps { exercise } => initialize(exercise),
        Action::ToggleAutoAdvance => SessionState {
            auto_advance_enabled: !state.auto_advance_enabled,
            ..state.clone()
        },
        Action::ToggleHint { hint_type } => SessionState {
            hints: state.hints.toggled(hint_type),
            ..state.clone()
        },
        Action::RequireCorrection => SessionState {
            status: Status::RequireCorrection,
            ..state.clone()
        },
        Action::RequireContinue => SessionState {
            status: Status::RequireContinue,
            ..state.clone()
        },
        Action::Unknown => state.clone(),
    }
}
