use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::debug;

use crate::config::{Config, WrongAnswerPolicy};
use crate::engine::check_answer;
use crate::exercise::{ExerciseDefinition, ExerciseSettings};
use crate::session::{
    Action, HintType, SessionState, SessionSummary, Status, initialize, reduce, selectors,
};

/// Host side of a session: decides which action follows a user input and owns
/// the auto-advance deadline. All state changes go through `reduce`.
pub struct App {
    pub config: Config,
    exercise: Arc<ExerciseDefinition>,
    state: SessionState,
    auto_advance_at: Option<Instant>,
}

impl App {
    pub fn new(exercise: Arc<ExerciseDefinition>, config: Config) -> Self {
        let exercise = with_overrides(exercise, &config);
        let state = initialize(Arc::clone(&exercise));
        debug!(
            exercise = %exercise.id,
            total_cases = state.total_cases,
            "session started"
        );
        Self {
            config,
            exercise,
            state,
            auto_advance_at: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn settings(&self) -> ExerciseSettings {
        self.state.exercise.settings
    }

    pub fn auto_advance_deadline(&self) -> Option<Instant> {
        self.auto_advance_at
    }

    fn dispatch(&mut self, action: Action) {
        let name = action.name();
        self.state = reduce(&self.state, action);
        debug!(
            action = name,
            status = self.state.status.as_str(),
            block = self.state.current_block_index,
            case = self.state.current_case_index,
            "dispatched"
        );
    }

    /// Handle a line of user input for the current case.
    pub fn submit(&mut self, answer: &str, now: Instant) {
        match self.state.status {
            Status::WaitingInput | Status::WrongAnswer => {
                self.dispatch(Action::SetUserAnswer {
                    value: answer.to_string(),
                });
                self.evaluate(answer, now);
            }
            Status::RequireCorrection => {
                self.dispatch(Action::SetUserAnswer {
                    value: answer.to_string(),
                });
                self.evaluate_correction(answer, now);
            }
            Status::CorrectAnswer | Status::RequireContinue => {
                self.proceed();
            }
            Status::Completed => {}
        }
    }

    fn current_answer_matches(&self, answer: &str, ignore_tones: bool) -> Option<bool> {
        selectors::current_case(&self.state)
            .map(|case| check_answer(answer, &case.correct, ignore_tones))
    }

    fn evaluate(&mut self, answer: &str, now: Instant) {
        let Some(correct) = self.current_answer_matches(answer, self.config.ignore_tones) else {
            return;
        };
        let first_try = self.state.incorrect_attempts == 0;

        if correct {
            self.dispatch(Action::AnswerCorrect {
                answer: answer.to_string(),
                increment_correct: first_try,
            });
            self.arm_auto_advance(now);
            return;
        }

        self.dispatch(Action::AnswerIncorrect {
            answer: answer.to_string(),
            increment_incorrect: first_try,
        });
        if !self.settings().allow_skip {
            match self.config.wrong_answer_policy {
                WrongAnswerPolicy::Correction => self.dispatch(Action::RequireCorrection),
                WrongAnswerPolicy::Continue => self.dispatch(Action::RequireContinue),
            }
        }
    }

    /// During correction the answer must match exactly, tones included.
    fn evaluate_correction(&mut self, answer: &str, now: Instant) {
        let Some(correct) = self.current_answer_matches(answer, false) else {
            return;
        };
        if correct {
            self.dispatch(Action::AnswerCorrect {
                answer: answer.to_string(),
                increment_correct: false,
            });
            self.arm_auto_advance(now);
        } else {
            self.dispatch(Action::AnswerIncorrect {
                answer: answer.to_string(),
                increment_incorrect: false,
            });
            self.dispatch(Action::RequireCorrection);
        }
    }

    fn arm_auto_advance(&mut self, now: Instant) {
        self.auto_advance_at = if selectors::should_auto_advance(&self.state) {
            Some(now + Duration::from_millis(self.settings().auto_advance_delay_ms))
        } else {
            None
        };
    }

    fn advance(&mut self) {
        self.auto_advance_at = None;
        match selectors::next_indices(&self.state) {
            Some(next) => self.dispatch(Action::Advance { next }),
            None => self.dispatch(Action::Complete),
        }
    }

    /// Move past the current case when the status allows it. Returns whether
    /// the cursor moved.
    pub fn proceed(&mut self) -> bool {
        let allowed = match self.state.status {
            Status::CorrectAnswer | Status::RequireContinue => true,
            Status::WrongAnswer => self.settings().allow_skip,
            _ => false,
        };
        if allowed {
            self.advance();
        }
        allowed
    }

    /// Give up on the current case. Counts as a failure unless one was
    /// already recorded.
    pub fn skip(&mut self) -> bool {
        let skippable = matches!(self.state.status, Status::WaitingInput | Status::WrongAnswer);
        if !self.settings().allow_skip || !skippable {
            return false;
        }
        if self.state.incorrect_attempts == 0 {
            self.dispatch(Action::AnswerIncorrect {
                answer: self.state.user_answer.clone(),
                increment_incorrect: true,
            });
        }
        self.advance();
        true
    }

    /// Fire the auto-advance deadline if it has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.auto_advance_at {
            Some(deadline) if now >= deadline => {
                self.auto_advance_at = None;
                if selectors::should_auto_advance(&self.state) {
                    self.advance();
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    pub fn toggle_auto_advance(&mut self, now: Instant) {
        self.dispatch(Action::ToggleAutoAdvance);
        self.arm_auto_advance(now);
    }

    pub fn toggle_hint(&mut self, hint_type: HintType) {
        self.dispatch(Action::ToggleHint { hint_type });
    }

    /// Start over with the same exercise, reshuffling if configured.
    pub fn restart(&mut self) {
        self.auto_advance_at = None;
        self.dispatch(Action::Restart {
            exercise: Arc::clone(&self.exercise),
        });
    }

    /// Swap in a new definition of the exercise, e.g. after it was edited on disk.
    pub fn reset_from(&mut self, exercise: Arc<ExerciseDefinition>) {
        self.exercise = with_overrides(exercise, &self.config);
        self.auto_advance_at = None;
        self.dispatch(Action::ResetFromProps {
            exercise: Arc::clone(&self.exercise),
        });
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_state(&self.state, Utc::now())
    }
}

fn with_overrides(exercise: Arc<ExerciseDefinition>, config: &Config) -> Arc<ExerciseDefinition> {
    if config.settings.is_empty() {
        return exercise;
    }
    let mut merged = ExerciseDefinition::clone(&exercise);
    merged.settings = config.settings.apply(exercise.settings);
    Arc::new(merged)
}
